// Mock host page for testing
use treegrid_engine::{FieldAttributes, HostPage, RowAttributes};

pub struct MockHostPage {
    pub rows: Vec<RowAttributes>,
    pub fields: Vec<FieldAttributes>,
    pub words: Vec<(String, String)>,
}

impl MockHostPage {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            fields: Vec::new(),
            words: Vec::new(),
        }
    }

    pub fn row(mut self, id: &str, parent: &str) -> Self {
        self.rows.push(RowAttributes {
            id: id.to_string(),
            parent: parent.to_string(),
            ..Default::default()
        });
        self
    }

    pub fn row_at(mut self, id: &str, parent: &str, address: &str) -> Self {
        self.rows.push(RowAttributes {
            id: id.to_string(),
            parent: parent.to_string(),
            address: Some(address.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn test_row(mut self, id: &str, parent: &str, parameter: &str, expected: &str) -> Self {
        self.rows.push(RowAttributes {
            id: id.to_string(),
            parent: parent.to_string(),
            parameter: Some(parameter.to_string()),
            test: Some(expected.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn field(mut self, id: &str, mask: &str, shift: &str, size: &str, address: &str) -> Self {
        self.fields.push(FieldAttributes {
            id: id.to_string(),
            mask: mask.to_string(),
            shift: shift.to_string(),
            size: size.to_string(),
            address: address.to_string(),
            value: None,
        });
        self
    }

    /// Sets the initial value of the last added field.
    pub fn initial(mut self, value: &str) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.value = Some(value.to_string());
        }
        self
    }

    pub fn word(mut self, address: &str, hex: &str) -> Self {
        self.words.push((address.to_string(), hex.to_string()));
        self
    }
}

impl HostPage for MockHostPage {
    fn rows(&self) -> Vec<RowAttributes> {
        self.rows.clone()
    }

    fn fields(&self) -> Vec<FieldAttributes> {
        self.fields.clone()
    }

    fn words(&self) -> Vec<(String, String)> {
        self.words.clone()
    }
}

/// Device
/// ├── Channel A
/// │   ├── Mode        (P_MODE, address 0x10 bits 0-3)
/// │   └── Delay       (P_DELAY, address 0x11 high byte)
/// └── Channel B
///     └── Enable      (P_EN, address 0x12 bit 15)
/// Global
pub fn device_page() -> MockHostPage {
    MockHostPage::new()
        .row_at("dev", "0", "0x0010")
        .row_at("ch-a", "dev", "0x0010")
        .test_row("mode", "ch-a", "P_MODE", "5")
        .row_at("delay", "ch-a", "0x0011")
        .row_at("ch-b", "dev", "0x0012")
        .row_at("enable", "ch-b", "0x0012")
        .row("global", "0")
        .field("P_MODE", "0x0F", "0", "4", "0x10")
        .field("P_DELAY", "0xFF", "0", "8", "0x11")
        .field("P_EN", "0x8000", "15", "1", "0x12")
        .word("0x10", "A5A0")
        .word("0x12", "0001")
}
