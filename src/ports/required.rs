// Required Ports - the host page implements these

/// Raw attributes of one table row, as the host page carries them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowAttributes {
    pub id: String,
    /// `"0"` for top-level rows.
    pub parent: String,
    /// Memory address column, matched by substring for address search.
    pub address: Option<String>,
    /// Parameter id whose value this row is tested against.
    pub parameter: Option<String>,
    /// Expected value of `parameter`.
    pub test: Option<String>,
}

/// Raw attributes of one editable parameter input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAttributes {
    pub id: String,
    pub mask: String,
    pub shift: String,
    pub size: String,
    pub address: String,
    pub value: Option<String>,
}

/// Host page
/// Supplies the initial rows, fields and register words. The host owns no
/// state after loading; it only reflects what the session reports back.
pub trait HostPage {
    /// Rows in document order.
    fn rows(&self) -> Vec<RowAttributes>;

    /// Parameter inputs.
    fn fields(&self) -> Vec<FieldAttributes>;

    /// Initial register words as (address, hex string).
    fn words(&self) -> Vec<(String, String)>;
}
