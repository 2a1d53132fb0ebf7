use crate::common::number::{parse_int, parse_u32};
use crate::packer::FieldDescriptor;
use crate::ports::provided::EditorError;
use crate::ports::required::{FieldAttributes, HostPage, RowAttributes};
use crate::store::RegisterWordStore;
use crate::tree::{TestBinding, TreeNode};
use crate::fn_log;
use crate::warn_log;

/// Converts host page attributes into typed records.
pub struct Load<'a> {
    host: &'a dyn HostPage,
}

impl<'a> Load<'a> {
    pub fn new(host: &'a dyn HostPage) -> Self {
        Self { host }
    }

    /// Rows in document order.
    pub fn rows(&self) -> Result<Vec<TreeNode>, EditorError> {
        fn_log!("Load", "rows");
        self.host.rows().into_iter().map(Self::row).collect()
    }

    pub fn fields(&self) -> Result<Vec<FieldDescriptor>, EditorError> {
        fn_log!("Load", "fields");
        self.host.fields().into_iter().map(Self::field).collect()
    }

    pub fn words(&self) -> Result<RegisterWordStore, EditorError> {
        fn_log!("Load", "words");
        let mut store = RegisterWordStore::new();
        for (address, hex) in self.host.words() {
            store.write_hex(parse_u32(&address)?, &hex)?;
        }
        Ok(store)
    }

    fn row(attrs: RowAttributes) -> Result<TreeNode, EditorError> {
        let test = match (attrs.parameter, attrs.test) {
            (Some(parameter), Some(test)) => Some(TestBinding {
                parameter,
                expected: parse_int(&test)?,
            }),
            (None, None) => None,
            _ => {
                warn_log!(
                    "Load",
                    "row",
                    &format!("row '{}' has an incomplete test binding", attrs.id)
                );
                None
            }
        };

        Ok(TreeNode {
            id: attrs.id.trim().to_string(),
            parent_id: attrs.parent.trim().to_string(),
            address: attrs.address,
            test,
        })
    }

    fn field(attrs: FieldAttributes) -> Result<FieldDescriptor, EditorError> {
        let initial = attrs.value.as_deref().map(parse_int).transpose()?;
        Ok(FieldDescriptor {
            mask: parse_u32(&attrs.mask)?,
            shift: parse_u32(&attrs.shift)?,
            size: parse_u32(&attrs.size)?,
            address: parse_u32(&attrs.address)?,
            value: None,
            initial,
            id: attrs.id,
        })
    }
}
