pub mod common;
pub mod ports;
pub mod store;
pub mod packer;
pub mod tree;
pub mod visibility;
pub mod filter;
pub mod compare;
pub mod load;
pub mod session;
#[cfg(feature = "builder")]
pub mod manifest;

pub use common::{HexCodec, LogFormat};
pub use store::RegisterWordStore;
pub use packer::{BitfieldPacker, FieldDescriptor, Packed};
pub use tree::{MatchState, TestBinding, TreeNode, TreeStore, ROOT};
pub use visibility::VisibilityEngine;
pub use filter::FilterPropagationEngine;
pub use compare::{compare_to_expected, propagate_match_state, MatchResult};
pub use load::Load;
pub use session::{EditorSession, Validation};
#[cfg(feature = "builder")]
pub use manifest::Manifest;

pub use ports::provided::Editor;
pub use ports::required::{FieldAttributes, HostPage, RowAttributes};

pub use ports::provided::{EditorError, FormatError, ManifestError, ValueError};
