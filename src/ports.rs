// Ports - boundary between the host page and the library

pub mod provided;
pub mod required;

pub use provided::*;
pub use required::*;
