// Common utilities

pub mod bit;
pub mod hex;
pub mod number;
pub mod log_format;

pub use hex::HexCodec;
pub use log_format::LogFormat;
