use crate::ports::provided::FormatError;
use crate::common::bit;

/// Fixed-width hexadecimal view of register values.
///
/// Numeric values stay the source of truth; the strings produced here are
/// derived and can be regenerated at any time.
///
/// # Examples
/// ```
/// use treegrid_engine::common::hex::HexCodec;
///
/// assert_eq!(HexCodec::format(0x3FF), "03FF");
/// assert_eq!(HexCodec::parse("03ff"), Ok(0x3FF));
/// ```
pub struct HexCodec;

impl HexCodec {
    pub const WIDTH: usize = 4;

    /// Formats `value` wrapped to 16 bits as 4 uppercase digits.
    ///
    /// # Examples
    /// ```
    /// use treegrid_engine::common::hex::HexCodec;
    ///
    /// assert_eq!(HexCodec::format(0), "0000");
    /// assert_eq!(HexCodec::format(0xABCDE), "BCDE");
    /// ```
    pub fn format(value: u32) -> String {
        format!("{:04X}", value & bit::WORD_MASK)
    }

    /// Formats a signed field value the way it is shown next to its input:
    /// two's complement, truncated to the last 4 digits.
    pub fn format_signed(value: i64) -> String {
        Self::format(value as u32)
    }

    /// Parses a case-insensitive hexadecimal string. Surrounding whitespace
    /// is ignored; prefixes and signs are not accepted.
    ///
    /// # Examples
    /// ```
    /// use treegrid_engine::common::hex::HexCodec;
    /// use treegrid_engine::FormatError;
    ///
    /// assert_eq!(HexCodec::parse("1a2B"), Ok(0x1A2B));
    /// assert_eq!(HexCodec::parse(" 00FF "), Ok(0xFF));
    /// assert_eq!(HexCodec::parse(""), Err(FormatError::Empty));
    /// assert!(matches!(HexCodec::parse("12G4"), Err(FormatError::InvalidDigit(_))));
    /// ```
    pub fn parse(s: &str) -> Result<u32, FormatError> {
        let digits = s.trim();
        if digits.is_empty() {
            return Err(FormatError::Empty);
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(FormatError::InvalidDigit(format!("'{}' in '{}'", c, digits)));
        }
        u32::from_str_radix(digits, 16)
            .map_err(|_| FormatError::Overflow(digits.to_string()))
    }

    /// Parses a hex string and wraps it to a 16-bit word.
    pub fn parse_word(s: &str) -> Result<u16, FormatError> {
        Ok((Self::parse(s)? & bit::WORD_MASK) as u16)
    }
}
