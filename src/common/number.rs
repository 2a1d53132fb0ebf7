use crate::ports::provided::ValueError;

/// Coerces a host-supplied string to an integer.
///
/// Accepts an optional sign followed by decimal digits or a `0x`/`0X`
/// prefixed hex literal. Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use treegrid_engine::common::number::parse_int;
/// use treegrid_engine::ValueError;
///
/// assert_eq!(parse_int("18"), Ok(18));
/// assert_eq!(parse_int(" 0x12 "), Ok(18));
/// assert_eq!(parse_int("-3"), Ok(-3));
/// assert_eq!(parse_int(""), Err(ValueError::Empty));
/// assert!(matches!(parse_int("abc"), Err(ValueError::NotNumeric(_))));
/// ```
pub fn parse_int(s: &str) -> Result<i64, ValueError> {
    let text = s.trim();
    if text.is_empty() {
        return Err(ValueError::Empty);
    }

    let (negative, body) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = match body.get(..2) {
        Some("0x") | Some("0X") => (16, &body[2..]),
        _ => (10, body),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ValueError::NotNumeric(text.to_string()));
    }

    let magnitude = u64::from_str_radix(digits, radix)
        .map_err(|_| ValueError::OutOfRange(text.to_string()))?;

    if negative {
        0i64.checked_sub_unsigned(magnitude)
            .ok_or_else(|| ValueError::OutOfRange(text.to_string()))
    } else {
        i64::try_from(magnitude).map_err(|_| ValueError::OutOfRange(text.to_string()))
    }
}

/// Coerces a host attribute that must be a non-negative 32-bit quantity
/// (mask, shift, size, address).
pub fn parse_u32(s: &str) -> Result<u32, ValueError> {
    let value = parse_int(s)?;
    u32::try_from(value).map_err(|_| ValueError::OutOfRange(s.trim().to_string()))
}
