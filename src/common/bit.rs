/// Node record: 8-bit fixed-length record holding the per-row flags.
///
/// Layout (MSB to LSB):
/// | field       | bits | offset |
/// |-------------|------|--------|
/// | padding     |   3  |   5    |
/// | match state |   2  |   3    |
/// | filter      |   1  |   2    |
/// | expanded    |   1  |   1    |
/// | visible     |   1  |   0    |

pub type NodeRecord = u8;

pub const OFFSET_VISIBLE: u32 = 0;
pub const OFFSET_EXPANDED: u32 = 1;
pub const OFFSET_FILTER: u32 = 2;
pub const OFFSET_MATCH: u32 = 3;

pub const MASK_VISIBLE: u8 = 0x1;
pub const MASK_EXPANDED: u8 = 0x1;
pub const MASK_FILTER: u8 = 0x1;
pub const MASK_MATCH: u8 = 0x3;

// match pool (2bit)
pub const MATCH_NONE: u8     = 0b00;
pub const MATCH_ACTIVE: u8   = 0b01;
pub const MATCH_INACTIVE: u8 = 0b10;

// --- register word layout ---

pub const WORD_MASK: u32 = 0xFFFF;
pub const BYTE_BITS: u32 = 8;

pub fn new() -> NodeRecord {
    0
}

/// Reads a field from a node record.
///
/// # Examples
///
/// ```
/// use treegrid_engine::common::bit;
///
/// let record: u8 = 0b10 << bit::OFFSET_MATCH;
/// assert_eq!(bit::get(record, bit::OFFSET_MATCH, bit::MASK_MATCH), bit::MATCH_INACTIVE);
/// ```
pub fn get(record: NodeRecord, offset: u32, mask: u8) -> u8 {
    (record >> offset) & mask
}

/// Writes a field into a node record, returning the updated value.
/// Adjacent fields are not affected.
///
/// # Examples
///
/// ```
/// use treegrid_engine::common::bit;
///
/// let record = bit::new();
/// let record = bit::set(record, bit::OFFSET_EXPANDED, bit::MASK_EXPANDED, 1);
/// let record = bit::set(record, bit::OFFSET_MATCH, bit::MASK_MATCH, bit::MATCH_ACTIVE);
/// assert_eq!(bit::get(record, bit::OFFSET_EXPANDED, bit::MASK_EXPANDED), 1);
/// assert_eq!(bit::get(record, bit::OFFSET_VISIBLE, bit::MASK_VISIBLE), 0);
/// assert_eq!(bit::get(record, bit::OFFSET_MATCH, bit::MASK_MATCH), bit::MATCH_ACTIVE);
/// ```
pub fn set(record: NodeRecord, offset: u32, mask: u8, value: u8) -> NodeRecord {
    (record & !(mask << offset)) | ((value & mask) << offset)
}

pub fn flag(record: NodeRecord, offset: u32) -> bool {
    get(record, offset, 0x1) == 1
}

pub fn set_flag(record: NodeRecord, offset: u32, on: bool) -> NodeRecord {
    set(record, offset, 0x1, on as u8)
}

/// Clears the bits covered by `mask` in `old` and ORs in `bits`.
/// `bits` is expected to be already masked.
///
/// # Examples
///
/// ```
/// use treegrid_engine::common::bit;
///
/// assert_eq!(bit::merge(0x00FF, 0xFF00, 0x0300), 0x03FF);
/// assert_eq!(bit::merge(0xFFFF, 0x00F0, 0x0000), 0xFF0F);
/// ```
pub fn merge(old: u32, mask: u32, bits: u32) -> u32 {
    (old & !mask) | bits
}

/// Relocates a low-byte pattern into the high byte of a 16-bit word.
pub fn to_high_byte(bits: u32) -> u32 {
    bits << BYTE_BITS
}

/// Returns true when every bit of `bits` lies inside one 16-bit word.
pub fn fits_word(bits: u32) -> bool {
    bits & !WORD_MASK == 0
}
