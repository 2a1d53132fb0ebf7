use crate::common::bit;
use crate::common::hex::HexCodec;
use crate::common::number::parse_int;
use crate::ports::provided::EditorError;
use crate::session::Validation;
use crate::store::RegisterWordStore;
use crate::fn_log;

/// One editable parameter: a bit range inside a 16-bit register word.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub id: String,
    /// Field bits before byte relocation, already including `shift`.
    pub mask: u32,
    pub shift: u32,
    /// Width in bits. Informational.
    pub size: u32,
    /// Byte address. Odd addresses live in the high byte of a word.
    pub address: u32,
    /// Last applied logical value, `None` until the first apply.
    pub value: Option<i64>,
    /// Value the host page supplied at load, not yet packed.
    pub initial: Option<i64>,
}

impl FieldDescriptor {
    pub fn new(id: &str, mask: u32, shift: u32, size: u32, address: u32) -> Self {
        Self {
            id: id.to_string(),
            mask,
            shift,
            size,
            address,
            value: None,
            initial: None,
        }
    }

    pub fn is_high_byte(&self) -> bool {
        self.address % 2 == 1
    }

    /// Even word address and word-relative mask after byte relocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::FieldDescriptor;
    ///
    /// let field = FieldDescriptor::new("P1", 0xFF, 0, 8, 5);
    /// assert_eq!(field.placement(), (4, 0xFF00));
    /// ```
    pub fn placement(&self) -> (u32, u32) {
        if self.is_high_byte() {
            (self.address - 1, bit::to_high_byte(self.mask))
        } else {
            (self.address, self.mask)
        }
    }

    /// Hex readout of the last applied value, shown next to the input.
    pub fn value_hex(&self) -> Option<String> {
        self.value.map(HexCodec::format_signed)
    }
}

/// Outcome of packing one value: the merged word and where it lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Packed {
    pub address: u32,
    pub word: u16,
    pub value: i64,
}

impl Packed {
    pub fn word_hex(&self) -> String {
        HexCodec::format(self.word as u32)
    }

    pub fn value_hex(&self) -> String {
        HexCodec::format_signed(self.value)
    }
}

/// Packs logical field values into register words.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitfieldPacker {
    validation: Validation,
}

impl BitfieldPacker {
    pub fn new(validation: Validation) -> Self {
        Self { validation }
    }

    /// Coerces `input` to an integer, then packs it.
    pub fn apply_str(
        &self,
        field: &mut FieldDescriptor,
        input: &str,
        store: &mut RegisterWordStore,
    ) -> Result<Packed, EditorError> {
        fn_log!("BitfieldPacker", "apply_str", &field.id, input);
        let value = parse_int(input)?;
        self.apply_value(field, value, store)
    }

    /// Shifts and masks `new_value` into place, relocates high-byte fields,
    /// merges the result over the current word and writes it back.
    ///
    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::{BitfieldPacker, FieldDescriptor, RegisterWordStore};
    ///
    /// let mut store = RegisterWordStore::new();
    /// store.write(10, 0x00FF);
    ///
    /// let mut field = FieldDescriptor::new("P1", 0xFF00, 8, 8, 10);
    /// let packed = BitfieldPacker::default().apply_value(&mut field, 0x3, &mut store).unwrap();
    /// assert_eq!((packed.address, packed.word), (10, 0x03FF));
    /// assert_eq!(field.value, Some(3));
    /// ```
    pub fn apply_value(
        &self,
        field: &mut FieldDescriptor,
        new_value: i64,
        store: &mut RegisterWordStore,
    ) -> Result<Packed, EditorError> {
        let mut bits = (new_value.wrapping_shl(field.shift) as u32) & field.mask;
        let mut mask = field.mask;
        let mut address = field.address;

        if field.is_high_byte() {
            address -= 1;
            bits = bit::to_high_byte(bits);
            mask = bit::to_high_byte(mask);
        }

        if self.validation.is_strict() && !bit::fits_word(mask) {
            return Err(EditorError::FieldOverflow(format!(
                "field '{}' mask {:#X} leaves the word at {}",
                field.id, mask, address
            )));
        }

        let old = store.read(address) as u32;
        let merged = (bit::merge(old, mask, bits) & bit::WORD_MASK) as u16;
        let word = store.write(address, merged);
        field.value = Some(new_value);

        Ok(Packed { address, word, value: new_value })
    }
}
