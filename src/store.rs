use crate::common::hex::HexCodec;
use crate::ports::provided::FormatError;
use crate::fn_log;
use std::collections::BTreeMap;

/// Returns the even address of the 16-bit word containing byte `address`.
pub fn word_address(address: u32) -> u32 {
    address & !1
}

/// Register memory map: even word address → current 16-bit value.
///
/// Entries appear on first write or on initial parse from the host page and
/// live for the whole session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterWordStore {
    words: BTreeMap<u32, u16>,
}

impl RegisterWordStore {
    pub fn new() -> Self {
        Self {
            words: BTreeMap::new(),
        }
    }

    /// Returns the word containing `address`, or 0 if never written.
    ///
    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::RegisterWordStore;
    ///
    /// let mut store = RegisterWordStore::new();
    /// assert_eq!(store.read(10), 0);
    /// store.write(10, 0x00FF);
    /// assert_eq!(store.read(10), 0x00FF);
    /// assert_eq!(store.read(11), 0x00FF);
    /// ```
    pub fn read(&self, address: u32) -> u16 {
        self.words.get(&word_address(address)).copied().unwrap_or(0)
    }

    /// Overwrites the word containing `address` and returns the new value.
    /// Callers merge partial updates before writing.
    pub fn write(&mut self, address: u32, value: u16) -> u16 {
        self.words.insert(word_address(address), value);
        value
    }

    /// Seeds a word from the hex string the host page shows for it.
    pub fn write_hex(&mut self, address: u32, hex: &str) -> Result<u16, FormatError> {
        fn_log!("RegisterWordStore", "write_hex", hex);
        let value = HexCodec::parse_word(hex)?;
        Ok(self.write(address, value))
    }

    /// Hex readout of the word containing `address`.
    pub fn word_hex(&self, address: u32) -> String {
        HexCodec::format(self.read(address) as u32)
    }

    pub fn contains(&self, address: u32) -> bool {
        self.words.contains_key(&word_address(address))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        self.words.iter().map(|(address, value)| (*address, *value))
    }
}
