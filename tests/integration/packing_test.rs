// Bitfield packing against the register word store
use treegrid_engine::{BitfieldPacker, FieldDescriptor, HexCodec, RegisterWordStore};

#[test]
fn test_fields_sharing_a_word_do_not_clobber_each_other() {
    let mut store = RegisterWordStore::new();
    let packer = BitfieldPacker::default();
    let mut low = FieldDescriptor::new("low", 0x0F, 0, 4, 8);
    let mut mid = FieldDescriptor::new("mid", 0xF0, 4, 4, 8);
    let mut high = FieldDescriptor::new("high", 0xFF, 0, 8, 9);

    packer.apply_value(&mut low, 0xA, &mut store).unwrap();
    packer.apply_value(&mut mid, 0xB, &mut store).unwrap();
    packer.apply_value(&mut high, 0xCD, &mut store).unwrap();
    assert_eq!(store.word_hex(8), "CDBA");

    packer.apply_value(&mut mid, 0, &mut store).unwrap();
    assert_eq!(store.word_hex(8), "CD0A");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_high_byte_field_reports_even_address() {
    let mut store = RegisterWordStore::new();
    let mut field = FieldDescriptor::new("P", 0xFF, 0, 8, 5);
    let packed = BitfieldPacker::default().apply_value(&mut field, 0x12, &mut store).unwrap();
    assert_eq!(packed.address, 4);
    assert_eq!((packed.word >> 8) & 0xFF, 0x12);
    assert_eq!(field.placement(), (4, 0xFF00));
}

#[test]
fn test_apply_is_idempotent_over_many_values() {
    let packer = BitfieldPacker::default();
    for v in [0i64, 1, 7, 0x55, 0xFF, -1, 300] {
        let mut store = RegisterWordStore::new();
        store.write(2, 0x5AA5);
        let mut field = FieldDescriptor::new("P", 0x3C, 2, 4, 3);
        let once = packer.apply_value(&mut field, v, &mut store).unwrap();
        let twice = packer.apply_value(&mut field, v, &mut store).unwrap();
        assert_eq!(once.word, twice.word, "value {}", v);
        assert_eq!(once.word & !0x3C00, 0x5AA5 & !0x3C00, "value {}", v);
    }
}

#[test]
fn test_hex_round_trip() {
    for v in 0..=0xFFFFu32 {
        assert_eq!(HexCodec::parse(&HexCodec::format(v)), Ok(v));
    }
}
