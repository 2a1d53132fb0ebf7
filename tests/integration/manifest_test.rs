// YAML host description
use treegrid_engine::{Editor, EditorSession, HostPage, Manifest, MatchState};

fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/device.yaml")
}

#[test]
fn test_manifest_from_file() {
    let manifest = Manifest::from_file(fixture_path()).unwrap();
    assert_eq!(manifest.rows().len(), 7);
    assert_eq!(manifest.fields().len(), 3);
    assert_eq!(manifest.words()[0], ("0x10".to_string(), "A5A0".to_string()));
}

#[test]
fn test_session_from_manifest() {
    let manifest = Manifest::from_file(fixture_path()).unwrap();
    let mut session = EditorSession::new();
    session.load(&manifest).unwrap();

    assert_eq!(session.field("P_MODE").unwrap().initial, Some(5));
    assert_eq!(session.field("P_MODE").unwrap().value, None);
    assert_eq!(session.word_hex(0x10), "A5A0");

    // initial values are pending until applied
    session.refresh_test_tree();
    assert_eq!(session.tree().match_state("mode"), Some(MatchState::Inactive));
    assert!(!session.compare_to_expected("P_MODE", 5).unwrap().matched);

    let packed = session.apply_initial_values().unwrap();
    assert_eq!(packed.len(), 2);
    assert_eq!(session.word_hex(0x10), "A5A5");
    assert_eq!(session.word_hex(0x12), "8001");

    session.refresh_test_tree();
    assert_eq!(session.tree().match_state("mode"), Some(MatchState::Active));
    assert_eq!(session.tree().match_state("enable"), Some(MatchState::Active));

    session.apply_value("P_EN", "0").unwrap();
    session.refresh_test_tree();
    assert_eq!(session.tree().match_state("enable"), Some(MatchState::Inactive));
}
