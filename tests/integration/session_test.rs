// Session level tests against a mock host page
use treegrid_engine::{Editor, EditorError, EditorSession, MatchState, Validation};
use crate::mocks::{device_page, MockHostPage};

fn loaded() -> EditorSession {
    let mut session = EditorSession::new();
    session.load(&device_page()).unwrap();
    session
}

fn visible(session: &EditorSession) -> Vec<String> {
    session.tree().visible_ids().into_iter().map(String::from).collect()
}

#[test]
fn test_load_initial_state() {
    let session = loaded();
    assert_eq!(session.tree().len(), 7);
    assert_eq!(visible(&session), vec!["dev", "global"]);
    assert_eq!(session.word_hex(0x10), "A5A0");
    assert_eq!(session.word_hex(0x12), "0001");
    assert_eq!(session.word_hex(0x14), "0000");
    assert_eq!(session.fields().count(), 3);
    assert!(session.fields().all(|f| f.value.is_none()));
}

#[test]
fn test_browse_tree() {
    let mut session = loaded();

    // every row starts expanded: the first click on a top-level row collapses it
    assert!(session.toggle_expand("dev").unwrap().is_empty());
    let shown = session.toggle_expand("dev").unwrap();
    assert_eq!(shown, vec!["ch-a", "mode", "delay", "ch-b", "enable"]);

    let hidden = session.toggle_expand("ch-a").unwrap();
    assert_eq!(hidden, vec!["mode", "delay"]);
    let before = visible(&session);

    let hidden = session.toggle_expand("dev").unwrap();
    assert_eq!(hidden, vec!["ch-a", "ch-b", "enable"]);
    session.toggle_expand("dev").unwrap();
    assert_eq!(visible(&session), before);
}

#[test]
fn test_edit_values() {
    let mut session = loaded();

    let packed = session.apply_value("P_MODE", "5").unwrap();
    assert_eq!((packed.address, packed.word_hex()), (0x10, "A5A5".to_string()));

    let packed = session.apply_value("P_DELAY", "0x12").unwrap();
    assert_eq!((packed.address, packed.word_hex()), (0x10, "12A5".to_string()));
    assert_eq!(packed.value_hex(), "0012");

    let packed = session.apply_value("P_EN", "1").unwrap();
    assert_eq!(packed.word_hex(), "8001");

    // same value again changes nothing
    let again = session.apply_value("P_EN", "1").unwrap();
    assert_eq!(again, packed);

    let err = session.apply_value("P_EN", "on").unwrap_err();
    assert!(matches!(err, EditorError::Value(_)));
    assert_eq!(session.word_hex(0x12), "8001");
    assert_eq!(session.field("P_EN").unwrap().value, Some(1));
}

#[test]
fn test_expected_values() {
    let mut session = loaded();
    assert_eq!(session.refresh_test_tree(), vec!["mode"]);
    assert_eq!(session.tree().match_state("mode"), Some(MatchState::Inactive));

    session.apply_value("P_MODE", "5").unwrap();
    assert!(session.compare_to_expected("P_MODE", 5).unwrap().matched);
    assert_eq!(session.refresh_test_tree(), vec!["mode"]);
    assert_eq!(session.tree().match_state("mode"), Some(MatchState::Active));

    let changed = session.propagate_match_state("ch-a", false).unwrap();
    assert_eq!(changed, vec!["ch-a", "mode", "delay"]);
    assert_eq!(session.tree().match_state("dev"), Some(MatchState::Unset));
}

#[test]
fn test_initial_value_is_not_applied_on_load() {
    let page = MockHostPage::new()
        .test_row("r", "0", "P", "5")
        .field("P", "0xFF", "0", "8", "0")
        .initial("5")
        .word("0", "0000");
    let mut session = EditorSession::new();
    session.load(&page).unwrap();

    assert!(!session.compare_to_expected("P", 5).unwrap().matched);
    session.refresh_test_tree();
    assert_eq!(session.tree().match_state("r"), Some(MatchState::Inactive));
    assert_eq!(session.word_hex(0), "0000");

    session.apply_initial_values().unwrap();
    assert_eq!(session.word_hex(0), "0005");
    assert_eq!(session.refresh_test_tree(), vec!["r"]);
    assert_eq!(session.tree().match_state("r"), Some(MatchState::Active));
}

#[test]
fn test_failed_load_keeps_previous_state() {
    let mut session = loaded();
    let bad = MockHostPage::new()
        .row("x", "0")
        .field("P", "0xFF", "zero", "8", "0");
    assert!(matches!(session.load(&bad), Err(EditorError::Value(_))));
    assert_eq!(session.tree().len(), 7);

    let bad = MockHostPage::new().row("x", "0").word("0", "GG");
    assert!(matches!(session.load(&bad), Err(EditorError::Format(_))));
    assert!(session.tree().contains("dev"));
}

#[test]
fn test_strict_validation() {
    let orphan = MockHostPage::new().row("a", "0").row("b", "nowhere");
    let mut permissive = EditorSession::new();
    permissive.load(&orphan).unwrap();
    assert_eq!(permissive.tree().is_visible("b"), Some(false));

    let mut strict = EditorSession::new().with_validation(Validation::Strict);
    assert!(matches!(strict.load(&orphan), Err(EditorError::UnknownParent(_))));

    let overflow = MockHostPage::new().field("P", "0x1FF", "0", "9", "1");
    assert!(matches!(strict.load(&overflow), Err(EditorError::FieldOverflow(_))));

    let mut session = EditorSession::new().with_validation(Validation::Strict);
    session.load(&device_page()).unwrap();
    assert_eq!(session.validation(), Validation::Strict);
}
