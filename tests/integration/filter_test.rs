// Filter selection and filtered display
use treegrid_engine::{Editor, EditorSession};
use crate::mocks::device_page;

fn loaded() -> EditorSession {
    let mut session = EditorSession::new();
    session.load(&device_page()).unwrap();
    session.expand_all();
    session
}

#[test]
fn test_selecting_leaf_checks_ancestors() {
    let mut session = loaded();
    let changed = session.select_and_propagate("enable").unwrap();
    assert_eq!(changed, vec!["enable", "ch-b", "dev"]);
    assert_eq!(session.tree().checked_ids(), vec!["dev", "ch-b", "enable"]);

    session.clear_all();
    let again = session.select_and_propagate("enable").unwrap();
    assert_eq!(again, changed);
}

#[test]
fn test_address_search() {
    let mut session = loaded();
    let changed = session.select_by_address("0011");
    assert_eq!(changed, vec!["delay", "ch-a", "dev"]);

    session.set_filter_mode(true);
    assert_eq!(session.displayed_rows(), vec!["dev", "ch-a", "delay"]);

    assert!(session.select_by_address("").is_empty());
    assert!(session.select_by_address("0x9999").is_empty());
}

#[test]
fn test_filter_and_collapse_are_independent() {
    let mut session = loaded();
    session.select_and_propagate("mode").unwrap();
    session.set_filter_mode(true);
    assert_eq!(session.displayed_rows(), vec!["dev", "ch-a", "mode"]);

    session.toggle_expand("ch-a").unwrap();
    assert_eq!(session.displayed_rows(), vec!["dev", "ch-a"]);
    assert_eq!(session.tree().is_filter_checked("mode"), Some(true));

    assert!(!session.toggle_filter_mode());
    assert_eq!(session.displayed_rows(), vec!["dev", "ch-a", "ch-b", "enable", "global"]);
}

#[test]
fn test_invert_and_clear() {
    let mut session = loaded();
    session.select_and_propagate("global").unwrap();
    let all = session.invert_selection();
    assert_eq!(all.len(), 7);
    assert_eq!(session.tree().is_filter_checked("global"), Some(false));
    assert_eq!(session.tree().checked_ids().len(), 6);

    let cleared = session.clear_all();
    assert_eq!(cleared.len(), 6);
    assert!(session.tree().checked_ids().is_empty());
}
