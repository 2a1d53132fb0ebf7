use crate::packer::FieldDescriptor;
use crate::ports::provided::EditorError;
use crate::tree::{MatchState, TreeStore};
use crate::fn_log;
use crate::warn_log;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: bool,
}

/// Compares a field's last applied value with an expected one. A field that
/// was never applied does not match.
///
/// # Examples
///
/// ```
/// use treegrid_engine::{compare_to_expected, FieldDescriptor};
///
/// let mut field = FieldDescriptor::new("P1", 0xFF, 0, 8, 0);
/// assert!(!compare_to_expected(&field, 3).matched);
/// field.value = Some(3);
/// assert!(compare_to_expected(&field, 3).matched);
/// ```
pub fn compare_to_expected(field: &FieldDescriptor, expected: i64) -> MatchResult {
    MatchResult {
        matched: field.value == Some(expected),
    }
}

/// Assigns active (matched) or inactive to `id` and all its descendants.
/// Returns ids whose state changed.
pub fn propagate_match_state(
    tree: &mut TreeStore,
    id: &str,
    matched: bool,
) -> Result<Vec<String>, EditorError> {
    fn_log!("compare", "propagate_match_state", id);
    let i = tree.slot(id)?;
    let state = if matched { MatchState::Active } else { MatchState::Inactive };

    let mut subtree = vec![i];
    subtree.extend(tree.descendants_at(i));
    let changed: Vec<usize> = subtree
        .into_iter()
        .filter(|&s| tree.set_match_state(s, state))
        .collect();
    Ok(changed.into_iter().map(|s| tree.id_at(s).to_string()).collect())
}

/// Re-evaluates every row bound to a test expectation, in document order.
/// Later rows override the state earlier rows gave their subtree.
/// Returns, in document order, ids whose final state differs from the
/// state before the refresh.
pub fn refresh_test_tree(
    tree: &mut TreeStore,
    fields: &HashMap<String, FieldDescriptor>,
) -> Vec<String> {
    fn_log!("compare", "refresh_test_tree");
    let bound: Vec<(String, String, i64)> = tree
        .nodes()
        .iter()
        .filter_map(|node| {
            node.test
                .as_ref()
                .map(|t| (node.id.clone(), t.parameter.clone(), t.expected))
        })
        .collect();
    let before: Vec<MatchState> = (0..tree.len()).map(|i| tree.match_state_at(i)).collect();

    for (id, parameter, expected) in bound {
        let matched = match fields.get(&parameter) {
            Some(field) => compare_to_expected(field, expected).matched,
            None => {
                warn_log!(
                    "compare",
                    "refresh_test_tree",
                    &format!("row '{}' tests unknown parameter '{}'", id, parameter)
                );
                false
            }
        };
        // bound ids come from the tree itself
        let _ = propagate_match_state(tree, &id, matched);
    }

    before
        .into_iter()
        .enumerate()
        .filter(|&(i, state)| tree.match_state_at(i) != state)
        .map(|(i, _)| tree.id_at(i).to_string())
        .collect()
}
