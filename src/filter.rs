use crate::common::bit;
use crate::ports::provided::EditorError;
use crate::tree::TreeStore;
use crate::fn_log;

/// Filter checkbox handling.
///
/// Checking a row checks its whole ancestor chain, so a filtered view never
/// shows a row without the rows leading to it. Expanded and visible flags
/// are never touched here.
pub struct FilterPropagationEngine;

impl FilterPropagationEngine {
    /// Checks `id` and every ancestor up to the first row without a
    /// resolvable parent. Returns the ids that were newly checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::{FilterPropagationEngine, TreeNode, TreeStore, Validation};
    ///
    /// let mut tree = TreeStore::build(vec![
    ///     TreeNode::new("a", "0"),
    ///     TreeNode::new("b", "a"),
    ///     TreeNode::new("c", "b"),
    /// ], Validation::Permissive).unwrap();
    ///
    /// assert_eq!(FilterPropagationEngine::select_and_propagate(&mut tree, "c").unwrap(), vec!["c", "b", "a"]);
    /// // already checked: nothing changes
    /// assert!(FilterPropagationEngine::select_and_propagate(&mut tree, "b").unwrap().is_empty());
    /// ```
    pub fn select_and_propagate(tree: &mut TreeStore, id: &str) -> Result<Vec<String>, EditorError> {
        fn_log!("FilterPropagationEngine", "select_and_propagate", id);
        let i = tree.slot(id)?;
        Ok(Self::select_slot(tree, i))
    }

    fn select_slot(tree: &mut TreeStore, i: usize) -> Vec<String> {
        let mut chain = vec![i];
        chain.extend(tree.ancestors_at(i));
        let changed: Vec<usize> = chain
            .into_iter()
            .filter(|&s| tree.set_flag(s, bit::OFFSET_FILTER, true))
            .collect();
        Self::to_ids(tree, changed)
    }

    /// Unchecks every row. Returns the ids that were checked.
    pub fn clear_all(tree: &mut TreeStore) -> Vec<String> {
        fn_log!("FilterPropagationEngine", "clear_all");
        let changed: Vec<usize> = (0..tree.len())
            .filter(|&i| tree.set_flag(i, bit::OFFSET_FILTER, false))
            .collect();
        Self::to_ids(tree, changed)
    }

    /// Flips every checkbox. Returns every id.
    pub fn invert_selection(tree: &mut TreeStore) -> Vec<String> {
        fn_log!("FilterPropagationEngine", "invert_selection");
        for i in 0..tree.len() {
            let checked = tree.flag(i, bit::OFFSET_FILTER);
            tree.set_flag(i, bit::OFFSET_FILTER, !checked);
        }
        tree.ids().map(String::from).collect()
    }

    /// Checks every row whose address contains `query`, with its ancestors.
    /// An empty query selects nothing. Returns newly checked ids.
    pub fn select_by_address(tree: &mut TreeStore, query: &str) -> Vec<String> {
        fn_log!("FilterPropagationEngine", "select_by_address", query);
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let hits: Vec<usize> = (0..tree.len())
            .filter(|&i| {
                tree.node_at(i)
                    .address
                    .as_deref()
                    .is_some_and(|address| address.contains(query))
            })
            .collect();

        let mut changed = Vec::new();
        for i in hits {
            changed.extend(Self::select_slot(tree, i));
        }
        changed
    }

    /// Whether the rendering layer shows `id`: visible, and checked when
    /// filter mode is on.
    pub fn is_displayed(tree: &TreeStore, id: &str, filter_mode: bool) -> Result<bool, EditorError> {
        let i = tree.slot(id)?;
        Ok(Self::displayed_at(tree, i, filter_mode))
    }

    /// Displayed row ids in document order.
    pub fn displayed(tree: &TreeStore, filter_mode: bool) -> Vec<String> {
        (0..tree.len())
            .filter(|&i| Self::displayed_at(tree, i, filter_mode))
            .map(|i| tree.id_at(i).to_string())
            .collect()
    }

    fn to_ids(tree: &TreeStore, slots: Vec<usize>) -> Vec<String> {
        slots.into_iter().map(|i| tree.id_at(i).to_string()).collect()
    }

    fn displayed_at(tree: &TreeStore, i: usize, filter_mode: bool) -> bool {
        tree.flag(i, bit::OFFSET_VISIBLE) && (!filter_mode || tree.flag(i, bit::OFFSET_FILTER))
    }
}
