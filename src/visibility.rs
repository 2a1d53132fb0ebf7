use crate::common::bit;
use crate::ports::provided::EditorError;
use crate::tree::TreeStore;
use crate::fn_log;

/// Expand/collapse cascades.
///
/// A row is visible iff it is top-level, or its parent is visible and
/// expanded. Filter flags are never touched here.
pub struct VisibilityEngine;

impl VisibilityEngine {
    /// Collapses an expanded row or expands a collapsed one.
    ///
    /// Collapsing hides every descendant but leaves their own expanded flags
    /// alone. Expanding shows the direct children and keeps descending
    /// through children that are themselves expanded. Expanding a row that
    /// is itself hidden only records the flag.
    ///
    /// Returns ids whose visible flag changed, in preorder.
    ///
    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::{TreeNode, TreeStore, Validation, VisibilityEngine};
    ///
    /// let mut tree = TreeStore::build(vec![
    ///     TreeNode::new("a", "0"),
    ///     TreeNode::new("b", "a"),
    /// ], Validation::Permissive).unwrap();
    ///
    /// // rows start expanded, so the first toggle collapses
    /// assert_eq!(VisibilityEngine::toggle_expand(&mut tree, "a").unwrap(), Vec::<String>::new());
    /// assert_eq!(VisibilityEngine::toggle_expand(&mut tree, "a").unwrap(), vec!["b"]);
    /// assert_eq!(tree.is_visible("b"), Some(true));
    /// ```
    pub fn toggle_expand(tree: &mut TreeStore, id: &str) -> Result<Vec<String>, EditorError> {
        fn_log!("VisibilityEngine", "toggle_expand", id);
        let i = tree.slot(id)?;
        let changed = if tree.flag(i, bit::OFFSET_EXPANDED) {
            tree.set_flag(i, bit::OFFSET_EXPANDED, false);
            Self::hide_descendants(tree, i)
        } else {
            tree.set_flag(i, bit::OFFSET_EXPANDED, true);
            if tree.flag(i, bit::OFFSET_VISIBLE) {
                Self::show_children(tree, i)
            } else {
                Vec::new()
            }
        };
        Ok(Self::to_ids(tree, changed))
    }

    /// Expands every row. Returns ids whose visible flag changed.
    pub fn expand_all(tree: &mut TreeStore) -> Vec<String> {
        fn_log!("VisibilityEngine", "expand_all");
        for i in 0..tree.len() {
            tree.set_flag(i, bit::OFFSET_EXPANDED, true);
        }
        Self::recompute(tree)
    }

    /// Collapses every row, leaving only top-level rows visible.
    pub fn collapse_all(tree: &mut TreeStore) -> Vec<String> {
        fn_log!("VisibilityEngine", "collapse_all");
        for i in 0..tree.len() {
            tree.set_flag(i, bit::OFFSET_EXPANDED, false);
        }
        Self::recompute(tree)
    }

    /// Re-derives every visible flag from the expanded flags.
    pub fn recompute(tree: &mut TreeStore) -> Vec<String> {
        let mut visible = vec![false; tree.len()];
        let mut stack: Vec<usize> = (0..tree.len()).rev().filter(|&i| tree.is_root_at(i)).collect();
        while let Some(i) = stack.pop() {
            if visible[i] {
                continue;
            }
            visible[i] = true;
            if tree.flag(i, bit::OFFSET_EXPANDED) {
                stack.extend(tree.children_at(i).iter().rev().copied());
            }
        }

        let changed: Vec<usize> = (0..tree.len())
            .filter(|&i| tree.set_flag(i, bit::OFFSET_VISIBLE, visible[i]))
            .collect();
        Self::to_ids(tree, changed)
    }

    fn hide_descendants(tree: &mut TreeStore, i: usize) -> Vec<usize> {
        tree.descendants_at(i)
            .into_iter()
            .filter(|&d| tree.set_flag(d, bit::OFFSET_VISIBLE, false))
            .collect()
    }

    fn show_children(tree: &mut TreeStore, i: usize) -> Vec<usize> {
        let mut seen = vec![false; tree.len()];
        seen[i] = true;
        let mut changed = Vec::new();
        let mut stack: Vec<usize> = tree.children_at(i).iter().rev().copied().collect();
        while let Some(c) = stack.pop() {
            if seen[c] {
                continue;
            }
            seen[c] = true;
            if tree.set_flag(c, bit::OFFSET_VISIBLE, true) {
                changed.push(c);
            }
            if tree.flag(c, bit::OFFSET_EXPANDED) {
                stack.extend(tree.children_at(c).iter().rev().copied());
            }
        }
        changed
    }

    fn to_ids(tree: &TreeStore, slots: Vec<usize>) -> Vec<String> {
        slots.into_iter().map(|i| tree.id_at(i).to_string()).collect()
    }
}
