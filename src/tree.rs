use crate::common::bit::{self, NodeRecord};
use crate::ports::provided::EditorError;
use crate::session::Validation;
use crate::warn_log;
use std::collections::HashMap;

/// Parent id of top-level rows.
pub const ROOT: &str = "0";

/// Row tested against an expected parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct TestBinding {
    pub parameter: String,
    pub expected: i64,
}

/// Static attributes of one row. Flags live in the store's node records.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: String,
    pub parent_id: String,
    pub address: Option<String>,
    pub test: Option<TestBinding>,
}

impl TreeNode {
    pub fn new(id: &str, parent_id: &str) -> Self {
        Self {
            id: id.to_string(),
            parent_id: parent_id.to_string(),
            address: None,
            test: None,
        }
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn with_test(mut self, parameter: &str, expected: i64) -> Self {
        self.test = Some(TestBinding {
            parameter: parameter.to_string(),
            expected,
        });
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT
    }
}

/// Active/inactive highlighting assigned by test comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Unset,
    Active,
    Inactive,
}

impl MatchState {
    fn from_bits(bits: u8) -> Self {
        match bits {
            bit::MATCH_ACTIVE => MatchState::Active,
            bit::MATCH_INACTIVE => MatchState::Inactive,
            _ => MatchState::Unset,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            MatchState::Unset => bit::MATCH_NONE,
            MatchState::Active => bit::MATCH_ACTIVE,
            MatchState::Inactive => bit::MATCH_INACTIVE,
        }
    }
}

/// Row hierarchy with per-row flag records.
///
/// Rows keep document order in their slots. The parent → children adjacency
/// is resolved once in [`TreeStore::build`].
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    nodes: Vec<TreeNode>,
    index: HashMap<String, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    records: Vec<NodeRecord>,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the adjacency and initialises flags: top-level rows visible,
    /// every other row hidden, every row expanded, nothing checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::{TreeNode, TreeStore, Validation};
    ///
    /// let tree = TreeStore::build(vec![
    ///     TreeNode::new("a", "0"),
    ///     TreeNode::new("b", "a"),
    /// ], Validation::Permissive).unwrap();
    ///
    /// assert_eq!(tree.is_visible("a"), Some(true));
    /// assert_eq!(tree.is_visible("b"), Some(false));
    /// assert_eq!(tree.children("a"), vec!["b"]);
    /// ```
    pub fn build(nodes: Vec<TreeNode>, validation: Validation) -> Result<Self, EditorError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node.id == ROOT {
                return Err(EditorError::DuplicateNode(format!(
                    "'{}' is reserved for the root",
                    ROOT
                )));
            }
            if index.insert(node.id.clone(), i).is_some() {
                return Err(EditorError::DuplicateNode(node.id.clone()));
            }
        }

        let mut parents = vec![None; nodes.len()];
        let mut children = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            if node.is_root() {
                continue;
            }
            match index.get(&node.parent_id) {
                Some(&p) => {
                    parents[i] = Some(p);
                    children[p].push(i);
                }
                None if validation.is_strict() => {
                    return Err(EditorError::UnknownParent(format!(
                        "'{}' for row '{}'",
                        node.parent_id, node.id
                    )));
                }
                None => {
                    warn_log!(
                        "TreeStore",
                        "build",
                        &format!("parent '{}' not found for row '{}'", node.parent_id, node.id)
                    );
                }
            }
        }

        let records = nodes
            .iter()
            .map(|node| {
                let record = bit::set_flag(bit::new(), bit::OFFSET_EXPANDED, true);
                bit::set_flag(record, bit::OFFSET_VISIBLE, node.is_root())
            })
            .collect();

        let tree = Self {
            nodes,
            index,
            parents,
            children,
            records,
        };

        if let Some(i) = tree.find_cycle() {
            let id = tree.nodes[i].id.clone();
            if validation.is_strict() {
                return Err(EditorError::CyclicParent(id));
            }
            warn_log!("TreeStore", "build", &format!("row '{}' is its own ancestor", id));
        }

        Ok(tree)
    }

    /// Returns a slot on a parent cycle, if any.
    fn find_cycle(&self) -> Option<usize> {
        // 0 = unvisited, 1 = on current path, 2 = done
        let mut state = vec![0u8; self.nodes.len()];
        for start in 0..self.nodes.len() {
            let mut path = Vec::new();
            let mut cursor = Some(start);
            while let Some(i) = cursor {
                match state[i] {
                    1 => return Some(i),
                    2 => break,
                    _ => {}
                }
                state[i] = 1;
                path.push(i);
                cursor = self.parents[i];
            }
            for i in path {
                state[i] = 2;
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Row ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|node| node.id.as_str())
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Parent id, or `None` for top-level rows and orphans.
    pub fn parent(&self, id: &str) -> Option<&str> {
        let i = *self.index.get(id)?;
        self.parents[i].map(|p| self.nodes[p].id.as_str())
    }

    pub fn children(&self, id: &str) -> Vec<&str> {
        match self.index.get(id) {
            Some(&i) => self.children[i].iter().map(|&c| self.nodes[c].id.as_str()).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.flag_of(id, bit::OFFSET_VISIBLE)
    }

    pub fn is_expanded(&self, id: &str) -> Option<bool> {
        self.flag_of(id, bit::OFFSET_EXPANDED)
    }

    pub fn is_filter_checked(&self, id: &str) -> Option<bool> {
        self.flag_of(id, bit::OFFSET_FILTER)
    }

    pub fn match_state(&self, id: &str) -> Option<MatchState> {
        let i = *self.index.get(id)?;
        Some(self.match_state_at(i))
    }

    /// Ids of every visible row, in document order.
    pub fn visible_ids(&self) -> Vec<&str> {
        (0..self.len())
            .filter(|&i| self.flag(i, bit::OFFSET_VISIBLE))
            .map(|i| self.nodes[i].id.as_str())
            .collect()
    }

    /// Ids of every checked row, in document order.
    pub fn checked_ids(&self) -> Vec<&str> {
        (0..self.len())
            .filter(|&i| self.flag(i, bit::OFFSET_FILTER))
            .map(|i| self.nodes[i].id.as_str())
            .collect()
    }

    fn flag_of(&self, id: &str, offset: u32) -> Option<bool> {
        let i = *self.index.get(id)?;
        Some(self.flag(i, offset))
    }

    // --- slot level access for the engines ---

    pub(crate) fn slot(&self, id: &str) -> Result<usize, EditorError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| EditorError::UnknownNode(id.to_string()))
    }

    pub(crate) fn id_at(&self, i: usize) -> &str {
        &self.nodes[i].id
    }

    pub(crate) fn node_at(&self, i: usize) -> &TreeNode {
        &self.nodes[i]
    }

    pub(crate) fn children_at(&self, i: usize) -> &[usize] {
        &self.children[i]
    }

    pub(crate) fn is_root_at(&self, i: usize) -> bool {
        self.nodes[i].is_root()
    }

    pub(crate) fn flag(&self, i: usize, offset: u32) -> bool {
        bit::flag(self.records[i], offset)
    }

    /// Sets a flag and reports whether it changed.
    pub(crate) fn set_flag(&mut self, i: usize, offset: u32, on: bool) -> bool {
        let before = self.records[i];
        self.records[i] = bit::set_flag(before, offset, on);
        before != self.records[i]
    }

    pub(crate) fn match_state_at(&self, i: usize) -> MatchState {
        MatchState::from_bits(bit::get(self.records[i], bit::OFFSET_MATCH, bit::MASK_MATCH))
    }

    pub(crate) fn set_match_state(&mut self, i: usize, state: MatchState) -> bool {
        let before = self.records[i];
        self.records[i] = bit::set(before, bit::OFFSET_MATCH, bit::MASK_MATCH, state.to_bits());
        before != self.records[i]
    }

    /// Descendants of `i` in depth-first preorder, each visited once.
    pub(crate) fn descendants_at(&self, i: usize) -> Vec<usize> {
        let mut seen = vec![false; self.len()];
        seen[i] = true;
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.children[i].iter().rev().copied().collect();
        while let Some(c) = stack.pop() {
            if seen[c] {
                continue;
            }
            seen[c] = true;
            out.push(c);
            stack.extend(self.children[c].iter().rev().copied());
        }
        out
    }

    /// Ancestors of `i`, nearest first, stopping at a row without a
    /// resolvable parent.
    pub(crate) fn ancestors_at(&self, i: usize) -> Vec<usize> {
        let mut seen = vec![false; self.len()];
        seen[i] = true;
        let mut out = Vec::new();
        let mut cursor = self.parents[i];
        while let Some(p) = cursor {
            if seen[p] {
                break;
            }
            seen[p] = true;
            out.push(p);
            cursor = self.parents[p];
        }
        out
    }
}
