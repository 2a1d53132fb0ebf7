use crate::common::bit;
use crate::compare::{self, MatchResult};
use crate::filter::FilterPropagationEngine;
use crate::load::Load;
use crate::packer::{BitfieldPacker, FieldDescriptor, Packed};
use crate::ports::provided::{Editor, EditorError};
use crate::ports::required::HostPage;
use crate::store::RegisterWordStore;
use crate::tree::{TreeNode, TreeStore};
use crate::visibility::VisibilityEngine;
use crate::fn_log;
use std::collections::HashMap;

/// How much the session checks the host-supplied structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    /// Orphan rows stay hidden, overflowing masks are truncated to the
    /// word, overlapping fields are not checked.
    #[default]
    Permissive,
    /// Orphans, parent cycles, overflowing masks and overlapping fields
    /// are rejected.
    Strict,
}

impl Validation {
    pub fn is_strict(self) -> bool {
        self == Validation::Strict
    }
}

/// One editor instance: the row tree, the register words and the fields.
/// The rendering layer holds no authoritative copy of any of them.
pub struct EditorSession {
    tree: TreeStore,
    words: RegisterWordStore,
    fields: HashMap<String, FieldDescriptor>,
    field_order: Vec<String>,
    packer: BitfieldPacker,
    validation: Validation,
    filter_mode: bool,
}

impl EditorSession {
    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::{EditorSession, Validation};
    ///
    /// let session = EditorSession::new().with_validation(Validation::Strict);
    /// assert!(session.tree().is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            tree: TreeStore::new(),
            words: RegisterWordStore::new(),
            fields: HashMap::new(),
            field_order: Vec::new(),
            packer: BitfieldPacker::default(),
            validation: Validation::default(),
            filter_mode: false,
        }
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self.packer = BitfieldPacker::new(validation);
        self
    }

    pub fn validation(&self) -> Validation {
        self.validation
    }

    /// Replaces the session state with what the host page supplies.
    /// On error the previous state is kept.
    pub fn load(&mut self, host: &dyn HostPage) -> Result<(), EditorError> {
        fn_log!("EditorSession", "load");
        let load = Load::new(host);
        let nodes = load.rows()?;
        let fields = load.fields()?;
        let words = load.words()?;
        self.load_records(nodes, fields, words)
    }

    /// Replaces the session state with already typed records.
    pub fn load_records(
        &mut self,
        nodes: Vec<TreeNode>,
        fields: Vec<FieldDescriptor>,
        words: RegisterWordStore,
    ) -> Result<(), EditorError> {
        let tree = TreeStore::build(nodes, self.validation)?;

        let mut field_map = HashMap::with_capacity(fields.len());
        let mut field_order = Vec::with_capacity(fields.len());
        for field in fields {
            if field_map.contains_key(&field.id) {
                return Err(EditorError::DuplicateField(field.id));
            }
            field_order.push(field.id.clone());
            field_map.insert(field.id.clone(), field);
        }

        if self.validation.is_strict() {
            Self::check_layout(&field_order, &field_map)?;
        }

        self.tree = tree;
        self.words = words;
        self.fields = field_map;
        self.field_order = field_order;
        self.filter_mode = false;
        Ok(())
    }

    /// Every relocated mask inside its word, no two masks sharing a bit.
    fn check_layout(
        order: &[String],
        fields: &HashMap<String, FieldDescriptor>,
    ) -> Result<(), EditorError> {
        let mut claimed: HashMap<u32, (u32, &str)> = HashMap::new();
        for id in order {
            let field = &fields[id];
            let (address, mask) = field.placement();
            if !bit::fits_word(mask) {
                return Err(EditorError::FieldOverflow(format!(
                    "field '{}' mask {:#X} leaves the word at {}",
                    id, mask, address
                )));
            }
            let entry = claimed.entry(address).or_insert((0, id.as_str()));
            if entry.0 & mask != 0 {
                return Err(EditorError::OverlappingFields(format!(
                    "'{}' overlaps '{}' in the word at {}",
                    id, entry.1, address
                )));
            }
            entry.0 |= mask;
            entry.1 = id.as_str();
        }
        Ok(())
    }

    pub fn tree(&self) -> &TreeStore {
        &self.tree
    }

    pub fn words(&self) -> &RegisterWordStore {
        &self.words
    }

    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.get(id)
    }

    /// Fields in host order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.field_order.iter().filter_map(|id| self.fields.get(id))
    }

    /// Hex readout of the word containing `address`.
    pub fn word_hex(&self, address: u32) -> String {
        self.words.word_hex(address)
    }

    /// Packs an already numeric value.
    pub fn apply_int(&mut self, field_id: &str, value: i64) -> Result<Packed, EditorError> {
        fn_log!("EditorSession", "apply_int", field_id);
        let field = self
            .fields
            .get_mut(field_id)
            .ok_or_else(|| EditorError::UnknownField(field_id.to_string()))?;
        self.packer.apply_value(field, value, &mut self.words)
    }

    /// Applies every field's host supplied initial value, in host order.
    pub fn apply_initial_values(&mut self) -> Result<Vec<Packed>, EditorError> {
        let pending: Vec<(String, i64)> = self
            .fields()
            .filter_map(|field| field.initial.map(|v| (field.id.clone(), v)))
            .collect();
        pending
            .into_iter()
            .map(|(id, value)| self.apply_int(&id, value))
            .collect()
    }

    pub fn expand_all(&mut self) -> Vec<String> {
        VisibilityEngine::expand_all(&mut self.tree)
    }

    pub fn collapse_all(&mut self) -> Vec<String> {
        VisibilityEngine::collapse_all(&mut self.tree)
    }

    pub fn select_by_address(&mut self, query: &str) -> Vec<String> {
        FilterPropagationEngine::select_by_address(&mut self.tree, query)
    }

    pub fn filter_mode(&self) -> bool {
        self.filter_mode
    }

    pub fn set_filter_mode(&mut self, on: bool) {
        fn_log!("EditorSession", "set_filter_mode", if on { "on" } else { "off" });
        self.filter_mode = on;
    }

    pub fn toggle_filter_mode(&mut self) -> bool {
        self.set_filter_mode(!self.filter_mode);
        self.filter_mode
    }

    pub fn is_displayed(&self, id: &str) -> Result<bool, EditorError> {
        FilterPropagationEngine::is_displayed(&self.tree, id, self.filter_mode)
    }

    /// Rows the rendering layer shows, in document order.
    pub fn displayed_rows(&self) -> Vec<String> {
        FilterPropagationEngine::displayed(&self.tree, self.filter_mode)
    }

    pub fn refresh_test_tree(&mut self) -> Vec<String> {
        compare::refresh_test_tree(&mut self.tree, &self.fields)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor for EditorSession {
    fn toggle_expand(&mut self, id: &str) -> Result<Vec<String>, EditorError> {
        VisibilityEngine::toggle_expand(&mut self.tree, id)
    }

    fn select_and_propagate(&mut self, id: &str) -> Result<Vec<String>, EditorError> {
        FilterPropagationEngine::select_and_propagate(&mut self.tree, id)
    }

    fn clear_all(&mut self) -> Vec<String> {
        FilterPropagationEngine::clear_all(&mut self.tree)
    }

    fn invert_selection(&mut self) -> Vec<String> {
        FilterPropagationEngine::invert_selection(&mut self.tree)
    }

    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::{Editor, EditorSession, FieldDescriptor, RegisterWordStore};
    ///
    /// let mut words = RegisterWordStore::new();
    /// words.write(4, 0x0034);
    ///
    /// let mut session = EditorSession::new();
    /// session.load_records(vec![], vec![FieldDescriptor::new("P1", 0xFF, 0, 8, 5)], words).unwrap();
    ///
    /// let packed = session.apply_value("P1", "0x12").unwrap();
    /// assert_eq!(packed.address, 4);
    /// assert_eq!(packed.word_hex(), "1234");
    /// assert!(session.apply_value("P1", "twelve").is_err());
    /// assert_eq!(session.word_hex(4), "1234");
    /// ```
    fn apply_value(&mut self, field_id: &str, value: &str) -> Result<Packed, EditorError> {
        let field = self
            .fields
            .get_mut(field_id)
            .ok_or_else(|| EditorError::UnknownField(field_id.to_string()))?;
        self.packer.apply_str(field, value, &mut self.words)
    }

    fn compare_to_expected(&self, field_id: &str, expected: i64) -> Result<MatchResult, EditorError> {
        let field = self
            .fields
            .get(field_id)
            .ok_or_else(|| EditorError::UnknownField(field_id.to_string()))?;
        Ok(compare::compare_to_expected(field, expected))
    }

    fn propagate_match_state(&mut self, id: &str, matched: bool) -> Result<Vec<String>, EditorError> {
        compare::propagate_match_state(&mut self.tree, id, matched)
    }
}
