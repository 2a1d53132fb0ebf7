use crate::packer::Packed;
use crate::compare::MatchResult;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    Empty,
    InvalidDigit(String),
    Overflow(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Empty              => write!(f, "FormatError: empty hex string"),
            FormatError::InvalidDigit(msg)  => write!(f, "FormatError: invalid digit {}", msg),
            FormatError::Overflow(msg)      => write!(f, "FormatError: '{}' does not fit 32 bits", msg),
        }
    }
}

impl std::error::Error for FormatError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    Empty,
    NotNumeric(String),
    OutOfRange(String),
}

impl std::fmt::Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueError::Empty            => write!(f, "ValueError: empty value"),
            ValueError::NotNumeric(msg)  => write!(f, "ValueError: '{}' is not numeric", msg),
            ValueError::OutOfRange(msg)  => write!(f, "ValueError: '{}' is out of range", msg),
        }
    }
}

impl std::error::Error for ValueError {}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    UnknownNode(String),
    UnknownField(String),
    DuplicateNode(String),
    DuplicateField(String),
    UnknownParent(String),
    CyclicParent(String),
    FieldOverflow(String),
    OverlappingFields(String),
    Format(FormatError),
    Value(ValueError),
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorError::UnknownNode(msg)       => write!(f, "UnknownNode: {}", msg),
            EditorError::UnknownField(msg)      => write!(f, "UnknownField: {}", msg),
            EditorError::DuplicateNode(msg)     => write!(f, "DuplicateNode: {}", msg),
            EditorError::DuplicateField(msg)    => write!(f, "DuplicateField: {}", msg),
            EditorError::UnknownParent(msg)     => write!(f, "UnknownParent: {}", msg),
            EditorError::CyclicParent(msg)      => write!(f, "CyclicParent: {}", msg),
            EditorError::FieldOverflow(msg)     => write!(f, "FieldOverflow: {}", msg),
            EditorError::OverlappingFields(msg) => write!(f, "OverlappingFields: {}", msg),
            EditorError::Format(e)              => write!(f, "{}", e),
            EditorError::Value(e)               => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::Format(e) => Some(e),
            EditorError::Value(e)  => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for EditorError {
    fn from(e: FormatError) -> Self {
        EditorError::Format(e)
    }
}

impl From<ValueError> for EditorError {
    fn from(e: ValueError) -> Self {
        EditorError::Value(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum ManifestError {
    ReadError(String),
    ParseError(String),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::ReadError(msg)  => write!(f, "ReadError: {}", msg),
            ManifestError::ParseError(msg) => write!(f, "ParseError: {}", msg),
        }
    }
}

impl std::error::Error for ManifestError {}

/// The primary interface for treegrid-engine. Every call runs to completion
/// and reports what the rendering layer has to redraw.
pub trait Editor {
    /// Flips the expanded flag of `id` and cascades visibility.
    /// Returns the ids whose visible flag changed.
    fn toggle_expand(&mut self, id: &str) -> Result<Vec<String>, EditorError>;

    /// Checks `id` and every ancestor. Returns the ids newly checked.
    fn select_and_propagate(&mut self, id: &str) -> Result<Vec<String>, EditorError>;

    /// Unchecks every node. Returns the ids that were checked.
    fn clear_all(&mut self) -> Vec<String>;

    /// Flips every filter checkbox. Returns every id.
    fn invert_selection(&mut self) -> Vec<String>;

    /// Coerces `value` to an integer and packs it into the field's word.
    fn apply_value(&mut self, field_id: &str, value: &str) -> Result<Packed, EditorError>;

    /// Compares the field's last applied value to `expected`.
    fn compare_to_expected(&self, field_id: &str, expected: i64) -> Result<MatchResult, EditorError>;

    /// Classifies `id` and its subtree as active or inactive.
    /// Returns the ids whose classification changed.
    fn propagate_match_state(&mut self, id: &str, matched: bool) -> Result<Vec<String>, EditorError>;
}
