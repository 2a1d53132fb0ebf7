use crate::ports::provided::ManifestError;
use crate::ports::required::{FieldAttributes, HostPage, RowAttributes};
use crate::fn_log;
use serde_yaml_ng::{Mapping, Value};
use std::fs;
use std::path::Path;

/// YAML description of a host page.
///
/// ```yaml
/// rows:
///   - { id: 1, parent: 0 }
///   - { id: 2, parent: 1, address: "0x4001", parameter: P1, test: 3 }
/// fields:
///   - { id: P1, mask: 0xFF, shift: 0, size: 8, address: 5, value: 0 }
/// words:
///   4: "00FF"
/// ```
///
/// Scalars are kept as strings and coerced when the session loads them.
/// Quote hex word values so YAML does not read them as numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    rows: Vec<RowAttributes>,
    fields: Vec<FieldAttributes>,
    words: Vec<(String, String)>,
}

impl Manifest {
    /// # Examples
    ///
    /// ```
    /// use treegrid_engine::{Manifest, HostPage};
    ///
    /// let manifest = Manifest::parse("
    /// rows:
    ///   - { id: r1, parent: 0 }
    /// fields: []
    /// words:
    ///   4: '00FF'
    /// ").unwrap();
    ///
    /// assert_eq!(manifest.rows()[0].id, "r1");
    /// assert_eq!(manifest.words(), vec![("4".to_string(), "00FF".to_string())]);
    /// ```
    pub fn parse(yaml: &str) -> Result<Self, ManifestError> {
        fn_log!("Manifest", "parse");
        let root: Value = serde_yaml_ng::from_str(yaml)
            .map_err(|e| ManifestError::ParseError(format!("YAML parse error: {}", e)))?;

        let root = match root {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => return Err(ManifestError::ParseError("YAML root must be a mapping".to_string())),
        };

        let rows = sequence(&root, "rows")?
            .iter()
            .enumerate()
            .map(|(i, v)| parse_row(i, v))
            .collect::<Result<Vec<_>, _>>()?;

        let fields = sequence(&root, "fields")?
            .iter()
            .enumerate()
            .map(|(i, v)| parse_field(i, v))
            .collect::<Result<Vec<_>, _>>()?;

        let words = match root.get("words") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Mapping(mapping)) => mapping
                .iter()
                .map(|(k, v)| Ok((scalar(k, "words key")?, scalar(v, "words value")?)))
                .collect::<Result<Vec<_>, ManifestError>>()?,
            Some(_) => return Err(ManifestError::ParseError("'words' must be a mapping".to_string())),
        };

        Ok(Self { rows, fields, words })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .map_err(|e| ManifestError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::parse(&yaml)
    }
}

impl HostPage for Manifest {
    fn rows(&self) -> Vec<RowAttributes> {
        self.rows.clone()
    }

    fn fields(&self) -> Vec<FieldAttributes> {
        self.fields.clone()
    }

    fn words(&self) -> Vec<(String, String)> {
        self.words.clone()
    }
}

fn sequence<'a>(root: &'a Mapping, key: &str) -> Result<&'a [Value], ManifestError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Sequence(seq)) => Ok(seq.as_slice()),
        Some(_) => Err(ManifestError::ParseError(format!("'{}' must be a sequence", key))),
    }
}

fn scalar(value: &Value, what: &str) -> Result<String, ManifestError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ManifestError::ParseError(format!("{} must be a scalar", what))),
    }
}

fn required(entry: &Mapping, key: &str, what: &str) -> Result<String, ManifestError> {
    match entry.get(key) {
        Some(v) => scalar(v, &format!("{}.{}", what, key)),
        None => Err(ManifestError::ParseError(format!("{} is missing '{}'", what, key))),
    }
}

fn optional(entry: &Mapping, key: &str, what: &str) -> Result<Option<String>, ManifestError> {
    match entry.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => scalar(v, &format!("{}.{}", what, key)).map(Some),
    }
}

fn entry<'a>(value: &'a Value, what: &str) -> Result<&'a Mapping, ManifestError> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ManifestError::ParseError(format!("{} must be a mapping", what))),
    }
}

fn parse_row(i: usize, value: &Value) -> Result<RowAttributes, ManifestError> {
    let what = format!("rows[{}]", i);
    let row = entry(value, &what)?;
    Ok(RowAttributes {
        id: required(row, "id", &what)?,
        parent: required(row, "parent", &what)?,
        address: optional(row, "address", &what)?,
        parameter: optional(row, "parameter", &what)?,
        test: optional(row, "test", &what)?,
    })
}

fn parse_field(i: usize, value: &Value) -> Result<FieldAttributes, ManifestError> {
    let what = format!("fields[{}]", i);
    let field = entry(value, &what)?;
    Ok(FieldAttributes {
        id: required(field, "id", &what)?,
        mask: required(field, "mask", &what)?,
        shift: optional(field, "shift", &what)?.unwrap_or_else(|| "0".to_string()),
        size: optional(field, "size", &what)?.unwrap_or_else(|| "0".to_string()),
        address: required(field, "address", &what)?,
        value: optional(field, "value", &what)?,
    })
}
