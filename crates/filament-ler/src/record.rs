//! Generic YAML records with typed field accessors

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// One LER document (an EEP, a SOP, a SOP step or a signature pattern).
///
/// Records keep the raw YAML mapping so that fields the loader does not know
/// about survive untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Mapping,
}

impl Record {
    pub fn new(fields: Mapping) -> Self {
        Record { fields }
    }

    /// Wrap a YAML value, which must be a mapping.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(fields) => Some(Record { fields }),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Mapping {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// String value of `key`; `None` when absent or not a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// `name`, the display name every LER document carries.
    pub fn name(&self) -> Option<&str> {
        self.str("name")
    }

    /// Sequence value of `key`; empty when absent or not a sequence.
    pub fn list(&self, key: &str) -> &[Value] {
        self.get(key)
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// String entries of the sequence at `key`.
    pub fn str_list(&self, key: &str) -> Vec<&str> {
        self.list(key).iter().filter_map(Value::as_str).collect()
    }

    /// Mapping entries of the sequence at `key`, as records. Other entries
    /// are skipped with a warning.
    pub fn records(&self, key: &str) -> Vec<Record> {
        self.list(key)
            .iter()
            .filter_map(|value| {
                let record = Record::from_value(value.clone());
                if record.is_none() {
                    tracing::warn!("Skipping non-mapping entry in {}: {:?}", key, value);
                }
                record
            })
            .collect()
    }

    /// Record holding only a `name`.
    pub fn named(name: &str) -> Self {
        let mut fields = Mapping::new();
        fields.insert(Value::from("name"), Value::from(name));
        Record { fields }
    }
}
