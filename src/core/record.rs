use serde::{Deserialize, Serialize};

/// A generic key/value metadata field attached to a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub key: String,
    pub value: String,
}

impl Extra {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Reference to a catalog group. The id holds a scheme URI; whether a
/// group entity with that id exists is the host's invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: String,
}

impl GroupRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The host's partially-built dataset record: extras plus group
/// references. Constructed by the host, mutated here, handed back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    #[serde(default)]
    pub extras: Vec<Extra>,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
}

impl DatasetRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.push(Extra::new(key, value));
        self
    }

    /// Value of the first extra with the given key.
    pub fn extra_value(&self, key: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|extra| extra.key == key)
            .map(|extra| extra.value.as_str())
    }

    /// Overwrite the value of an existing extra in place. Returns false
    /// when no extra with the key exists; absent entries are never
    /// created.
    pub fn set_extra_value(&mut self, key: &str, value: String) -> bool {
        match self.extras.iter_mut().find(|extra| extra.key == key) {
            Some(extra) => {
                extra.value = value;
                true
            }
            None => false,
        }
    }
}
