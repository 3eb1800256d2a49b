use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// ParamValue
// ---------------------------------------------------------------------------

/// A collected parameter value, tagged by kind.
///
/// Only strings exist today. The tagged representation keeps serialized
/// output stable when other kinds arrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    String(String),
}

impl ParamValue {
    pub fn string(value: impl Into<String>) -> Self {
        ParamValue::String(value.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParamValue::String(s) => s,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// ParameterSet
// ---------------------------------------------------------------------------

/// The working set of parameter values for one generation run.
///
/// Seeded from whatever the classifier extracted, then filled by the
/// collector until every required spec in the active schema is covered.
/// Owned by a single run and discarded with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from extracted name/value strings. Blank values are dropped so
    /// they count as missing during collection instead of rendering as
    /// empty quotes.
    pub fn from_extracted<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            set.insert(name, ParamValue::String(value));
        }
        set
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).map(ParamValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
