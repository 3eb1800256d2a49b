use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ValueKind
// ---------------------------------------------------------------------------

/// Kind tag for parameter values. Everything collected today is a string;
/// the tag exists so numeric or boolean parameters can be added without
/// touching collection or rendering dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[default]
    String,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ParamSpec
// ---------------------------------------------------------------------------

/// Declarative description of a single parameter: what it is called,
/// whether a value must exist before rendering, and the question to ask
/// when it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(default)]
    pub value_kind: ValueKind,
    pub required: bool,
    pub prompt: String,
}

impl ParamSpec {
    /// A required string parameter. All built-in schemas consist of these.
    pub fn required(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_kind: ValueKind::String,
            required: true,
            prompt: prompt.into(),
        }
    }

    pub fn optional(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_kind: ValueKind::String,
            required: false,
            prompt: prompt.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// An ordered list of parameter specs for one resource type.
///
/// Order is meaningful: the collector prompts in schema order. Names are
/// unique; constructors that build schemas from external input must skip
/// duplicates before calling `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    params: Vec<ParamSpec>,
}

impl Schema {
    pub fn new(params: Vec<ParamSpec>) -> Self {
        debug_assert!(
            params
                .iter()
                .enumerate()
                .all(|(i, p)| params[..i].iter().all(|q| q.name != p.name)),
            "schema parameter names must be unique"
        );
        Self { params }
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(vec![
            ParamSpec::required("name", "What name?"),
            ParamSpec::required("location", "What region?"),
            ParamSpec::optional("tag", "Any tag?"),
        ])
    }

    #[test]
    fn preserves_declaration_order() {
        let schema = sample();
        let names: Vec<_> = schema.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "location", "tag"]);
    }

    #[test]
    fn get_finds_by_name() {
        let schema = sample();
        assert!(schema.get("location").is_some());
        assert!(schema.get("missing").is_none());
        assert!(schema.contains("tag"));
    }

    #[test]
    fn required_constructor_sets_flags() {
        let spec = ParamSpec::required("name", "What name?");
        assert!(spec.required);
        assert_eq!(spec.value_kind, ValueKind::String);
        let spec = ParamSpec::optional("tag", "Any tag?");
        assert!(!spec.required);
    }

    #[test]
    fn serializes_as_bare_list() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["name"], "name");
        assert_eq!(json[0]["value_kind"], "string");
    }

    #[test]
    fn yaml_round_trip() {
        let schema = sample();
        let yaml = serde_yaml::to_string(&schema).unwrap();
        let back: Schema = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(schema, back);
    }
}
