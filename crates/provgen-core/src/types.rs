use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// ResourceType
// ---------------------------------------------------------------------------

/// Identifier for a kind of infrastructure resource, e.g. "resource group"
/// or "virtual machine".
///
/// Stored normalized: trimmed, lower-cased, runs of whitespace collapsed to
/// single spaces. The set of identifiers is open. A type with no registry
/// entry or rendering rule still flows through the pipeline and surfaces as
/// an explicit error or a placeholder artifact, never as a silent drop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceType {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
