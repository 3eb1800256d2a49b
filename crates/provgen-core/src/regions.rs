use crate::error::{ProvgenError, Result};
use serde::Deserialize;
use std::process::Command;

// ---------------------------------------------------------------------------
// RegionCatalog
// ---------------------------------------------------------------------------

/// The list of Azure region identifiers used to validate `location`
/// answers.
///
/// An empty catalog means "validation unavailable", never "no regions
/// exist": the collector downgrades validation to a warning instead of
/// rejecting values it cannot check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: Vec<String>,
}

impl RegionCatalog {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn from_regions(regions: Vec<String>) -> Self {
        Self { regions }
    }

    /// Fetch the catalog by shelling out to the Azure MCP extension.
    /// Requires `npx` on PATH; the call blocks until the tool finishes.
    pub fn fetch() -> Result<Self> {
        let npx = which::which("npx").map_err(|_| ProvgenError::MissingBinary("npx".into()))?;
        let output = Command::new(npx)
            .args([
                "-y",
                "@azure/mcp@latest",
                "extension",
                "az",
                "--command",
                "account list-locations",
            ])
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProvgenError::CommandFailed {
                program: "npx @azure/mcp".into(),
                detail: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Self::from_regions(parse_locations(&stdout)?))
    }

    pub fn is_available(&self) -> bool {
        !self.regions.is_empty()
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// `None` when validation is unavailable, otherwise whether the
    /// candidate is a known region.
    pub fn validate(&self, candidate: &str) -> Option<bool> {
        if self.regions.is_empty() {
            None
        } else {
            Some(self.regions.iter().any(|r| r == candidate))
        }
    }

    /// First few region names, for prompt hints.
    pub fn examples(&self, limit: usize) -> String {
        self.regions
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ---------------------------------------------------------------------------
// Output parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LocationList {
    #[serde(default)]
    results: Vec<LocationEntry>,
}

#[derive(Debug, Deserialize)]
struct LocationEntry {
    #[serde(default)]
    name: Option<String>,
}

/// Extract region names from MCP tool output.
///
/// The wrapper prints banner lines around the JSON document, so parsing
/// starts at the first `{` and ends at the last `}` before being handed to
/// serde.
pub fn parse_locations(raw: &str) -> Result<Vec<String>> {
    let json = json_object_span(raw).ok_or_else(|| ProvgenError::CommandFailed {
        program: "npx @azure/mcp".into(),
        detail: "no JSON object in output".into(),
    })?;
    let list: LocationList = serde_json::from_str(json)?;
    Ok(list.results.into_iter().filter_map(|loc| loc.name).collect())
}

fn json_object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}
