use crate::error::{ProvgenError, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One property in a platform schema description. Only the name is read;
/// whatever else the service attaches is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformProperty {
    pub name: String,
}

/// The subset of a schema-description response the pipeline consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlatformSchema {
    #[serde(default)]
    pub properties: Vec<PlatformProperty>,
}

#[derive(Debug, Serialize)]
struct DescribeRequest<'a> {
    #[serde(rename = "resourceType")]
    resource_type: &'a str,
}

// ---------------------------------------------------------------------------
// SchemaService
// ---------------------------------------------------------------------------

/// Blocking client for the external schema-description endpoint.
///
/// One POST per lookup, no retries. The resolver decides what a failure
/// means; this type only reports it.
pub struct SchemaService {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl SchemaService {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        // The pipeline is deliberately unbounded: a slow service stalls the
        // run rather than failing it partway through.
        let http = reqwest::blocking::Client::builder().timeout(None).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service to describe a platform resource-provider tag, e.g.
    /// `Microsoft.Resources/resourceGroups`.
    pub fn describe(&self, resource_type: &str) -> Result<PlatformSchema> {
        let response = self
            .http
            .post(&self.base_url)
            .json(&DescribeRequest { resource_type })
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ProvgenError::SchemaService(format!(
                "{} returned {status}: {}",
                self.base_url,
                excerpt(&body)
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            ProvgenError::SchemaService(format!("unparseable response: {e} in {}", excerpt(&body)))
        })
    }
}

fn excerpt(raw: &str) -> String {
    const LIMIT: usize = 200;
    let trimmed = raw.trim();
    if trimmed.chars().count() <= LIMIT {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(LIMIT).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_reads_property_names() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "resourceType": "Microsoft.Resources/resourceGroups"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"resourceType":"Microsoft.Resources/resourceGroups",
                    "properties":[{"name":"name","type":"string"},{"name":"location","type":"string"}]}"#,
            )
            .create();

        let service = SchemaService::new(server.url()).unwrap();
        let schema = service.describe("Microsoft.Resources/resourceGroups").unwrap();
        let names: Vec<_> = schema.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "location"]);
        mock.assert();
    }

    #[test]
    fn describe_surfaces_http_failures() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body("boom")
            .create();

        let service = SchemaService::new(server.url()).unwrap();
        let err = service.describe("Microsoft.Compute/virtualMachines").unwrap_err();
        match err {
            ProvgenError::SchemaService(msg) => {
                assert!(msg.contains("500"), "unexpected message: {msg}");
                assert!(msg.contains("boom"), "unexpected message: {msg}");
            }
            other => panic!("expected SchemaService error, got {other:?}"),
        }
    }

    #[test]
    fn describe_rejects_malformed_bodies() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body("not json at all")
            .create();

        let service = SchemaService::new(server.url()).unwrap();
        let err = service.describe("Microsoft.Storage/storageAccounts").unwrap_err();
        assert!(matches!(err, ProvgenError::SchemaService(_)), "got {err:?}");
    }

    #[test]
    fn missing_properties_default_to_empty() {
        let schema: PlatformSchema = serde_json::from_str("{}").unwrap();
        assert!(schema.properties.is_empty());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let service = SchemaService::new("http://localhost:8080/mcp/").unwrap();
        assert_eq!(service.base_url(), "http://localhost:8080/mcp");
    }
}
