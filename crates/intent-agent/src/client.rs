use crate::error::IntentAgentError;
use crate::types::{ChatMessage, ChatRequest, ChatResponse, IntentEnvelope, ResponseFormat};
use crate::Result;

/// Public OpenAI endpoint. Overridable for gateways and tests.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that parses user requests into \
     structured JSON. Identify the intent and extract parameters.";

// ─── IntentClient ─────────────────────────────────────────────────────────

/// Blocking client for one job: turn a free-text request into an
/// [`IntentEnvelope`] via a chat-completions call.
pub struct IntentClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl IntentClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        // No request timeout: the surrounding pipeline is blocking end to
        // end and treats a hung call as a hung run.
        let http = reqwest::blocking::Client::builder().timeout(None).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Classify a free-text request.
    ///
    /// The reply is parsed strictly against the envelope shape. Errors here
    /// mean "the request was not understood", and callers are expected to
    /// decline gracefully rather than abort the process.
    pub fn classify(&self, user_input: &str) -> Result<IntentEnvelope> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(classification_prompt(user_input)),
            ],
            response_format: Some(ResponseFormat::json_object()),
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(IntentAgentError::Api {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|source| IntentAgentError::Parse { payload: excerpt(&body), source })?;
        let content = parsed.first_content().ok_or(IntentAgentError::MissingContent)?;

        if let Some(usage) = parsed.usage {
            tracing::debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "classifier replied"
            );
        }

        serde_json::from_str(content)
            .map_err(|source| IntentAgentError::Parse { payload: excerpt(content), source })
    }
}

// ─── Prompt construction ──────────────────────────────────────────────────

/// Instruction block sent with every classification, with one worked
/// example per intent so the model returns stable field names.
pub fn classification_prompt(user_input: &str) -> String {
    format!(
        r#"Analyze the following user request to identify the intent and extract relevant parameters.
The intent must be 'create_resource' or 'create_github_action'.

For 'create_resource', parameters should include 'resource_type' (e.g., 'resource group', 'virtual machine', 'storage account', 'aks cluster') plus any other parameters mentioned for the resource.

For 'create_github_action', parameters should include 'action_name', 'trigger' (e.g., 'push', 'pull_request') and 'workflow_description' (a brief description of what the action should do).

Respond in JSON format. If a parameter is not found, omit it.

Example for 'create_resource' (resource group):
{{"intent": "create_resource", "parameters": {{"resource_type": "resource group", "name": "my-rg", "location": "eastus"}}}}

Example for 'create_github_action':
{{"intent": "create_github_action", "parameters": {{"action_name": "deploy-app", "trigger": "push", "workflow_description": "Build and deploy a Node.js application to Azure App Service."}}}}

User Request: {user_input}"#
    )
}

fn excerpt(raw: &str) -> String {
    const LIMIT: usize = 400;
    let trimmed = raw.trim();
    if trimmed.chars().count() <= LIMIT {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(LIMIT).collect();
        format!("{head}...")
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Intent;

    fn envelope_reply(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content},
                         "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 50, "completion_tokens": 20, "total_tokens": 70}
        })
        .to_string()
    }

    #[test]
    fn classify_parses_a_resource_intent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o-mini",
                "response_format": {"type": "json_object"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope_reply(
                r#"{"intent": "create_resource", "parameters": {"resource_type": "resource group", "name": "rg-demo", "location": "eastus"}}"#,
            ))
            .create();

        let client = IntentClient::new(server.url(), "test-key", "gpt-4o-mini").unwrap();
        let envelope = client.classify("create a resource group named rg-demo in eastus").unwrap();

        assert_eq!(envelope.intent, Intent::CreateResource);
        assert_eq!(envelope.parameters["name"], "rg-demo");
        mock.assert();
    }

    #[test]
    fn classify_folds_unknown_intents() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(envelope_reply(r#"{"intent": "order_pizza", "parameters": {}}"#))
            .create();

        let client = IntentClient::new(server.url(), "test-key", "gpt-4o-mini").unwrap();
        let envelope = client.classify("order me a pizza").unwrap();
        assert_eq!(envelope.intent, Intent::Unknown);
    }

    #[test]
    fn classify_reports_api_errors_with_status() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
            .create();

        let client = IntentClient::new(server.url(), "bad-key", "gpt-4o-mini").unwrap();
        let err = client.classify("anything").unwrap_err();
        match err {
            IntentAgentError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Incorrect API key"), "body: {body}");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn classify_rejects_non_json_content() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(envelope_reply("sorry, I cannot help with that"))
            .create();

        let client = IntentClient::new(server.url(), "test-key", "gpt-4o-mini").unwrap();
        let err = client.classify("gibberish").unwrap_err();
        assert!(matches!(err, IntentAgentError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn classify_requires_message_content() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create();

        let client = IntentClient::new(server.url(), "test-key", "gpt-4o-mini").unwrap();
        let err = client.classify("anything").unwrap_err();
        assert!(matches!(err, IntentAgentError::MissingContent), "got {err:?}");
    }

    #[test]
    fn prompt_carries_examples_and_the_request() {
        let prompt = classification_prompt("create a vm called web01");
        assert!(prompt.contains(r#"{"intent": "create_resource""#));
        assert!(prompt.contains(r#"{"intent": "create_github_action""#));
        assert!(prompt.ends_with("User Request: create a vm called web01"));
    }

    #[test]
    fn excerpt_caps_long_payloads() {
        let long = "x".repeat(500);
        let short = excerpt(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 403);
    }
}
