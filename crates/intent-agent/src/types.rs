use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ─── Chat request ─────────────────────────────────────────────────────────

/// Chat-completions request body, OpenAI wire format.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// `{"type": "json_object"}` — constrains the model to emit one JSON
/// document, which is what makes strict parsing of the reply viable.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: ResponseFormatKind,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatKind {
    JsonObject,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self { kind: ResponseFormatKind::JsonObject }
    }
}

// ─── Chat response ────────────────────────────────────────────────────────

/// The subset of a chat-completions response this crate reads. Unknown
/// fields are ignored rather than round-tripped.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Content of the first choice, if the API returned one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Choice {
    pub message: AssistantReply,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

// ─── Intent envelope ──────────────────────────────────────────────────────

/// The two requests the classifier is trusted to recognize. Any other tag
/// folds to `Unknown`: the model's reply is input, not authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    CreateResource,
    CreateGithubAction,
    Unknown,
}

impl Intent {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "create_resource" => Intent::CreateResource,
            "create_github_action" => Intent::CreateGithubAction,
            _ => Intent::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::CreateResource => "create_resource",
            Intent::CreateGithubAction => "create_github_action",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Intent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Intent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Intent::parse(&raw))
    }
}

/// The classified form of one user request: an intent tag plus whatever
/// parameter strings the model extracted. Parameters are raw material for
/// the caller's collection step, nothing here is validated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IntentEnvelope {
    pub intent: Intent,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl IntentEnvelope {
    pub fn unknown() -> Self {
        Self { intent: Intent::Unknown, parameters: BTreeMap::new() }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_tags_round_trip() {
        assert_eq!(Intent::parse("create_resource"), Intent::CreateResource);
        assert_eq!(Intent::parse("create_github_action"), Intent::CreateGithubAction);
        assert_eq!(Intent::CreateResource.as_str(), "create_resource");
    }

    #[test]
    fn unknown_tags_fold_instead_of_failing() {
        let envelope: IntentEnvelope =
            serde_json::from_str(r#"{"intent": "dance_party", "parameters": {}}"#).unwrap();
        assert_eq!(envelope.intent, Intent::Unknown);
    }

    #[test]
    fn missing_parameters_default_to_empty() {
        let envelope: IntentEnvelope =
            serde_json::from_str(r#"{"intent": "create_resource"}"#).unwrap();
        assert_eq!(envelope.intent, Intent::CreateResource);
        assert!(envelope.parameters.is_empty());
    }

    #[test]
    fn envelope_parses_the_documented_shape() {
        let raw = r#"{"intent": "create_resource",
                      "parameters": {"resource_type": "resource group",
                                     "name": "my-rg", "location": "eastus"}}"#;
        let envelope: IntentEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.intent, Intent::CreateResource);
        assert_eq!(envelope.parameters["resource_type"], "resource group");
        assert_eq!(envelope.parameters.len(), 3);
    }

    #[test]
    fn request_omits_absent_response_format() {
        let request = ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::user("hi")],
            response_format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("response_format").is_none());

        let request = ChatRequest { response_format: Some(ResponseFormat::json_object()), ..request };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn response_surfaces_first_content() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "{}"},
                                   "finish_reason": "stop"}],
                      "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_content(), Some("{}"));
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn empty_response_surfaces_nothing() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_content().is_none());
    }
}
