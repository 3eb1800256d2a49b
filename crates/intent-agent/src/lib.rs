//! `intent-agent` — typed blocking client for OpenAI-compatible
//! chat-completions APIs, specialized to one task: classifying free-text
//! requests into structured intents.
//!
//! The model acts strictly as a translator. It maps natural language onto
//! an `{intent, parameters}` envelope; everything done with the result is
//! deterministic code on the caller's side, and a reply that does not parse
//! is treated as "not understood" rather than as a failure.
//!
//! # Architecture
//!
//! ```text
//! user text
//!     │
//!     ▼
//! IntentClient     ← POST {base_url}/chat/completions, response_format
//!     │              json_object, blocking reqwest
//!     ▼
//! ChatResponse     ← typed wire structs; no Value escape hatches
//!     │
//!     ▼
//! IntentEnvelope   ← intent tag + extracted parameter strings
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use intent_agent::{Intent, IntentClient, DEFAULT_BASE_URL};
//!
//! let client = IntentClient::new(DEFAULT_BASE_URL, api_key, "gpt-4o-mini")?;
//! let envelope = client.classify("create an Azure resource group called rg-demo")?;
//! match envelope.intent {
//!     Intent::CreateResource => { /* hand parameters to the pipeline */ }
//!     Intent::CreateGithubAction => { /* workflow path */ }
//!     Intent::Unknown => println!("could not map that request"),
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{classification_prompt, IntentClient, DEFAULT_BASE_URL};
pub use error::IntentAgentError;
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, Choice, Intent, IntentEnvelope, ResponseFormat, Role,
    Usage,
};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, IntentAgentError>;
