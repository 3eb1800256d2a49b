use super::generate::{resource_pipeline, workflow_pipeline, PipelineFlags};
use crate::output::print_json;
use anyhow::Context;
use intent_agent::{Intent, IntentClient};
use provgen_core::params::ParameterSet;
use provgen_core::types::ResourceType;
use std::path::Path;

const NOT_UNDERSTOOD: &str =
    "I'm not sure how to handle that request yet. Please try describing it differently.";

pub fn run(
    config_path: Option<&Path>,
    text: &str,
    base_url: Option<&str>,
    flags: &PipelineFlags,
    json: bool,
) -> anyhow::Result<()> {
    let (config, config_dir) = super::load_config(config_path)?;

    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY is not set (environment or .env)")?;
    let base_url = base_url.unwrap_or(&config.openai.base_url);
    let client = IntentClient::new(base_url, api_key, config.openai.model.clone())
        .context("failed to build intent client")?;

    // A reply the classifier cannot produce or we cannot parse means the
    // request was not understood; decline instead of failing the process.
    let envelope = match client.classify(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("intent classification failed: {e}");
            return decline(json);
        }
    };

    match envelope.intent {
        Intent::CreateResource => {
            let mut parameters = envelope.parameters;
            let raw_type = parameters.remove("resource_type").unwrap_or_default();
            let resource_type = ResourceType::new(&raw_type);
            if resource_type.is_empty() {
                return decline(json);
            }
            if !json {
                println!("Okay, generating Terraform for a {resource_type}.");
            }
            let seed = ParameterSet::from_extracted(parameters);
            resource_pipeline(&config, &config_dir, &resource_type, seed, flags, json)
        }
        Intent::CreateGithubAction => {
            if !json {
                println!("Okay, generating a GitHub Actions workflow.");
            }
            let seed = ParameterSet::from_extracted(envelope.parameters);
            workflow_pipeline(&config, &config_dir, seed, flags, json)
        }
        Intent::Unknown => decline(json),
    }
}

/// A declined request is a handled outcome: exit 0, and under `--json`
/// stdout stays a single parseable document.
fn decline(json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&serde_json::json!({
            "understood": false,
            "message": NOT_UNDERSTOOD,
        }))
    } else {
        println!("{NOT_UNDERSTOOD}");
        Ok(())
    }
}
