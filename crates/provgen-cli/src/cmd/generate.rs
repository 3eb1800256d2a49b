use crate::output::print_json;
use crate::prompt::StdinPrompter;
use anyhow::Context;
use clap::{Args, Subcommand};
use provgen_core::collect::{self, NoInput, PromptSource};
use provgen_core::config::Config;
use provgen_core::generate::{self, Generation};
use provgen_core::params::ParameterSet;
use provgen_core::publish::{self, PublishOptions};
use provgen_core::regions::RegionCatalog;
use provgen_core::registry::SchemaRegistry;
use provgen_core::resolver::SchemaResolver;
use provgen_core::service::SchemaService;
use provgen_core::types::ResourceType;
use std::path::Path;

#[derive(Args)]
pub struct PipelineFlags {
    /// Print the artifact instead of publishing it
    #[arg(long)]
    pub dry_run: bool,

    /// Abort instead of prompting for missing parameters
    #[arg(long)]
    pub no_input: bool,

    /// Push the branch but skip opening a pull request
    #[arg(long)]
    pub no_pr: bool,
}

#[derive(Subcommand)]
pub enum GenerateSubcommand {
    /// Generate Terraform for a resource type
    Resource {
        /// e.g. "resource group", "virtual machine", "storage account"
        resource_type: String,

        /// Seed values as NAME=VALUE; missing required ones are prompted
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        #[command(flatten)]
        flags: PipelineFlags,
    },

    /// Generate a GitHub Actions workflow skeleton
    Workflow {
        /// Workflow name, e.g. "deploy app"
        #[arg(long)]
        name: Option<String>,

        /// Trigger event, e.g. "push" or "pull_request"
        #[arg(long)]
        trigger: Option<String>,

        /// One-line description echoed into the workflow
        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        flags: PipelineFlags,
    },
}

pub fn run(
    config_path: Option<&Path>,
    subcommand: GenerateSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let (config, config_dir) = super::load_config(config_path)?;
    match subcommand {
        GenerateSubcommand::Resource { resource_type, params, flags } => {
            let seed = parse_seed(&params)?;
            let ty = ResourceType::new(&resource_type);
            resource_pipeline(&config, &config_dir, &ty, seed, &flags, json)
        }
        GenerateSubcommand::Workflow { name, trigger, description, flags } => {
            let seed = workflow_seed(name, trigger, description);
            workflow_pipeline(&config, &config_dir, seed, &flags, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Shared pipeline plumbing (also driven by `provgen run`)
// ---------------------------------------------------------------------------

pub(crate) fn resource_pipeline(
    config: &Config,
    config_dir: &Path,
    resource_type: &ResourceType,
    seed: ParameterSet,
    flags: &PipelineFlags,
    json: bool,
) -> anyhow::Result<()> {
    let registry = SchemaRegistry::builtin();
    let resolver = match &config.schema_service {
        Some(service) => {
            SchemaResolver::with_service(&registry, SchemaService::new(&service.url)?)
        }
        None => SchemaResolver::new(&registry),
    };

    // The catalog lookup shells out to npx, so only pay for it when a
    // location answer can actually be prompted. Seeded values are trusted
    // and never-prompt runs never validate.
    let regions = if flags.no_input || seed.contains(collect::LOCATION_PARAM) {
        RegionCatalog::unavailable()
    } else {
        region_catalog()
    };
    let mut prompter = prompter(flags);

    let generation = generate::resource(
        &resolver,
        &regions,
        prompter.as_mut(),
        resource_type,
        seed,
    )
    .with_context(|| format!("failed to generate '{resource_type}'"))?;

    finish(config, config_dir, generation, flags, json)
}

pub(crate) fn workflow_pipeline(
    config: &Config,
    config_dir: &Path,
    seed: ParameterSet,
    flags: &PipelineFlags,
    json: bool,
) -> anyhow::Result<()> {
    let mut prompter = prompter(flags);
    let generation = generate::workflow(prompter.as_mut(), seed)
        .context("failed to generate workflow")?;
    finish(config, config_dir, generation, flags, json)
}

fn finish(
    config: &Config,
    config_dir: &Path,
    generation: Generation,
    flags: &PipelineFlags,
    json: bool,
) -> anyhow::Result<()> {
    for warning in &generation.warnings {
        tracing::warn!(param = %warning.param, "{}", warning.message);
    }
    if !generation.dropped.is_empty() {
        tracing::warn!(
            properties = %generation.dropped.join(", "),
            "schema translation dropped unrecognized properties"
        );
    }
    if generation.unsupported {
        tracing::warn!("no rendering rule for this resource type; wrote a placeholder instead");
    }

    if flags.dry_run {
        if json {
            print_json(&generation.artifact)?;
        } else {
            println!("branch: {}", generation.artifact.branch_name);
            println!("path:   {}", generation.artifact.target_path);
            println!();
            print!("{}", generation.artifact.content);
        }
        return Ok(());
    }

    let repo_dir = config.repo.resolved_path(config_dir);
    let options = PublishOptions { open_pr: !flags.no_pr };
    let report = publish::publish(&config.repo, &repo_dir, &generation.artifact, &options)
        .context("publication failed")?;

    if json {
        print_json(&report)?;
    } else {
        println!("Pushed branch '{}' updating {}", report.branch, report.target_path);
        if report.pr_created {
            println!("Pull request created.");
        } else {
            println!("Pull request skipped (--no-pr).");
        }
    }
    Ok(())
}

fn prompter(flags: &PipelineFlags) -> Box<dyn PromptSource> {
    if flags.no_input {
        Box::new(NoInput)
    } else {
        Box::new(StdinPrompter)
    }
}

fn region_catalog() -> RegionCatalog {
    match RegionCatalog::fetch() {
        Ok(catalog) => {
            if !catalog.is_available() {
                tracing::warn!("region catalog is empty; location validation disabled");
            }
            catalog
        }
        Err(e) => {
            tracing::warn!("region catalog unavailable: {e}");
            RegionCatalog::unavailable()
        }
    }
}

fn parse_seed(args: &[String]) -> anyhow::Result<ParameterSet> {
    let mut pairs = Vec::with_capacity(args.len());
    for arg in args {
        let Some((name, value)) = arg.split_once('=') else {
            anyhow::bail!("invalid --param '{arg}': expected NAME=VALUE");
        };
        pairs.push((name.trim().to_string(), value.to_string()));
    }
    Ok(ParameterSet::from_extracted(pairs))
}

fn workflow_seed(
    name: Option<String>,
    trigger: Option<String>,
    description: Option<String>,
) -> ParameterSet {
    let mut pairs = Vec::new();
    if let Some(name) = name {
        pairs.push(("action_name".to_string(), name));
    }
    if let Some(trigger) = trigger {
        pairs.push(("trigger".to_string(), trigger));
    }
    if let Some(description) = description {
        pairs.push(("workflow_description".to_string(), description));
    }
    ParameterSet::from_extracted(pairs)
}
