use crate::artifact::GeneratedArtifact;
use crate::collect::{self, Collected, PromptSource, ValidationWarning};
use crate::error::Result;
use crate::params::ParameterSet;
use crate::regions::RegionCatalog;
use crate::render;
use crate::resolver::SchemaResolver;
use crate::types::ResourceType;
use crate::workflow::{self, WorkflowRequest};

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Outcome of one generation run: the artifact plus everything worth
/// telling the user that did not stop the run.
#[derive(Debug, Clone)]
pub struct Generation {
    pub artifact: GeneratedArtifact,
    pub warnings: Vec<ValidationWarning>,
    /// True when the type resolved a schema but has no rendering rule; the
    /// artifact then carries the placeholder marker.
    pub unsupported: bool,
    /// Property names dropped by platform-schema translation. Empty for
    /// static resolutions.
    pub dropped: Vec<String>,
}

/// Run the resource pipeline: resolve a schema, collect parameters, render
/// Terraform, package the artifact.
///
/// Stage order is fixed and each stage sees only its own inputs; a failure
/// in any stage aborts the run with nothing written anywhere.
pub fn resource(
    resolver: &SchemaResolver,
    regions: &RegionCatalog,
    prompter: &mut dyn PromptSource,
    resource_type: &ResourceType,
    seed: ParameterSet,
) -> Result<Generation> {
    let resolved = resolver.resolve(resource_type)?;
    let Collected { params, warnings } =
        collect::collect(&resolved.schema, seed, regions, prompter)?;

    let unsupported = !render::supports(resource_type);
    let content = render::render(resource_type, &params)?;
    let primary_name = params.get_str("name").unwrap_or("");
    let artifact = GeneratedArtifact::terraform(resource_type, primary_name, content);

    Ok(Generation { artifact, warnings, unsupported, dropped: resolved.dropped })
}

/// Run the workflow pipeline: collect the three workflow fields, render the
/// skeleton, package the artifact.
pub fn workflow(prompter: &mut dyn PromptSource, seed: ParameterSet) -> Result<Generation> {
    // No region-constrained fields here, so validation never engages.
    let regions = RegionCatalog::unavailable();
    let schema = workflow::schema();
    let Collected { params, warnings } = collect::collect(&schema, seed, &regions, prompter)?;

    let request = WorkflowRequest::from_params(&params)?;
    let content = request.render();
    let artifact = GeneratedArtifact::workflow(&request, content);

    Ok(Generation { artifact, warnings, unsupported: false, dropped: Vec::new() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvgenError;
    use crate::registry::SchemaRegistry;
    use crate::schema::{ParamSpec, Schema};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Option<String>>);

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Self(answers.iter().map(|a| Some(a.to_string())).collect())
        }
    }

    impl PromptSource for Scripted {
        fn prompt(&mut self, _spec: &ParamSpec) -> Result<Option<String>> {
            Ok(self.0.pop_front().unwrap_or(None))
        }
    }

    fn catalog() -> RegionCatalog {
        RegionCatalog::from_regions(vec!["eastus".into(), "westus2".into()])
    }

    #[test]
    fn resource_pipeline_renders_and_brands_the_artifact() {
        let registry = SchemaRegistry::builtin();
        let resolver = SchemaResolver::new(&registry);
        let seed = ParameterSet::from_extracted(vec![("name", "rg-demo")]);
        let mut prompter = Scripted::new(&["eastus"]);

        let generation = resource(
            &resolver,
            &catalog(),
            &mut prompter,
            &ResourceType::new("resource group"),
            seed,
        )
        .unwrap();

        assert_eq!(generation.artifact.branch_name, "add-resource-group-rg-demo");
        assert_eq!(generation.artifact.target_path, "main.tf");
        assert!(generation.artifact.content.contains(r#"location = "eastus""#));
        assert!(!generation.unsupported);
        assert!(generation.dropped.is_empty());
        assert!(generation.artifact.validate().is_ok());
    }

    #[test]
    fn resource_pipeline_fails_closed_on_unknown_types() {
        let registry = SchemaRegistry::builtin();
        let resolver = SchemaResolver::new(&registry);
        let err = resource(
            &resolver,
            &catalog(),
            &mut Scripted::new(&[]),
            &ResourceType::new("quantum cluster"),
            ParameterSet::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ProvgenError::SchemaNotFound(_)), "got {err:?}");
    }

    #[test]
    fn resource_pipeline_aborts_instead_of_rendering_incomplete_sets() {
        let registry = SchemaRegistry::builtin();
        let resolver = SchemaResolver::new(&registry);
        let seed = ParameterSet::from_extracted(vec![("name", "rg-demo")]);
        let err = resource(
            &resolver,
            &catalog(),
            &mut collect::NoInput,
            &ResourceType::new("resource group"),
            seed,
        )
        .unwrap_err();
        assert!(matches!(err, ProvgenError::CollectionAborted { .. }), "got {err:?}");
    }

    #[test]
    fn schema_without_rendering_rule_yields_a_marked_placeholder() {
        // A type can be collectable without being renderable, e.g. one
        // resolved from the platform service before a rule exists for it.
        let mut registry = SchemaRegistry::empty();
        registry.insert(
            ResourceType::new("aks cluster"),
            Schema::new(vec![
                ParamSpec::required("name", "Name?"),
                ParamSpec::required("location", "Region?"),
            ]),
        );
        let resolver = SchemaResolver::new(&registry);
        let seed =
            ParameterSet::from_extracted(vec![("name", "prod-aks"), ("location", "eastus")]);

        let generation = resource(
            &resolver,
            &catalog(),
            &mut Scripted::new(&[]),
            &ResourceType::new("aks cluster"),
            seed,
        )
        .unwrap();

        assert!(generation.unsupported);
        assert!(generation.artifact.content.starts_with("# provgen:"));
        assert_eq!(generation.artifact.branch_name, "add-aks-cluster-prod-aks");
    }

    #[test]
    fn workflow_pipeline_collects_then_renders() {
        let seed = ParameterSet::from_extracted(vec![("action_name", "deploy app")]);
        let mut prompter = Scripted::new(&["push", "Build and deploy."]);

        let generation = workflow(&mut prompter, seed).unwrap();

        assert_eq!(generation.artifact.branch_name, "add-workflow-deploy-app");
        assert_eq!(generation.artifact.target_path, ".github/workflows/deploy-app.yml");
        assert!(generation.artifact.content.contains("name: Deploy App"));
        assert!(generation.artifact.content.contains("on: [push]"));
        assert!(generation.warnings.is_empty());
    }

    #[test]
    fn workflow_pipeline_aborts_without_input() {
        let err = workflow(&mut collect::NoInput, ParameterSet::new()).unwrap_err();
        assert!(matches!(err, ProvgenError::CollectionAborted { .. }), "got {err:?}");
    }
}
