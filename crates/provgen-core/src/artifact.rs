use crate::error::{ProvgenError, Result};
use crate::types::ResourceType;
use crate::workflow::WorkflowRequest;
use regex::Regex;
use serde::Serialize;
use std::path::{Component, Path};
use std::sync::OnceLock;

/// Where Terraform output lands inside the target repository.
pub const TERRAFORM_TARGET: &str = "main.tf";

const MAX_BRANCH_LEN: usize = 100;

// ---------------------------------------------------------------------------
// GeneratedArtifact
// ---------------------------------------------------------------------------

/// Terminal output of the generation pipeline and the only thing the
/// publication pipeline accepts. Built once per run, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub content: String,
    pub target_path: String,
    pub branch_name: String,
}

impl GeneratedArtifact {
    /// Terraform artifact: fixed target path, branch derived from the
    /// resource type and the primary resource name.
    pub fn terraform(resource_type: &ResourceType, primary_name: &str, content: String) -> Self {
        let type_slug = slugify(resource_type.as_str());
        let name_slug = slugify(primary_name);
        let branch_name = if name_slug.is_empty() {
            format!("add-{type_slug}")
        } else {
            format!("add-{type_slug}-{name_slug}")
        };
        Self { content, target_path: TERRAFORM_TARGET.to_string(), branch_name }
    }

    /// Workflow artifact: target path under `.github/workflows/`, branch
    /// derived from the workflow name.
    pub fn workflow(request: &WorkflowRequest, content: String) -> Self {
        let slug = slugify(&request.action_name);
        let branch_name = if slug.is_empty() {
            "add-workflow".to_string()
        } else {
            format!("add-workflow-{slug}")
        };
        Self { content, target_path: request.file_path(), branch_name }
    }

    /// The publication contract: non-empty content, a safe relative target
    /// path and a branch name within the slug discipline.
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(ProvgenError::EmptyArtifact("content"));
        }
        if self.target_path.trim().is_empty() {
            return Err(ProvgenError::EmptyArtifact("target path"));
        }
        let path = Path::new(&self.target_path);
        if path.is_absolute()
            || path.components().any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ProvgenError::InvalidTargetPath(self.target_path.clone()));
        }
        validate_branch(&self.branch_name)
    }
}

// ---------------------------------------------------------------------------
// Branch discipline
// ---------------------------------------------------------------------------

static BRANCH_RE: OnceLock<Regex> = OnceLock::new();

fn branch_re() -> &'static Regex {
    BRANCH_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("branch regex is valid")
    })
}

pub fn validate_branch(branch: &str) -> Result<()> {
    if branch.is_empty() || branch.len() > MAX_BRANCH_LEN || !branch_re().is_match(branch) {
        return Err(ProvgenError::InvalidBranch(branch.to_string()));
    }
    Ok(())
}

/// Reduce free-form text to branch-safe form: lower-cased, runs of
/// non-alphanumerics collapsed to single hyphens, no edge hyphens.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_gap = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_gap && !slug.is_empty() {
                slug.push('-');
            }
            pending_gap = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_gap = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("rg-demo"), "rg-demo");
        assert_eq!(slugify("My  App!"), "my-app");
        assert_eq!(slugify("--x--"), "x");
        assert_eq!(slugify("Standard_B1s"), "standard-b1s");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn terraform_branch_names_follow_the_convention() {
        let artifact = GeneratedArtifact::terraform(
            &ResourceType::new("resource group"),
            "rg-demo",
            "resource {}\n".to_string(),
        );
        assert_eq!(artifact.branch_name, "add-resource-group-rg-demo");
        assert_eq!(artifact.target_path, "main.tf");
    }

    #[test]
    fn terraform_branch_survives_a_missing_name() {
        let artifact = GeneratedArtifact::terraform(
            &ResourceType::new("aks cluster"),
            "",
            "# placeholder\n".to_string(),
        );
        assert_eq!(artifact.branch_name, "add-aks-cluster");
        assert!(artifact.validate().is_ok());
    }

    #[test]
    fn workflow_branch_and_path_derive_from_the_name() {
        let request = WorkflowRequest {
            action_name: "deploy app".into(),
            trigger: "push".into(),
            description: "d".into(),
        };
        let artifact = GeneratedArtifact::workflow(&request, "name: x\n".to_string());
        assert_eq!(artifact.branch_name, "add-workflow-deploy-app");
        assert_eq!(artifact.target_path, ".github/workflows/deploy-app.yml");
        assert!(artifact.validate().is_ok());
    }

    #[test]
    fn workflow_branch_survives_an_unsluggable_name() {
        let request = WorkflowRequest {
            action_name: "!!!".into(),
            trigger: "push".into(),
            description: "d".into(),
        };
        let artifact = GeneratedArtifact::workflow(&request, "name: x\n".to_string());
        assert_eq!(artifact.branch_name, "add-workflow");
        assert!(artifact.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_fields() {
        let artifact = GeneratedArtifact {
            content: "   \n".into(),
            target_path: "main.tf".into(),
            branch_name: "add-x".into(),
        };
        assert!(matches!(
            artifact.validate().unwrap_err(),
            ProvgenError::EmptyArtifact("content")
        ));
    }

    #[test]
    fn validate_rejects_escaping_target_paths() {
        for bad in ["/etc/passwd", "../outside.tf", "a/../../b"] {
            let artifact = GeneratedArtifact {
                content: "x".into(),
                target_path: bad.into(),
                branch_name: "add-x".into(),
            };
            assert!(
                matches!(artifact.validate().unwrap_err(), ProvgenError::InvalidTargetPath(_)),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn branch_validation_enforces_the_slug_discipline() {
        assert!(validate_branch("add-resource-group-rg-demo").is_ok());
        assert!(validate_branch("a").is_ok());
        let too_long = "x".repeat(101);
        for bad in ["", "Add-Thing", "add thing", "-leading", "trailing-", too_long.as_str()] {
            assert!(validate_branch(bad).is_err(), "accepted {bad:?}");
        }
    }
}
