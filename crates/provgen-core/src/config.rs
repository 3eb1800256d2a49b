use crate::error::{ProvgenError, Result};
use crate::io;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name, discovered by walking up from the working directory.
pub const CONFIG_FILE: &str = "provgen.yaml";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_BASE_BRANCH: &str = "main";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// OpenAiConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for OpenAI-compatible gateways. The API key itself never
    /// lives in this file; it comes from `OPENAI_API_KEY`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self { model: default_model(), base_url: default_base_url() }
    }
}

// ---------------------------------------------------------------------------
// SchemaServiceConfig
// ---------------------------------------------------------------------------

/// Optional platform schema-description service. Absent means resolution
/// is static-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaServiceConfig {
    pub url: String,
}

// ---------------------------------------------------------------------------
// RepoConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Checkout of the infrastructure repository artifacts land in.
    /// Relative paths resolve against the config file's directory.
    pub path: PathBuf,
    /// Clone source when the checkout does not exist yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
    /// `owner/name` passed to `gh pr create --repo`; when absent, gh infers
    /// the repository from the checkout's origin remote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<String>,
}

fn default_base_branch() -> String {
    DEFAULT_BASE_BRANCH.to_string()
}

impl RepoConfig {
    pub fn resolved_path(&self, config_dir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            config_dir.join(&self.path)
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_service: Option<SchemaServiceConfig>,
    pub repo: RepoConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            version: default_version(),
            openai: OpenAiConfig::default(),
            schema_service: None,
            repo: RepoConfig {
                path: repo_path.into(),
                url: None,
                base_branch: default_base_branch(),
                github_repo: None,
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProvgenError::NotInitialized);
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(path, data.as_bytes())
    }

    /// Non-fatal config checks. Errors here mean a later stage will fail;
    /// warnings mean something looks off but the run can proceed.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.openai.model.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "openai.model is empty; intent classification will fail".into(),
            });
        }
        if !self.openai.base_url.starts_with("http") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("openai.base_url '{}' is not an http(s) URL", self.openai.base_url),
            });
        }
        if let Some(service) = &self.schema_service {
            if !service.url.starts_with("http") {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "schema_service.url '{}' is not an http(s) URL; dynamic resolution will fail",
                        service.url
                    ),
                });
            }
        }
        if self.repo.url.is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "repo.url is not set; publication requires an existing checkout at repo.path"
                    .into(),
            });
        }
        if let Some(github_repo) = &self.repo.github_repo {
            if !github_repo.contains('/') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("repo.github_repo '{github_repo}' is not in owner/name form"),
                });
            }
        }

        warnings
    }
}
