use crate::artifact::GeneratedArtifact;
use crate::config::RepoConfig;
use crate::error::{ProvgenError, Result};
use crate::io;
use serde::Serialize;
use std::path::Path;
use std::process::Command;

// ---------------------------------------------------------------------------
// PublishOptions / PublishReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct PublishOptions {
    /// Open a pull request after pushing. Off means push-only.
    pub open_pr: bool,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self { open_pr: true }
    }
}

/// What publication actually did, for the caller to display.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    pub branch: String,
    pub target_path: String,
    pub pr_created: bool,
}

// ---------------------------------------------------------------------------
// Publication pipeline
// ---------------------------------------------------------------------------

/// Publish an artifact: sync the checkout, branch, write, commit, push and
/// optionally open a pull request.
///
/// Steps run strictly in order and the first failure aborts with the
/// command's stderr; there is no rollback of completed steps. The artifact
/// is validated before anything touches the filesystem.
pub fn publish(
    repo: &RepoConfig,
    repo_dir: &Path,
    artifact: &GeneratedArtifact,
    options: &PublishOptions,
) -> Result<PublishReport> {
    artifact.validate()?;
    let git = which::which("git").map_err(|_| ProvgenError::MissingBinary("git".into()))?;

    sync_checkout(&git, repo, repo_dir)?;
    run(&git, &["checkout", "-b", &artifact.branch_name], Some(repo_dir))?;

    io::atomic_write(&repo_dir.join(&artifact.target_path), artifact.content.as_bytes())?;

    run(&git, &["add", "."], Some(repo_dir))?;
    run(&git, &["commit", "-m", &commit_message(&artifact.branch_name)], Some(repo_dir))?;
    run(&git, &["push", "-u", "origin", &artifact.branch_name], Some(repo_dir))?;

    let mut pr_created = false;
    if options.open_pr {
        open_pull_request(repo, repo_dir, artifact)?;
        pr_created = true;
    }

    Ok(PublishReport {
        branch: artifact.branch_name.clone(),
        target_path: artifact.target_path.clone(),
        pr_created,
    })
}

/// Clone the repository if `repo_dir` is not a checkout yet, otherwise
/// fetch and fast-forward the base branch.
fn sync_checkout(git: &Path, repo: &RepoConfig, repo_dir: &Path) -> Result<()> {
    if !repo_dir.join(".git").exists() {
        let url = repo.url.as_deref().ok_or_else(|| ProvgenError::CommandFailed {
            program: "git clone".into(),
            detail: format!(
                "{} is not a git checkout and repo.url is not configured",
                repo_dir.display()
            ),
        })?;
        if let Some(parent) = repo_dir.parent() {
            io::ensure_dir(parent)?;
        }
        let dir_arg = path_arg(repo_dir)?;
        run(git, &["clone", url, dir_arg], None)?;
    } else {
        run(git, &["fetch", "origin"], Some(repo_dir))?;
        run(git, &["checkout", &repo.base_branch], Some(repo_dir))?;
        run(git, &["pull", "origin", &repo.base_branch], Some(repo_dir))?;
    }
    Ok(())
}

fn open_pull_request(repo: &RepoConfig, repo_dir: &Path, artifact: &GeneratedArtifact) -> Result<()> {
    let gh = which::which("gh").map_err(|_| ProvgenError::MissingBinary("gh".into()))?;
    let title = pr_title(&artifact.branch_name);
    let body = pr_body(&artifact.target_path);
    let mut args = vec![
        "pr",
        "create",
        "--base",
        repo.base_branch.as_str(),
        "--head",
        artifact.branch_name.as_str(),
        "--title",
        title.as_str(),
        "--body",
        body.as_str(),
    ];
    if let Some(github_repo) = &repo.github_repo {
        args.push("--repo");
        args.push(github_repo.as_str());
    }
    run(&gh, &args, Some(repo_dir))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub fn commit_message(branch: &str) -> String {
    format!("Feat: {branch}")
}

pub fn pr_title(branch: &str) -> String {
    format!("Feat: {branch}")
}

pub fn pr_body(target_path: &str) -> String {
    format!("This PR adds {target_path} as requested.")
}

// ---------------------------------------------------------------------------
// Subprocess plumbing
// ---------------------------------------------------------------------------

fn path_arg(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| ProvgenError::CommandFailed {
        program: "git".into(),
        detail: "repository path contains non-UTF8 characters".into(),
    })
}

fn run(program: &Path, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let label = command_label(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| ProvgenError::CommandFailed {
        program: label.clone(),
        detail: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProvgenError::CommandFailed {
            program: label,
            detail: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// "git checkout", "gh pr" and so on, for error messages.
fn command_label(program: &Path, args: &[&str]) -> String {
    let bin = program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string());
    match args.first() {
        Some(first) => format!("{bin} {first}"),
        None => bin,
    }
}
