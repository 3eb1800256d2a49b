use provgen_core::config::CONFIG_FILE;
use std::path::{Path, PathBuf};

/// Locate `provgen.yaml`.
///
/// Priority:
/// 1. Explicit `--config` / `PROVGEN_CONFIG`
/// 2. Walk upward from the current directory
/// 3. Fall back to `./provgen.yaml` so error messages point somewhere sane
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut dir = cwd.as_path();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return candidate;
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    cwd.join(CONFIG_FILE)
}

/// Directory the config file lives in, for resolving relative repo paths.
pub fn config_dir(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let explicit = PathBuf::from("/custom/provgen.yaml");
        assert_eq!(resolve_config_path(Some(&explicit)), explicit);
    }

    #[test]
    fn config_dir_handles_bare_names() {
        assert_eq!(config_dir(Path::new("/work/provgen.yaml")), Path::new("/work"));
        assert_eq!(config_dir(Path::new("provgen.yaml")), Path::new("."));
    }
}
