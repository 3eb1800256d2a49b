use anyhow::Context;
use provgen_core::config::{Config, CONFIG_FILE};
use std::path::{Path, PathBuf};

pub fn run(explicit: Option<&Path>) -> anyhow::Result<()> {
    // Unlike discovery, init never walks up: it writes into the current
    // directory unless told otherwise, so nesting a new setup under an
    // existing one stays possible.
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(CONFIG_FILE),
    };

    if path.exists() {
        println!("  exists:  {}", path.display());
        return Ok(());
    }

    let config = Config::new("cloud-resources");
    config
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("  created: {}", path.display());

    println!();
    println!("Next steps:");
    println!("  1. Set repo.path (and repo.url for a fresh clone) in {CONFIG_FILE}");
    println!("  2. Export OPENAI_API_KEY (or put it in .env)");
    println!("  3. Try: provgen run \"create an Azure resource group called rg-demo\" --dry-run");
    Ok(())
}
