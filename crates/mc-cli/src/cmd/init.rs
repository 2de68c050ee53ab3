use anyhow::Context;
use mc_core::{config::Config, io, paths};
use std::path::Path;

const GITIGNORE: &str = "cache/\n";

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing Mission Control in: {}", root.display());

    for dir in [paths::MC_DIR, paths::DATA_DIR, paths::CACHE_DIR] {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    let config_path = paths::config_path(root);
    if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        Config::new("Mission Control")
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    for name in [
        paths::TASKS_FILE,
        paths::CONTENT_FILE,
        paths::PROPOSALS_FILE,
        paths::ACTIONS_FILE,
    ] {
        let path = paths::data_file(root, name);
        if io::write_if_missing(&path, b"[]\n")
            .with_context(|| format!("failed to create {}", path.display()))?
        {
            println!("  created: {}/{name}", paths::DATA_DIR);
        }
    }

    io::write_if_missing(&paths::mc_dir(root).join(".gitignore"), GITIGNORE.as_bytes())
        .context("failed to write .gitignore")?;

    println!("\nRun `mc serve` to open the dashboard.");
    Ok(())
}
