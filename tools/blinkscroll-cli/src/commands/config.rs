//! Show or initialize the configuration file.

use blinkscroll_common::config::{config_file_path, AppConfig};

pub fn run(config: AppConfig, init: bool, force: bool) -> anyhow::Result<()> {
    let path = config_file_path();

    if init {
        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
        let written = AppConfig::default()
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
        println!("Wrote default config to: {}", written.display());
        return Ok(());
    }

    let status = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("Config file: {}{status}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
