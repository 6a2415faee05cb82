//! Show or write the configuration.

use std::path::PathBuf;

use psr_common::config::AppConfig;

pub fn run(config: &AppConfig, path: Option<PathBuf>, write_default: bool) -> anyhow::Result<()> {
    if write_default {
        let defaults = AppConfig::default();
        let written = match path {
            Some(path) => {
                defaults.save_to(&path)?;
                path
            }
            None => defaults.save()?,
        };
        println!("Wrote default configuration to {}", written.display());
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
