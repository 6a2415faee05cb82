//! Translate a single snapshot file.

use std::path::PathBuf;

use psr_common::config::AppConfig;
use psr_label_model::csv::{read_snapshots, serialize_actions, write_actions};
use psr_label_model::ProcedureInfo;
use psr_translator::{Translator, TranslatorConfig};

pub fn run(
    config: &AppConfig,
    input: PathBuf,
    procedure_info: Option<PathBuf>,
    output: Option<PathBuf>,
    include_errors: bool,
    json: bool,
) -> anyhow::Result<()> {
    let procedure_path = super::procedure_info_path(config, procedure_info);
    let procedure = ProcedureInfo::load(&procedure_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load procedure info {}: {e}",
            procedure_path.display()
        )
    })?;

    let snapshots = read_snapshots(&input, None)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let translation = Translator::new(&procedure, TranslatorConfig { include_errors })
        .translate(&snapshots)
        .map_err(|e| anyhow::anyhow!("Failed to translate {}: {e}", input.display()))?;

    tracing::info!(
        snapshots = snapshots.len(),
        events = translation.events.len(),
        errors = translation.error_count,
        unexpected = translation.unexpected_count,
        "Translated snapshot file"
    );

    match (output, json) {
        (Some(path), false) => {
            write_actions(&path, &translation.events)?;
            println!(
                "Wrote {} events to {}",
                translation.events.len(),
                path.display()
            );
        }
        (Some(path), true) => {
            let mut content = String::new();
            for event in &translation.events {
                content.push_str(&serde_json::to_string(event)?);
                content.push('\n');
            }
            std::fs::write(&path, content)?;
            println!(
                "Wrote {} events to {}",
                translation.events.len(),
                path.display()
            );
        }
        (None, false) => print!("{}", serialize_actions(&translation.events)),
        (None, true) => {
            for event in &translation.events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }

    Ok(())
}
