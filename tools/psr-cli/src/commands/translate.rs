//! Batch translation of every recording's snapshot file.

use std::path::PathBuf;

use psr_common::config::AppConfig;
use psr_common::dataset::{list_recordings, DatasetSplit, Recording};
use psr_label_model::csv::{read_snapshots, write_actions};
use psr_label_model::ProcedureInfo;
use psr_translator::{Translation, Translator, TranslatorConfig};

pub fn run(
    config: &AppConfig,
    procedure_info: Option<PathBuf>,
    splits: &[DatasetSplit],
    include_errors: bool,
) -> anyhow::Result<()> {
    let procedure_path = super::procedure_info_path(config, procedure_info);
    let procedure = ProcedureInfo::load(&procedure_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load procedure info {}: {e}",
            procedure_path.display()
        )
    })?;
    tracing::debug!(
        actions = procedure.len(),
        components = procedure.component_capacity(),
        "Loaded procedure info"
    );
    let translator = Translator::new(&procedure, TranslatorConfig { include_errors });

    let recordings = list_recordings(&config.dataset.data_dir, splits)
        .map_err(|e| anyhow::anyhow!("Failed to list recordings: {e}"))?;

    let output_name = if include_errors {
        &config.dataset.labels_with_errors_file
    } else {
        &config.dataset.labels_file
    };

    let mut total_errors = 0;
    let mut translated = 0;
    let mut failed = vec![];
    for recording in &recordings {
        match translate_recording(&translator, config, recording, output_name) {
            Ok(translation) => {
                total_errors += translation.error_count;
                translated += 1;
                println!(
                    "Rec {}:\t {} errors \tTotal errors: \t{}",
                    recording.name, translation.error_count, total_errors
                );
            }
            Err(e) => {
                tracing::error!(recording = %recording.name, "Translation failed: {e}");
                failed.push(recording.name.clone());
            }
        }
    }

    println!(
        "Translated {translated}/{} recordings, {total_errors} errors in total",
        recordings.len()
    );
    if !failed.is_empty() {
        anyhow::bail!(
            "{} recording(s) failed: {}",
            failed.len(),
            failed.join(", ")
        );
    }
    Ok(())
}

fn translate_recording(
    translator: &Translator<'_>,
    config: &AppConfig,
    recording: &Recording,
    output_name: &str,
) -> anyhow::Result<Translation> {
    let input = recording.file(&config.dataset.raw_labels_file);
    let snapshots = read_snapshots(&input, None)?;
    let translation = translator.translate(&snapshots)?;

    let output = recording.file(output_name);
    write_actions(&output, &translation.events)?;
    tracing::debug!(
        recording = %recording.name,
        events = translation.events.len(),
        path = %output.display(),
        "Wrote action events"
    );
    Ok(translation)
}
