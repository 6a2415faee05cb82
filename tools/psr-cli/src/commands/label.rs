//! Interactive labeling of every recording in the selected splits.

use psr_common::config::AppConfig;
use psr_common::dataset::{list_recordings, DatasetSplit};
use psr_recorder::console::LineConsole;
use psr_recorder::runner::{label_recording, output_path, RecordingOutcome};

pub fn run(config: &AppConfig, splits: &[DatasetSplit]) -> anyhow::Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid labeling options: {e}"))?;

    let recordings = list_recordings(&config.dataset.data_dir, splits)
        .map_err(|e| anyhow::anyhow!("Failed to list recordings: {e}"))?;
    if recordings.is_empty() {
        println!(
            "No recordings found under {}",
            config.dataset.data_dir.display()
        );
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut console = LineConsole::new(stdin.lock(), std::io::stdout(), &config.labeling);
    console
        .print_help()
        .map_err(|e| anyhow::anyhow!("Failed to write to terminal: {e}"))?;

    let total = recordings.len();
    for (i, recording) in recordings.iter().enumerate() {
        let pct = i as f64 / total as f64 * 100.0;
        println!(
            "{pct:.2}% --> {i}/{total}. {}\t Saving labels to {}",
            recording.name,
            output_path(config, recording).display()
        );

        let outcome = label_recording(config, recording, &mut console)
            .map_err(|e| anyhow::anyhow!("Failed to label {}: {e}", recording.name))?;

        match outcome {
            RecordingOutcome::AlreadyLabeled { path } => {
                println!("Recording already labeled ({})", path.display());
            }
            RecordingOutcome::NoFrames => {
                println!("No frames found in {}", recording.path.display());
            }
            RecordingOutcome::Saved { path, snapshots } => {
                println!(
                    "Congratulations! {snapshots} snapshots saved to {}",
                    path.display()
                );
            }
            RecordingOutcome::Discarded => {
                println!(
                    "Hard quit on {}: no labels saved, moving to the next recording.",
                    recording.name
                );
            }
            RecordingOutcome::InputClosed => {
                println!("Input closed: no labels saved for {}.", recording.name);
                break;
            }
        }
    }

    Ok(())
}
