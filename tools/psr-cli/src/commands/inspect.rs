//! Show a snapshot file and summarize what changes between rows.

use std::path::PathBuf;

use psr_label_model::csv::read_snapshots;

pub fn run(input: PathBuf, components: Option<usize>) -> anyhow::Result<()> {
    let snapshots = read_snapshots(&input, components)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;

    println!("File: {}", input.display());
    println!("  Snapshots: {}", snapshots.len());
    if let Some(first) = snapshots.first() {
        println!("  Components: {}", first.states.len());
    }
    println!();

    println!("Labels:");
    for snapshot in &snapshots {
        println!("  {}: \t {}", snapshot.frame, snapshot.states);
    }
    println!();

    println!("Changes:");
    let mut unchanged = 0;
    for pair in snapshots.windows(2) {
        let changed: Vec<usize> = pair[0].states.changed_components(&pair[1].states).collect();
        if changed.is_empty() {
            unchanged += 1;
            continue;
        }
        let detail: Vec<String> = changed
            .iter()
            .map(|&k| {
                format!(
                    "{k}: {} -> {}",
                    pair[0].states.get(k).map(|s| s.code()).unwrap_or_default(),
                    pair[1].states.get(k).map(|s| s.code()).unwrap_or_default()
                )
            })
            .collect();
        println!("  {}: {}", pair[1].frame, detail.join(", "));
    }

    if unchanged == 0 {
        println!("\nNo issues found.");
    } else {
        println!("\nIssues:");
        println!("  - {unchanged} row(s) repeat the previous state vector");
    }

    Ok(())
}
