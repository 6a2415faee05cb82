//! PSR CLI: label recordings and translate snapshots into action events.
//!
//! Usage:
//!   psr label [OPTIONS]          Interactively label recordings
//!   psr translate [OPTIONS]      Convert every recording's snapshots to actions
//!   psr convert <CSV> [OPTIONS]  Convert a single snapshot file
//!   psr inspect <CSV>            Show a snapshot file and its changes
//!   psr config                   Show or write the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use psr_common::config::AppConfig;
use psr_common::dataset::DatasetSplit;

mod commands;

#[derive(Parser)]
#[command(
    name = "psr",
    about = "Procedure step recognition labeling tools",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/psr/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label recordings frame by frame
    Label {
        /// Dataset root containing the split folders
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Folder to write snapshot files into
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Which split to label
        #[arg(long, value_enum, default_value = "train")]
        split: SplitArg,

        /// Number of components per state vector
        #[arg(long)]
        components: Option<usize>,

        /// Frames moved per forward/back
        #[arg(long)]
        step: Option<usize>,
    },

    /// Translate every recording's snapshots into action events
    Translate {
        /// Dataset root containing the split folders
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Procedure description table
        #[arg(long)]
        procedure_info: Option<PathBuf>,

        /// Which split to translate
        #[arg(long, value_enum, default_value = "all")]
        split: SplitArg,

        /// Keep mis-installation events
        #[arg(long)]
        include_errors: bool,
    },

    /// Translate a single snapshot file
    Convert {
        /// Snapshot CSV to translate
        input: PathBuf,

        /// Procedure description table
        #[arg(long)]
        procedure_info: Option<PathBuf>,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep mis-installation events
        #[arg(long)]
        include_errors: bool,

        /// Print events as JSON lines instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Show a snapshot file and a summary of its changes
    Inspect {
        /// Snapshot CSV to inspect
        input: PathBuf,

        /// Expected number of components per row
        #[arg(long)]
        components: Option<usize>,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        write_default: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SplitArg {
    Train,
    Val,
    Test,
    All,
}

impl SplitArg {
    fn splits(self) -> Vec<DatasetSplit> {
        match self {
            SplitArg::Train => vec![DatasetSplit::Train],
            SplitArg::Val => vec![DatasetSplit::Val],
            SplitArg::Test => vec![DatasetSplit::Test],
            SplitArg::All => DatasetSplit::ALL.to_vec(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    psr_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Label {
            data_dir,
            save_dir,
            split,
            components,
            step,
        } => {
            if let Some(dir) = data_dir {
                config.dataset.data_dir = dir;
            }
            if let Some(dir) = save_dir {
                config.dataset.save_dir = dir;
            }
            if let Some(n) = components {
                config.labeling.component_count = n;
                if config.labeling.component_names.len() != n {
                    config.labeling.component_names.clear();
                }
            }
            if let Some(step) = step {
                config.labeling.step = step;
            }
            commands::label::run(&config, &split.splits())
        }
        Commands::Translate {
            data_dir,
            procedure_info,
            split,
            include_errors,
        } => {
            if let Some(dir) = data_dir {
                config.dataset.data_dir = dir;
            }
            commands::translate::run(&config, procedure_info, &split.splits(), include_errors)
        }
        Commands::Convert {
            input,
            procedure_info,
            output,
            include_errors,
            json,
        } => commands::convert::run(&config, input, procedure_info, output, include_errors, json),
        Commands::Inspect { input, components } => commands::inspect::run(input, components),
        Commands::Config { write_default } => {
            commands::config::run(&config, cli.config, write_default)
        }
    }
}
