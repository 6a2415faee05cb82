pub mod config;
pub mod convert;
pub mod inspect;
pub mod label;
pub mod translate;

use std::path::PathBuf;

use psr_common::config::AppConfig;

/// Procedure table to use: the explicit path, or the configured one
/// resolved against the dataset root.
pub fn procedure_info_path(config: &AppConfig, explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(path) => path,
        None if config.dataset.procedure_info.is_absolute() => {
            config.dataset.procedure_info.clone()
        }
        None => config.dataset.data_dir.join(&config.dataset.procedure_info),
    }
}
