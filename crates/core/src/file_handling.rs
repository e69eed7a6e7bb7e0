//! Reading the worker configuration file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::worker::WorkerDefinition;

const FILE_DESCRIPTION: &str = "worker configuration";

fn get_reader(path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(FILE_DESCRIPTION.to_string(), path.to_string(), e))
}

/// Loads and validates the worker definition.
///
/// A missing file is not an error: the defaults are returned instead.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML
/// - The definition fails validation
pub fn get_worker_definition(config_path: &str) -> Result<WorkerDefinition> {
    if !Path::new(config_path).exists() {
        debug!("No config at `{}`, using the default worker", config_path);
        return Ok(WorkerDefinition::default());
    }

    let mut content = String::new();
    get_reader(config_path)?
        .read_to_string(&mut content)
        .map_err(|e| Error::io_error(FILE_DESCRIPTION.to_string(), config_path.to_string(), e))?;

    // An empty document means "all defaults", not a parse failure.
    if content.trim().is_empty() {
        return Ok(WorkerDefinition::default());
    }

    let worker: WorkerDefinition = serde_yaml::from_str(&content).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            FILE_DESCRIPTION.to_string(),
            config_path.to_string(),
            e,
        )
    })?;

    worker.validate()?;

    Ok(worker)
}
