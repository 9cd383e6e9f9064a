use std::path::PathBuf;

use thiserror::Error;

/// Failures owned by the command layer rather than the store.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{}: file not found, command \"{command}\" needs an existing file", path.display())]
    MissingFile { path: PathBuf, command: &'static str },

    #[error("could not determine the home directory")]
    NoHomeDir,
}
