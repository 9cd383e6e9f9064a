use std::path::PathBuf;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "app.log";

pub struct Config {
    /// File receiving a timestamped line for every command outcome.
    ///
    /// Opened in append mode, so history accumulates across runs.
    pub log_file: PathBuf,
    /// Restricts console output to errors.
    ///
    /// Does not affect what is written to `log_file`.
    pub quiet: bool,
}
