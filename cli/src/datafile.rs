//! Resolution of the data file a command works on, and the policy for
//! what happens when it does not exist yet.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use routes_core::{RouteStore, codec};
use tracing::{info, warn};

use crate::commands::FileArgs;
use crate::error::CliError;

/// What a command does when its data file is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMissing {
    /// Start from an empty store; the file appears on the next save.
    Create,
    /// Refuse to run.
    Fail,
}

pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Builds the path from command arguments, honoring `--home`.
    pub fn resolve(args: &FileArgs) -> Result<Self, CliError> {
        if !args.home {
            return Ok(Self::new(&args.filename));
        }

        let home = dirs::home_dir().ok_or(CliError::NoHomeDir)?;
        Ok(Self::new(home.join(&args.filename)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the store, applying `on_missing` when there is no file.
    ///
    /// Stores read from disk are re-checked for ordering and duplicates. A
    /// failed check is only logged since the file may have been edited by hand.
    pub fn open(&self, command: &'static str, on_missing: OnMissing) -> anyhow::Result<RouteStore> {
        let store = match codec::load(&self.path) {
            Ok(store) => store,
            Err(routes_core::Error::Io { ref source, .. }) if source.kind() == ErrorKind::NotFound => {
                return self.missing(command, on_missing);
            }
            Err(e) => return Err(e.into()),
        };
        info!("Loaded {} routes from {}", store.count(), self);

        if let Err(e) = store.verify() {
            warn!("Routes in {} are inconsistent: {e}", self);
        }

        Ok(store)
    }

    fn missing(&self, command: &'static str, on_missing: OnMissing) -> anyhow::Result<RouteStore> {
        match on_missing {
            OnMissing::Fail => Err(CliError::MissingFile {
                path: self.path.clone(),
                command,
            }
            .into()),
            OnMissing::Create => {
                info!("File {} not found, it will be created on save", self);
                Ok(RouteStore::new())
            }
        }
    }

    pub fn save(&self, store: &RouteStore) -> anyhow::Result<()> {
        codec::save(store, &self.path)?;
        info!("Saved {} routes to {}", store.count(), self);
        Ok(())
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}
