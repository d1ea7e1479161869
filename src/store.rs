use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Account;

/// JSON file holding the saved accounts.
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all accounts. A missing file is an empty list, not an error.
    pub fn load(&self) -> Result<Vec<Account>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No accounts file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut accounts: Vec<Account> =
            serde_json::from_str(&data).map_err(|source| Error::Parse {
                path: self.path.clone(),
                source,
            })?;
        for account in &mut accounts {
            account.authenticate();
        }
        debug!("Loaded {} accounts from {}", accounts.len(), self.path.display());
        Ok(accounts)
    }

    /// Overwrite the file with `accounts`. An empty slice writes `[]`.
    /// The data lands in a sibling file first and is renamed over the store,
    /// so an interrupted save leaves the previous contents intact.
    pub fn save(&self, accounts: &[Account]) -> Result<()> {
        let data = serde_json::to_string_pretty(accounts)?;
        let staging = self.staging_path();
        fs::write(&staging, data).map_err(|source| Error::Io {
            path: staging.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(Error::Io {
                path: self.path.clone(),
                source,
            });
        }
        debug!("Saved {} accounts to {}", accounts.len(), self.path.display());
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
