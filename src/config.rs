use std::env;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use ratatui::widgets::BorderType;

use crate::error::{Error, Result};
use crate::ui::Theme;

pub const ACCOUNTS_FILE_NAME: &str = ".github_manager.json";
pub const DEVELOP_DIR_NAME: &str = "develop";

/// Runtime settings, read from the environment (and a `.env` file when present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub accounts_file: PathBuf,
    /// `None` when no home directory can be resolved and no override is set.
    pub develop_dir: Option<PathBuf>,
    pub git: String,
    pub git_host: String,
    pub log_file: Option<PathBuf>,
    pub theme: Theme,
    /// Rejected values, reported once logging is up.
    pub warnings: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(dirs::home_dir(), |key| env::var(key).ok())
    }

    pub fn from_lookup(home: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let accounts_file = var("GHM_ACCOUNTS_FILE").map(PathBuf::from).unwrap_or_else(|| {
            home.clone()
                .unwrap_or_default()
                .join(ACCOUNTS_FILE_NAME)
        });
        let develop_dir = var("GHM_DEVELOP_DIR")
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|h| h.join(DEVELOP_DIR_NAME)));

        let mut theme = Theme::default();
        let mut warnings = Vec::new();
        if let Some(border) = var("GHM_BORDER") {
            match parse_border(&border) {
                Some(b) => theme.border = b,
                None => warnings.push(format!("Unknown GHM_BORDER '{}', keeping default", border)),
            }
        }
        if let Some(padding) = var("GHM_PADDING") {
            match padding.trim().parse() {
                Ok(p) => theme.padding = p,
                Err(_) => warnings.push(format!("Invalid GHM_PADDING '{}', keeping default", padding)),
            }
        }

        Self {
            accounts_file,
            develop_dir,
            git: var("GHM_GIT").unwrap_or_else(|| "git".to_string()),
            git_host: var("GHM_GIT_HOST").unwrap_or_else(|| "github.com".to_string()),
            log_file: var("GHM_LOG").map(PathBuf::from),
            theme,
            warnings,
        }
    }
}

/// Open the log file for appending, creating it when absent.
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_border(value: &str) -> Option<BorderType> {
    match value.trim().to_ascii_lowercase().as_str() {
        "plain" => Some(BorderType::Plain),
        "rounded" => Some(BorderType::Rounded),
        "double" => Some(BorderType::Double),
        "thick" => Some(BorderType::Thick),
        _ => None,
    }
}
