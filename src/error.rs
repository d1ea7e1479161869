use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can go wrong while loading accounts, talking to GitHub or cloning.
#[derive(Error, Debug)]
pub enum Error {
    // Credential store
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize accounts: {0}")]
    Serialize(#[from] serde_json::Error),

    // Authentication
    #[error("client not initialized")]
    ClientNotInitialized,

    // GitHub API
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    // Clone preconditions
    #[error("token is empty")]
    EmptyToken,

    #[error("repository owner or name is empty")]
    MissingIdentity,

    #[error("repository already exists at {}", .path.display())]
    AlreadyExists { path: PathBuf },

    // Filesystem
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("failed to create develop directory {}: {source}", .path.display())]
    CreateRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // External git process
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git clone failed: {status}, output: {output}")]
    CloneFailed { status: ExitStatus, output: String },

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
