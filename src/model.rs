use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::Error;
use crate::github::GitHubClient;

/// A named set of GitHub credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    pub private: bool,
    /// Rebuilt from `token` on load, never written to disk.
    #[serde(skip)]
    pub client: Option<GitHubClient>,
}

impl Account {
    pub fn new(name: String, token: String) -> Self {
        let mut account = Self {
            name,
            token,
            created: OffsetDateTime::now_utc(),
            private: true,
            client: None,
        };
        account.authenticate();
        account
    }

    /// Derive the API handle from the token. Empty tokens yield no handle.
    pub fn authenticate(&mut self) {
        self.client = if self.token.is_empty() {
            None
        } else {
            Some(GitHubClient::new(&self.token))
        };
    }

    pub fn description(&self) -> String {
        let visibility = if self.private { "Private" } else { "Public" };
        format!("Created: {} • {}", self.created.date(), visibility)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub stars: u32,
    pub forks: u32,
    pub language: String,
    pub updated_at: OffsetDateTime,
    pub private: bool,
    pub ssh_url: String,
    pub clone_url: String,
}

impl Repository {
    pub fn title(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn summary(&self) -> String {
        let description = if self.description.is_empty() {
            "No description"
        } else {
            &self.description
        };
        let visibility = if self.private { "Private" } else { "Public" };
        format!(
            "{} • {} • ⭐{} • 🍴{} • {} • Updated: {}",
            description,
            visibility,
            self.stars,
            self.forks,
            self.language,
            self.updated_at.date()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    AccountPicker,
    Repositories,
    AddAccount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Token,
}

#[derive(Debug, Clone, Default)]
pub struct AddAccountForm {
    pub name: String,
    pub token: String,
    pub focus: FormField,
}

impl AddAccountForm {
    pub fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Token => &mut self.token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Info }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Error }
    }
}

/// Results delivered from background tasks back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    ReposLoaded {
        seq: u64,
        result: Result<Vec<Repository>, Error>,
    },
    Cloned {
        repo: Repository,
        result: Result<PathBuf, Error>,
    },
}

/// Work the UI loop must start on behalf of the state machine.
#[derive(Debug)]
pub enum Effect {
    Quit,
    ListRepositories {
        seq: u64,
        client: Option<GitHubClient>,
    },
    Clone {
        repo: Repository,
        token: String,
    },
}
