//! Commit parameters for scripted commits.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// An author/committer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A fixed point in time applied as both author and committer date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitDate(DateTime<FixedOffset>);

impl CommitDate {
    /// Parse an RFC 3339 timestamp such as `2023-03-01T09:00:00+00:00`.
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        DateTime::parse_from_rfc3339(value)
            .map(Self)
            .map_err(|e| anyhow::anyhow!("Invalid commit date {:?}: {}", value, e))
    }

    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// The ISO 8601 form git accepts in `GIT_AUTHOR_DATE`.
    pub fn to_git(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    }
}

/// Everything needed to record one commit.
///
/// Without an author or date the repository's configured identity and the
/// current time are used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSpec {
    pub message: String,
    pub author: Option<Identity>,
    pub date: Option<CommitDate>,
}

impl CommitSpec {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            author: None,
            date: None,
        }
    }

    /// Record the commit under this identity (author and committer).
    pub fn with_author(mut self, author: Identity) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_date(mut self, date: CommitDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Environment overrides passed to `git commit`.
    pub(crate) fn env(&self) -> Vec<(&'static str, String)> {
        let mut env = Vec::new();
        if let Some(author) = &self.author {
            env.push(("GIT_AUTHOR_NAME", author.name.clone()));
            env.push(("GIT_AUTHOR_EMAIL", author.email.clone()));
            env.push(("GIT_COMMITTER_NAME", author.name.clone()));
            env.push(("GIT_COMMITTER_EMAIL", author.email.clone()));
        }
        if let Some(date) = &self.date {
            env.push(("GIT_AUTHOR_DATE", date.to_git()));
            env.push(("GIT_COMMITTER_DATE", date.to_git()));
        }
        env
    }
}
