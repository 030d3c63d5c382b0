//! Story domain model.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SnoozeError};

/// A single submitted story (a bookmark with a title and an author).
///
/// Stories are values: they are built from API records and never mutated
/// afterwards. The global list, a user's own stories and a user's favorites
/// each hold their own copy, matched up by `story_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Server-assigned unique identifier
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    /// Username of the submitter
    pub username: String,
    /// Creation timestamp as sent by the server (ISO 8601)
    pub created_at: String,
}

impl Story {
    /// Returns the host part of the story URL, including a non-default port.
    ///
    /// `https://example.com/a/b` yields `example.com`;
    /// `http://localhost:8080/x` yields `localhost:8080`.
    pub fn host_name(&self) -> Result<String> {
        let parsed = Url::parse(&self.url)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| SnoozeError::validation(format!("URL has no host: {}", self.url)))?;

        Ok(match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }

    /// Whether this story carries the given id.
    pub fn has_id(&self, story_id: &str) -> bool {
        self.story_id == story_id
    }
}

/// Fields a user supplies when submitting a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStory {
    pub title: String,
    pub author: String,
    pub url: String,
}

impl NewStory {
    pub fn new(title: impl Into<String>, author: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }
}
