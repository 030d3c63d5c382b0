//! Remote API contract.
//!
//! `StoryApi` is the seam between the domain and the Hack-or-Snooze REST
//! service. The HTTP implementation lives in `snooze-interaction`; tests use
//! the in-memory double from [`crate::testing`].
//!
//! Authentication is a token passed as a request parameter (body or query
//! string), never a header, so every authenticated call takes it explicitly.

use async_trait::async_trait;

use crate::error::Result;
use crate::story::{NewStory, Story};
use crate::user::{AuthResponse, UserProfile};

/// Default base URL of the public Hack-or-Snooze API.
pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

/// Operations offered by the remote story API.
///
/// Implementations must not retry, cache or rate-limit: failures are
/// returned to the caller as `SnoozeError::Network` or `SnoozeError::Http`.
#[async_trait]
pub trait StoryApi: Send + Sync {
    /// GET /stories
    async fn list_stories(&self) -> Result<Vec<Story>>;

    /// POST /stories
    async fn create_story(&self, token: &str, story: &NewStory) -> Result<Story>;

    /// DELETE /stories/{story_id}
    async fn delete_story(&self, token: &str, story_id: &str) -> Result<()>;

    /// POST /signup
    async fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthResponse>;

    /// POST /login
    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse>;

    /// GET /users/{username}?token=...
    async fn get_user(&self, token: &str, username: &str) -> Result<UserProfile>;

    /// POST /users/{username}/favorites/{story_id}
    async fn add_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()>;

    /// DELETE /users/{username}/favorites/{story_id}
    async fn remove_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()>;
}
