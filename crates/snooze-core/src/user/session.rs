//! The authenticated user session.

use tracing::{debug, info, warn};

use super::model::{AuthResponse, UserProfile};
use crate::api::StoryApi;
use crate::credentials::StoredCredentials;
use crate::error::Result;
use crate::story::{Story, dedup_by_id};

/// The logged-in user: identity, token, own stories and favorites.
///
/// `own_stories` and `favorites` are independent of each other and of the
/// global `StoryList`; removing a story from one does not touch the others.
/// Neither list ever holds two stories with the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub username: String,
    /// Display name
    pub name: String,
    pub created_at: String,
    pub login_token: String,
    own_stories: Vec<Story>,
    favorites: Vec<Story>,
}

impl UserSession {
    /// Builds a session from an API profile and the token that goes with it.
    pub fn from_profile(profile: UserProfile, token: impl Into<String>) -> Self {
        Self {
            username: profile.username,
            name: profile.name,
            created_at: profile.created_at,
            login_token: token.into(),
            own_stories: dedup_by_id(profile.own_stories),
            favorites: dedup_by_id(profile.favorites),
        }
    }

    fn from_auth(response: AuthResponse) -> Self {
        Self::from_profile(response.user, response.token)
    }

    /// Registers a new account and returns its session.
    pub async fn signup(
        api: &dyn StoryApi,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Self> {
        let response = api.signup(username, password, name).await?;
        info!("Signed up as {}", response.user.username);
        Ok(Self::from_auth(response))
    }

    /// Logs in with a username and password.
    pub async fn login(api: &dyn StoryApi, username: &str, password: &str) -> Result<Self> {
        let response = api.login(username, password).await?;
        info!("Logged in as {}", response.user.username);
        Ok(Self::from_auth(response))
    }

    /// Rebuilds a session from a remembered token and username.
    ///
    /// Best-effort: any failure (network, rejected token, unknown user) is
    /// logged and reported as `None`, meaning "not logged in".
    pub async fn restore(api: &dyn StoryApi, token: &str, username: &str) -> Option<Self> {
        match api.get_user(token, username).await {
            Ok(profile) => {
                info!("Restored session for {}", profile.username);
                Some(Self::from_profile(profile, token))
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Remembered token for {} was rejected: {}", username, e);
                None
            }
            Err(e) => {
                warn!("Could not restore session for {}: {}", username, e);
                None
            }
        }
    }

    /// The user's own submitted stories, newest first.
    pub fn own_stories(&self) -> &[Story] {
        &self.own_stories
    }

    /// The user's favorited stories in the order they were favorited.
    pub fn favorites(&self) -> &[Story] {
        &self.favorites
    }

    /// The persisted form of this session.
    pub fn credentials(&self) -> StoredCredentials {
        StoredCredentials::new(self.login_token.clone(), self.username.clone())
    }

    /// Marks a story as favorite.
    ///
    /// The local list is updated before the request is sent and is not
    /// rolled back if the request fails.
    pub async fn add_favorite(&mut self, api: &dyn StoryApi, story: &Story) -> Result<()> {
        if !self.is_favorite(story) {
            self.favorites.push(story.clone());
        }
        debug!("Adding favorite {} for {}", story.story_id, self.username);
        api.add_favorite(&self.login_token, &self.username, &story.story_id)
            .await
    }

    /// Unmarks a favorite story.
    ///
    /// Same contract as [`Self::add_favorite`]: local first, no rollback.
    pub async fn remove_favorite(&mut self, api: &dyn StoryApi, story: &Story) -> Result<()> {
        self.favorites.retain(|s| !s.has_id(&story.story_id));
        debug!("Removing favorite {} for {}", story.story_id, self.username);
        api.remove_favorite(&self.login_token, &self.username, &story.story_id)
            .await
    }

    /// Whether the story is among the favorites (compared by id).
    pub fn is_favorite(&self, story: &Story) -> bool {
        self.favorites.iter().any(|s| s.has_id(&story.story_id))
    }

    /// Whether the story is among the user's own stories (compared by id).
    pub fn is_own_story(&self, story: &Story) -> bool {
        self.own_stories.iter().any(|s| s.has_id(&story.story_id))
    }

    /// Account creation date (`YYYY-MM-DD`).
    ///
    /// Falls back to the first ten characters of `created_at` when it is not
    /// valid RFC 3339.
    pub fn account_date(&self) -> String {
        match chrono::DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(ts) => ts.date_naive().format("%Y-%m-%d").to_string(),
            Err(_) => self.created_at.chars().take(10).collect(),
        }
    }

    /// Puts a freshly created story at the front of the own-stories list.
    pub(crate) fn insert_own_story(&mut self, story: Story) {
        self.own_stories.retain(|s| !s.has_id(&story.story_id));
        self.own_stories.insert(0, story);
    }

    /// Drops a deleted story from own stories and favorites.
    pub(crate) fn forget_story(&mut self, story_id: &str) {
        self.own_stories.retain(|s| !s.has_id(story_id));
        self.favorites.retain(|s| !s.has_id(story_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockStoryApi, sample_story};
    use std::collections::HashSet;

    fn alice_profile() -> UserProfile {
        UserProfile {
            username: "alice".to_string(),
            name: "Alice".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            favorites: vec![],
            own_stories: vec![],
        }
    }

    fn favorite_ids(session: &UserSession) -> HashSet<String> {
        session
            .favorites()
            .iter()
            .map(|s| s.story_id.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_login_builds_empty_session() {
        let api = MockStoryApi::new().with_user("alice", "pw", "Alice");
        api.set_token("alice", "tok1");

        let session = UserSession::login(&api, "alice", "pw").await.unwrap();

        assert_eq!(session.username, "alice");
        assert_eq!(session.name, "Alice");
        assert_eq!(session.login_token, "tok1");
        assert!(session.favorites().is_empty());
        assert!(session.own_stories().is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password_propagates_http_error() {
        let api = MockStoryApi::new().with_user("alice", "pw", "Alice");

        let err = UserSession::login(&api, "alice", "nope").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_signup_then_duplicate_signup() {
        let api = MockStoryApi::new();

        let session = UserSession::signup(&api, "bob", "pw", "Bob").await.unwrap();
        assert_eq!(session.username, "bob");
        assert_eq!(session.name, "Bob");
        assert!(!session.login_token.is_empty());

        let err = UserSession::signup(&api, "bob", "pw", "Bob").await.unwrap_err();
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let api = MockStoryApi::new().with_user("alice", "pw", "Alice");
        let token = api.token_for("alice").unwrap();

        let session = UserSession::restore(&api, &token, "alice").await.unwrap();
        assert_eq!(session.username, "alice");
        assert_eq!(session.login_token, token);
    }

    #[tokio::test]
    async fn test_restore_with_invalid_token_is_none() {
        let api = MockStoryApi::new().with_user("alice", "pw", "Alice");

        assert!(UserSession::restore(&api, "expired", "alice").await.is_none());
        assert!(UserSession::restore(&api, "expired", "nobody").await.is_none());
    }

    #[tokio::test]
    async fn test_restore_distinguishes_rejected_token_from_transport_failure() {
        let api = MockStoryApi::new().with_user("alice", "pw", "Alice");

        let rejected = api.get_user("expired", "alice").await.unwrap_err();
        assert!(rejected.is_unauthorized());
        assert!(UserSession::restore(&api, "expired", "alice").await.is_none());

        api.set_offline(true);
        let offline = api.get_user("expired", "alice").await.unwrap_err();
        assert!(!offline.is_unauthorized());
        assert!(UserSession::restore(&api, "expired", "alice").await.is_none());
    }

    #[tokio::test]
    async fn test_restore_when_offline_is_none() {
        let api = MockStoryApi::new().with_user("alice", "pw", "Alice");
        let token = api.token_for("alice").unwrap();
        api.set_offline(true);

        assert!(UserSession::restore(&api, &token, "alice").await.is_none());
    }

    #[tokio::test]
    async fn test_add_then_remove_favorite_restores_set() {
        let story = sample_story("s1", "carol");
        let other = sample_story("s2", "carol");
        let api = MockStoryApi::new()
            .with_user("alice", "pw", "Alice")
            .with_story(story.clone())
            .with_story(other.clone());
        let mut session = UserSession::login(&api, "alice", "pw").await.unwrap();
        session.add_favorite(&api, &other).await.unwrap();
        let before = favorite_ids(&session);

        session.add_favorite(&api, &story).await.unwrap();
        assert!(session.is_favorite(&story));
        session.remove_favorite(&api, &story).await.unwrap();

        assert!(!session.is_favorite(&story));
        assert_eq!(favorite_ids(&session), before);
    }

    #[tokio::test]
    async fn test_add_favorite_twice_keeps_one_entry() {
        let story = sample_story("s1", "carol");
        let api = MockStoryApi::new()
            .with_user("alice", "pw", "Alice")
            .with_story(story.clone());
        let mut session = UserSession::login(&api, "alice", "pw").await.unwrap();

        session.add_favorite(&api, &story).await.unwrap();
        session.add_favorite(&api, &story).await.unwrap();

        assert_eq!(session.favorites().len(), 1);
    }

    #[tokio::test]
    async fn test_add_favorite_is_optimistic_without_rollback() {
        let story = sample_story("s1", "carol");
        let api = MockStoryApi::new()
            .with_user("alice", "pw", "Alice")
            .with_story(story.clone());
        let mut session = UserSession::login(&api, "alice", "pw").await.unwrap();
        api.set_offline(true);

        let err = session.add_favorite(&api, &story).await.unwrap_err();

        assert!(err.is_network());
        assert!(session.is_favorite(&story));
    }

    #[tokio::test]
    async fn test_remove_favorite_is_optimistic_without_rollback() {
        let story = sample_story("s1", "carol");
        let api = MockStoryApi::new()
            .with_user("alice", "pw", "Alice")
            .with_story(story.clone());
        let mut session = UserSession::login(&api, "alice", "pw").await.unwrap();
        session.add_favorite(&api, &story).await.unwrap();
        api.set_offline(true);

        assert!(session.remove_favorite(&api, &story).await.is_err());
        assert!(!session.is_favorite(&story));
    }

    #[test]
    fn test_is_favorite_false_for_never_favorited() {
        let session = UserSession::from_profile(alice_profile(), "tok1");
        assert!(!session.is_favorite(&sample_story("s9", "carol")));
    }

    #[test]
    fn test_from_profile_drops_duplicate_ids() {
        let mut profile = alice_profile();
        profile.favorites = vec![sample_story("s1", "carol"), sample_story("s1", "carol")];
        profile.own_stories = vec![sample_story("s2", "alice"), sample_story("s2", "alice")];

        let session = UserSession::from_profile(profile, "tok1");
        assert_eq!(session.favorites().len(), 1);
        assert_eq!(session.own_stories().len(), 1);
    }

    #[test]
    fn test_account_date() {
        let session = UserSession::from_profile(alice_profile(), "tok1");
        assert_eq!(session.account_date(), "2024-01-01");

        let mut profile = alice_profile();
        profile.created_at = "2023-12-31 not rfc3339".to_string();
        let session = UserSession::from_profile(profile, "tok1");
        assert_eq!(session.account_date(), "2023-12-31");
    }

    #[test]
    fn test_credentials() {
        let session = UserSession::from_profile(alice_profile(), "tok1");
        let creds = session.credentials();
        assert_eq!(creds.token, "tok1");
        assert_eq!(creds.username, "alice");
    }
}
