//! In-memory stand-in for the remote story API.
//!
//! Behaves like a tiny Hack-or-Snooze server: it keeps users, tokens,
//! stories and favorites in memory and answers with the same status codes
//! the real service uses (401 bad credentials, 403 not the owner, 404
//! unknown story or user, 409 username taken). `set_offline(true)` turns
//! every call into a `Network` error.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::StoryApi;
use crate::error::{Result, SnoozeError};
use crate::story::{NewStory, Story};
use crate::user::{AuthResponse, UserProfile};

const CREATED_AT: &str = "2024-01-01T00:00:00Z";

/// Builds a story with predictable field values.
pub fn sample_story(story_id: &str, username: &str) -> Story {
    Story {
        story_id: story_id.to_string(),
        title: format!("Story {}", story_id),
        author: format!("Author of {}", story_id),
        url: format!("https://{}.example.com/post", story_id),
        username: username.to_string(),
        created_at: CREATED_AT.to_string(),
    }
}

#[derive(Debug, Clone)]
struct MockUser {
    password: String,
    name: String,
    favorite_ids: Vec<String>,
}

#[derive(Debug, Default)]
struct MockState {
    users: HashMap<String, MockUser>,
    // token -> username
    tokens: HashMap<String, String>,
    // newest first
    stories: Vec<Story>,
    next_id: u64,
    offline: bool,
    calls: Vec<&'static str>,
}

impl MockState {
    fn begin(&mut self, call: &'static str) -> Result<()> {
        self.calls.push(call);
        if self.offline {
            return Err(SnoozeError::network("connection refused"));
        }
        Ok(())
    }

    fn authenticate(&self, token: &str) -> Result<String> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| SnoozeError::http(401, "Invalid token"))
    }

    fn token_of(&self, username: &str) -> Option<String> {
        self.tokens
            .iter()
            .find(|(_, user)| user.as_str() == username)
            .map(|(token, _)| token.clone())
    }

    fn profile(&self, username: &str) -> Result<UserProfile> {
        let user = self
            .users
            .get(username)
            .ok_or_else(|| SnoozeError::http(404, format!("No user: {}", username)))?;

        let favorites = user
            .favorite_ids
            .iter()
            .filter_map(|id| self.stories.iter().find(|s| s.has_id(id)).cloned())
            .collect();
        let own_stories = self
            .stories
            .iter()
            .filter(|s| s.username == username)
            .cloned()
            .collect();

        Ok(UserProfile {
            username: username.to_string(),
            name: user.name.clone(),
            created_at: CREATED_AT.to_string(),
            favorites,
            own_stories,
        })
    }

    fn story_exists(&self, story_id: &str) -> Result<()> {
        if self.stories.iter().any(|s| s.has_id(story_id)) {
            Ok(())
        } else {
            Err(SnoozeError::http(404, format!("No story: {}", story_id)))
        }
    }
}

/// A fake `StoryApi` backed by in-memory state.
#[derive(Debug, Default)]
pub struct MockStoryApi {
    state: Mutex<MockState>,
}

impl MockStoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    /// Registers a user; a token `token-{username}` is issued right away.
    pub fn with_user(self, username: &str, password: &str, name: &str) -> Self {
        {
            let mut state = self.state();
            state.users.insert(
                username.to_string(),
                MockUser {
                    password: password.to_string(),
                    name: name.to_string(),
                    favorite_ids: Vec::new(),
                },
            );
            state
                .tokens
                .insert(format!("token-{}", username), username.to_string());
        }
        self
    }

    /// Appends a story to the end of the server list.
    pub fn with_story(self, story: Story) -> Self {
        self.state().stories.push(story);
        self
    }

    /// Replaces the token issued to `username`.
    pub fn set_token(&self, username: &str, token: &str) {
        let mut state = self.state();
        state.tokens.retain(|_, user| user != username);
        state.tokens.insert(token.to_string(), username.to_string());
    }

    pub fn token_for(&self, username: &str) -> Option<String> {
        self.state().token_of(username)
    }

    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Names of the API operations called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    /// Server-side view of the story list.
    pub fn server_stories(&self) -> Vec<Story> {
        self.state().stories.clone()
    }

    /// Server-side view of a user's favorite ids.
    pub fn server_favorite_ids(&self, username: &str) -> Vec<String> {
        self.state()
            .users
            .get(username)
            .map(|u| u.favorite_ids.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl StoryApi for MockStoryApi {
    async fn list_stories(&self) -> Result<Vec<Story>> {
        let mut state = self.state();
        state.begin("list_stories")?;
        Ok(state.stories.clone())
    }

    async fn create_story(&self, token: &str, story: &NewStory) -> Result<Story> {
        let mut state = self.state();
        state.begin("create_story")?;
        let username = state.authenticate(token)?;

        state.next_id += 1;
        let created = Story {
            story_id: format!("story-{}", state.next_id),
            title: story.title.clone(),
            author: story.author.clone(),
            url: story.url.clone(),
            username,
            created_at: CREATED_AT.to_string(),
        };
        state.stories.insert(0, created.clone());
        Ok(created)
    }

    async fn delete_story(&self, token: &str, story_id: &str) -> Result<()> {
        let mut state = self.state();
        state.begin("delete_story")?;
        let username = state.authenticate(token)?;
        state.story_exists(story_id)?;

        let owned = state
            .stories
            .iter()
            .any(|s| s.has_id(story_id) && s.username == username);
        if !owned {
            return Err(SnoozeError::http(403, "Not the owner of this story"));
        }

        state.stories.retain(|s| !s.has_id(story_id));
        for user in state.users.values_mut() {
            user.favorite_ids.retain(|id| id != story_id);
        }
        Ok(())
    }

    async fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthResponse> {
        let mut state = self.state();
        state.begin("signup")?;
        if state.users.contains_key(username) {
            return Err(SnoozeError::http(409, "Username already taken"));
        }

        state.users.insert(
            username.to_string(),
            MockUser {
                password: password.to_string(),
                name: name.to_string(),
                favorite_ids: Vec::new(),
            },
        );
        let token = format!("token-{}", username);
        state.tokens.insert(token.clone(), username.to_string());

        Ok(AuthResponse {
            user: state.profile(username)?,
            token,
        })
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let mut state = self.state();
        state.begin("login")?;
        let valid = state
            .users
            .get(username)
            .is_some_and(|u| u.password == password);
        if !valid {
            return Err(SnoozeError::http(401, "Invalid credentials"));
        }

        let token = state
            .token_of(username)
            .unwrap_or_else(|| format!("token-{}", username));
        state.tokens.insert(token.clone(), username.to_string());

        Ok(AuthResponse {
            user: state.profile(username)?,
            token,
        })
    }

    async fn get_user(&self, token: &str, username: &str) -> Result<UserProfile> {
        let mut state = self.state();
        state.begin("get_user")?;
        state.authenticate(token)?;
        state.profile(username)
    }

    async fn add_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()> {
        let mut state = self.state();
        state.begin("add_favorite")?;
        let caller = state.authenticate(token)?;
        if caller != username {
            return Err(SnoozeError::http(403, "Cannot modify another user"));
        }
        state.story_exists(story_id)?;

        if let Some(user) = state.users.get_mut(username)
            && !user.favorite_ids.iter().any(|id| id == story_id)
        {
            user.favorite_ids.push(story_id.to_string());
        }
        Ok(())
    }

    async fn remove_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()> {
        let mut state = self.state();
        state.begin("remove_favorite")?;
        let caller = state.authenticate(token)?;
        if caller != username {
            return Err(SnoozeError::http(403, "Cannot modify another user"));
        }
        state.story_exists(story_id)?;

        if let Some(user) = state.users.get_mut(username) {
            user.favorite_ids.retain(|id| id != story_id);
        }
        Ok(())
    }
}
