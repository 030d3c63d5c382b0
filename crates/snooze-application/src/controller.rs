//! AppController - the operations a front end triggers and the views it renders.

use std::sync::Arc;

use snooze_core::api::StoryApi;
use snooze_core::credentials::CredentialStore;
use snooze_core::error::{Result, SnoozeError};
use snooze_core::story::{NewStory, Story, StoryList};
use snooze_core::user::UserSession;

use crate::bootstrap::{AppState, bootstrap};
use crate::view::{ProfileView, StoryView};

/// Owns the application state together with the API and credential handles.
///
/// Every mutation goes through `&mut self`; nothing here is shared between
/// tasks.
pub struct AppController {
    api: Arc<dyn StoryApi>,
    credential_store: Arc<dyn CredentialStore>,
    state: AppState,
}

impl AppController {
    pub fn new(
        api: Arc<dyn StoryApi>,
        credential_store: Arc<dyn CredentialStore>,
        state: AppState,
    ) -> Self {
        Self {
            api,
            credential_store,
            state,
        }
    }

    /// Runs [`bootstrap`] and wraps the resulting state.
    pub async fn start(
        api: Arc<dyn StoryApi>,
        credential_store: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let state = bootstrap(api.as_ref(), credential_store.as_ref()).await?;
        Ok(Self::new(api, credential_store, state))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&UserSession> {
        self.state.current_user.as_ref()
    }

    fn require_user(&self) -> Result<&UserSession> {
        self.current_user().ok_or(SnoozeError::NotAuthenticated)
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    /// Logs in and remembers the token for later runs.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&UserSession> {
        let session = UserSession::login(self.api.as_ref(), username, password).await?;
        self.remember(session).await
    }

    /// Creates an account, logs into it and remembers the token.
    pub async fn signup(
        &mut self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<&UserSession> {
        let session = UserSession::signup(self.api.as_ref(), username, password, name).await?;
        self.remember(session).await
    }

    /// The session is active for this run even if persisting it fails.
    async fn remember(&mut self, session: UserSession) -> Result<&UserSession> {
        let credentials = session.credentials();
        let session = self.state.current_user.insert(session);
        self.credential_store.save(&credentials).await?;
        Ok(session)
    }

    /// Drops the session and forgets the remembered credentials.
    pub async fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.state.current_user.take() {
            tracing::info!("[AppController] Logged out {}", user.username);
        }
        self.credential_store.clear().await
    }

    // ------------------------------------------------------------------
    // Stories
    // ------------------------------------------------------------------

    /// Re-fetches the global story list.
    pub async fn refresh_stories(&mut self) -> Result<()> {
        self.state.story_list = StoryList::fetch_all(self.api.as_ref()).await?;
        Ok(())
    }

    /// Posts a story as the current user.
    pub async fn submit_story(&mut self, new_story: NewStory) -> Result<Story> {
        for (field, value) in [
            ("title", &new_story.title),
            ("author", &new_story.author),
            ("url", &new_story.url),
        ] {
            if value.trim().is_empty() {
                return Err(SnoozeError::validation(format!("{} must not be empty", field)));
            }
        }

        let AppState {
            story_list,
            current_user,
        } = &mut self.state;
        let user = current_user.as_mut().ok_or(SnoozeError::NotAuthenticated)?;
        story_list.add_story(self.api.as_ref(), user, new_story).await
    }

    /// Deletes one of the current user's stories.
    pub async fn delete_story(&mut self, story_id: &str) -> Result<()> {
        let AppState {
            story_list,
            current_user,
        } = &mut self.state;
        let user = current_user.as_mut().ok_or(SnoozeError::NotAuthenticated)?;
        story_list.remove_story(self.api.as_ref(), user, story_id).await?;
        tracing::info!("[AppController] Deleted story {}", story_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Flips the favorite state of a story and returns the new state.
    pub async fn toggle_favorite(&mut self, story_id: &str) -> Result<bool> {
        let story = self.lookup_story(story_id)?;
        let favorite = !self.require_user()?.is_favorite(&story);
        self.apply_favorite(&story, favorite).await?;
        Ok(favorite)
    }

    /// Marks a story as favorite; already-favorited stories are still sent.
    pub async fn favorite(&mut self, story_id: &str) -> Result<()> {
        let story = self.lookup_story(story_id)?;
        self.apply_favorite(&story, true).await
    }

    pub async fn unfavorite(&mut self, story_id: &str) -> Result<()> {
        let story = self.lookup_story(story_id)?;
        self.apply_favorite(&story, false).await
    }

    async fn apply_favorite(&mut self, story: &Story, favorite: bool) -> Result<()> {
        let user = self
            .state
            .current_user
            .as_mut()
            .ok_or(SnoozeError::NotAuthenticated)?;
        if favorite {
            user.add_favorite(self.api.as_ref(), story).await
        } else {
            user.remove_favorite(self.api.as_ref(), story).await
        }
    }

    /// Finds a story in the global list, then the user's own stories, then favorites.
    fn lookup_story(&self, story_id: &str) -> Result<Story> {
        let user = self.require_user()?;
        self.state
            .story_list
            .find(story_id)
            .or_else(|| user.own_stories().iter().find(|s| s.has_id(story_id)))
            .or_else(|| user.favorites().iter().find(|s| s.has_id(story_id)))
            .cloned()
            .ok_or_else(|| SnoozeError::not_found("Story", story_id))
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn all_stories(&self) -> Vec<StoryView> {
        StoryView::list(self.state.story_list.stories(), self.current_user())
    }

    pub fn own_stories(&self) -> Result<Vec<StoryView>> {
        let user = self.require_user()?;
        Ok(StoryView::list(user.own_stories(), Some(user)))
    }

    pub fn favorites(&self) -> Result<Vec<StoryView>> {
        let user = self.require_user()?;
        Ok(StoryView::list(user.favorites(), Some(user)))
    }

    pub fn profile(&self) -> Result<ProfileView> {
        self.require_user().map(ProfileView::from)
    }
}
