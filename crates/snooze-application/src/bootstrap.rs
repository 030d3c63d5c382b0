//! Startup: restore the remembered session, then load the story list.

use snooze_core::api::StoryApi;
use snooze_core::credentials::CredentialStore;
use snooze_core::error::Result;
use snooze_core::story::StoryList;
use snooze_core::user::UserSession;

/// Everything the front end renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub story_list: StoryList,
    /// `None` means nobody is logged in.
    pub current_user: Option<UserSession>,
}

impl AppState {
    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Restores the remembered session (if any) and fetches the story list.
///
/// Restore runs first and never fails the bootstrap: unreadable or
/// incomplete credentials and a rejected token all end as "not logged in".
/// A failure to fetch stories is returned.
pub async fn bootstrap(
    api: &dyn StoryApi,
    credential_store: &dyn CredentialStore,
) -> Result<AppState> {
    let current_user = restore_session(api, credential_store).await;

    let story_list = StoryList::fetch_all(api).await?;
    tracing::info!(
        "[Bootstrap] Loaded {} stories ({})",
        story_list.len(),
        match &current_user {
            Some(user) => format!("logged in as {}", user.username),
            None => "not logged in".to_string(),
        }
    );

    Ok(AppState {
        story_list,
        current_user,
    })
}

async fn restore_session(
    api: &dyn StoryApi,
    credential_store: &dyn CredentialStore,
) -> Option<UserSession> {
    let credentials = match credential_store.load().await {
        Ok(Some(credentials)) if credentials.is_complete() => credentials,
        Ok(_) => {
            tracing::debug!("[Bootstrap] No remembered credentials");
            return None;
        }
        Err(e) => {
            tracing::warn!("[Bootstrap] Failed to read remembered credentials: {}", e);
            return None;
        }
    };

    UserSession::restore(api, &credentials.token, &credentials.username).await
}
