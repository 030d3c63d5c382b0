use async_trait::async_trait;
use snooze_application::bootstrap;
use snooze_core::credentials::{CredentialStore, InMemoryCredentialStore, StoredCredentials};
use snooze_core::error::{Result, SnoozeError};
use snooze_core::testing::{MockStoryApi, sample_story};

/// A store whose file can never be read.
struct BrokenCredentialStore;

#[async_trait]
impl CredentialStore for BrokenCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        Err(SnoozeError::io("permission denied"))
    }

    async fn save(&self, _credentials: &StoredCredentials) -> Result<()> {
        Err(SnoozeError::io("permission denied"))
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}

fn api_with_stories() -> MockStoryApi {
    MockStoryApi::new()
        .with_user("alice", "pw", "Alice")
        .with_story(sample_story("s1", "bob"))
        .with_story(sample_story("s2", "alice"))
}

#[tokio::test]
async fn test_restores_then_fetches() {
    let api = api_with_stories();
    let store = InMemoryCredentialStore::with_credentials(StoredCredentials::new(
        "token-alice",
        "alice",
    ));

    let state = bootstrap(&api, &store).await.unwrap();

    assert_eq!(api.calls(), vec!["get_user", "list_stories"]);
    let user = state.current_user.expect("session should be restored");
    assert_eq!(user.username, "alice");
    assert_eq!(user.login_token, "token-alice");
    assert_eq!(user.own_stories().len(), 1);
    assert_eq!(state.story_list.len(), 2);
}

#[tokio::test]
async fn test_no_credentials_skips_restore() {
    let api = api_with_stories();
    let store = InMemoryCredentialStore::new();

    let state = bootstrap(&api, &store).await.unwrap();

    assert_eq!(api.calls(), vec!["list_stories"]);
    assert!(!state.is_logged_in());
    assert_eq!(state.story_list.len(), 2);
}

#[tokio::test]
async fn test_incomplete_credentials_skip_restore() {
    let api = api_with_stories();
    let store = InMemoryCredentialStore::with_credentials(StoredCredentials::new("token-alice", ""));

    let state = bootstrap(&api, &store).await.unwrap();

    assert_eq!(api.calls(), vec!["list_stories"]);
    assert!(state.current_user.is_none());
}

#[tokio::test]
async fn test_rejected_token_means_logged_out() {
    let api = api_with_stories();
    let store = InMemoryCredentialStore::with_credentials(StoredCredentials::new("stale", "alice"));

    let state = bootstrap(&api, &store).await.unwrap();

    assert!(state.current_user.is_none());
    assert_eq!(state.story_list.len(), 2);
}

#[tokio::test]
async fn test_unreadable_store_means_logged_out() {
    let api = api_with_stories();

    let state = bootstrap(&api, &BrokenCredentialStore).await.unwrap();

    assert!(state.current_user.is_none());
    assert_eq!(api.calls(), vec!["list_stories"]);
}

#[tokio::test]
async fn test_story_fetch_failure_is_returned() {
    let api = api_with_stories();
    api.set_offline(true);

    let err = bootstrap(&api, &InMemoryCredentialStore::new())
        .await
        .unwrap_err();
    assert!(err.is_network());
}
