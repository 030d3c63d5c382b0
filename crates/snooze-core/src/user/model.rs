//! UserProfile and authentication records.
//!
//! These mirror the user payloads returned by the remote API.

use serde::{Deserialize, Serialize};

use crate::story::Story;

/// User profile as returned by `/signup`, `/login` and `/users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    /// Display name
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub favorites: Vec<Story>,
    #[serde(default)]
    pub own_stories: Vec<Story>,
}

/// Successful signup/login response: the profile plus a fresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_without_story_lists() {
        let json = r#"{
            "user": {
                "username": "alice",
                "name": "Alice",
                "createdAt": "2024-01-01T00:00:00Z"
            },
            "token": "tok1"
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "tok1");
        assert_eq!(response.user.username, "alice");
        assert!(response.user.favorites.is_empty());
        assert!(response.user.own_stories.is_empty());
    }

    #[test]
    fn test_profile_with_story_lists() {
        let json = r#"{
            "username": "bob",
            "name": "Bob",
            "createdAt": "2023-05-05T12:00:00Z",
            "favorites": [{
                "storyId": "s1", "title": "t", "author": "a",
                "url": "https://a.example", "username": "carol",
                "createdAt": "2023-05-06T00:00:00Z"
            }],
            "ownStories": []
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.favorites.len(), 1);
        assert_eq!(profile.favorites[0].story_id, "s1");
        assert!(profile.own_stories.is_empty());
    }
}
