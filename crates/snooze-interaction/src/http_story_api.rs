//! HttpStoryApi - REST implementation of `StoryApi` for the Hack-or-Snooze service.
//!
//! Every call is a single request: no retries, no client-side timeout and no
//! caching. The token travels in the JSON body (or the query string for
//! `GET /users/{username}`), never in an Authorization header.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snooze_core::api::StoryApi;
use snooze_core::config::ClientConfig;
use snooze_core::error::{Result, SnoozeError};
use snooze_core::story::{NewStory, Story};
use snooze_core::user::{AuthResponse, UserProfile};
use url::Url;

/// `StoryApi` over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpStoryApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateStoryBody<'a> {
    token: &'a str,
    story: &'a NewStory,
}

#[derive(Debug, Serialize)]
struct SignupUser<'a> {
    username: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginUser<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct UserBody<T> {
    user: T,
}

#[derive(Debug, Deserialize)]
struct StoriesResponse {
    stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct StoryResponse {
    story: Story,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: UserProfile,
}

impl HttpStoryApi {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| SnoozeError::config(format!("Base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and fails with `Http` on a non-2xx status.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!("[HttpStoryApi] API error ({}): {}", status, body);
            return Err(SnoozeError::http(status.as_u16(), body));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        self.send(request).await.map(|_| ())
    }
}

#[async_trait]
impl StoryApi for HttpStoryApi {
    async fn list_stories(&self) -> Result<Vec<Story>> {
        let url = self.endpoint(&["stories"])?;
        tracing::debug!("[HttpStoryApi] GET {}", url);

        let response: StoriesResponse = self.send_json(self.client.get(url)).await?;
        Ok(response.stories)
    }

    async fn create_story(&self, token: &str, story: &NewStory) -> Result<Story> {
        let url = self.endpoint(&["stories"])?;
        tracing::debug!("[HttpStoryApi] POST {} ({})", url, story.title);

        let body = CreateStoryBody { token, story };
        let response: StoryResponse = self.send_json(self.client.post(url).json(&body)).await?;
        Ok(response.story)
    }

    async fn delete_story(&self, token: &str, story_id: &str) -> Result<()> {
        let url = self.endpoint(&["stories", story_id])?;
        tracing::debug!("[HttpStoryApi] DELETE {}", url);

        self.send_empty(self.client.delete(url).json(&TokenBody { token }))
            .await
    }

    async fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthResponse> {
        let url = self.endpoint(&["signup"])?;
        tracing::debug!("[HttpStoryApi] POST {} ({})", url, username);

        let body = UserBody {
            user: SignupUser {
                username,
                password,
                name,
            },
        };
        self.send_json(self.client.post(url).json(&body)).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let url = self.endpoint(&["login"])?;
        tracing::debug!("[HttpStoryApi] POST {} ({})", url, username);

        let body = UserBody {
            user: LoginUser { username, password },
        };
        self.send_json(self.client.post(url).json(&body)).await
    }

    async fn get_user(&self, token: &str, username: &str) -> Result<UserProfile> {
        let url = self.endpoint(&["users", username])?;
        tracing::debug!("[HttpStoryApi] GET {}", url);

        let response: UserResponse = self
            .send_json(self.client.get(url).query(&[("token", token)]))
            .await?;
        Ok(response.user)
    }

    async fn add_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()> {
        let url = self.endpoint(&["users", username, "favorites", story_id])?;
        tracing::debug!("[HttpStoryApi] POST {}", url);

        self.send_empty(self.client.post(url).json(&TokenBody { token }))
            .await
    }

    async fn remove_favorite(&self, token: &str, username: &str, story_id: &str) -> Result<()> {
        let url = self.endpoint(&["users", username, "favorites", story_id])?;
        tracing::debug!("[HttpStoryApi] DELETE {}", url);

        self.send_empty(self.client.delete(url).json(&TokenBody { token }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let api = HttpStoryApi::new("https://hack-or-snooze-v3.herokuapp.com/");
        let url = api.endpoint(&["users", "alice", "favorites", "s-1"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://hack-or-snooze-v3.herokuapp.com/users/alice/favorites/s-1"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = HttpStoryApi::new("http://localhost:5000/api/v3");
        let url = api.endpoint(&["stories"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/v3/stories");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = HttpStoryApi::new("http://localhost:5000");
        let url = api.endpoint(&["stories", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/stories/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_rejects_bad_base_url() {
        let api = HttpStoryApi::new("not a url");
        assert!(api.endpoint(&["stories"]).unwrap_err().is_validation());
    }

    #[test]
    fn test_create_story_body_shape() {
        let story = NewStory::new("Title", "Author", "https://example.com");
        let body = CreateStoryBody {
            token: "tok",
            story: &story,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "token": "tok",
                "story": {"title": "Title", "author": "Author", "url": "https://example.com"}
            })
        );
    }

    #[test]
    fn test_login_body_shape() {
        let body = UserBody {
            user: LoginUser {
                username: "alice",
                password: "pw",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user": {"username": "alice", "password": "pw"}})
        );
    }
}
