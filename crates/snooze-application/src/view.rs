//! Plain-data view models built from `AppState`.

use snooze_core::story::Story;
use snooze_core::user::UserSession;

/// One story as a list shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryView {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    /// `None` when the URL has no usable host.
    pub host_name: Option<String>,
    /// A favorite star is shown only when someone is logged in.
    pub show_star: bool,
    pub is_favorite: bool,
    /// Only the poster may delete a story.
    pub show_delete: bool,
}

impl StoryView {
    pub fn new(story: &Story, user: Option<&UserSession>) -> Self {
        Self {
            story_id: story.story_id.clone(),
            title: story.title.clone(),
            author: story.author.clone(),
            url: story.url.clone(),
            username: story.username.clone(),
            host_name: story.host_name().ok(),
            show_star: user.is_some(),
            is_favorite: user.is_some_and(|u| u.is_favorite(story)),
            show_delete: user.is_some_and(|u| u.is_own_story(story)),
        }
    }

    pub fn list(stories: &[Story], user: Option<&UserSession>) -> Vec<Self> {
        stories.iter().map(|story| Self::new(story, user)).collect()
    }
}

/// The logged-in user's profile block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub username: String,
    /// `YYYY-MM-DD`
    pub account_created: String,
    pub story_count: usize,
    pub favorite_count: usize,
}

impl From<&UserSession> for ProfileView {
    fn from(user: &UserSession) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            account_created: user.account_date(),
            story_count: user.own_stories().len(),
            favorite_count: user.favorites().len(),
        }
    }
}
