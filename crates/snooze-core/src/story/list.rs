//! The global story list.

use tracing::{debug, info};

use super::dedup_by_id;
use super::model::{NewStory, Story};
use crate::api::StoryApi;
use crate::error::Result;
use crate::user::UserSession;

/// Ordered list of stories as shown on the front page.
///
/// Order is the server's order, with newly submitted stories inserted at the
/// front. No two entries share an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryList {
    stories: Vec<Story>,
}

impl StoryList {
    /// Creates a list from stories in display order.
    ///
    /// When an id repeats, the first occurrence wins.
    pub fn new(stories: Vec<Story>) -> Self {
        Self {
            stories: dedup_by_id(stories),
        }
    }

    /// Fetches the global list from the API.
    ///
    /// Fails as a whole if the request fails; there are no partial results.
    pub async fn fetch_all(api: &dyn StoryApi) -> Result<Self> {
        let stories = api.list_stories().await?;
        info!("Fetched {} stories", stories.len());
        Ok(Self::new(stories))
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Looks a story up by id.
    pub fn find(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.has_id(story_id))
    }

    /// Submits a story as `session`'s user.
    ///
    /// On success the new story is put at the front of this list and of the
    /// session's own stories, and returned. On failure nothing changes
    /// locally.
    pub async fn add_story(
        &mut self,
        api: &dyn StoryApi,
        session: &mut UserSession,
        new_story: NewStory,
    ) -> Result<Story> {
        let story = api.create_story(&session.login_token, &new_story).await?;
        debug!("Created story {} ({})", story.story_id, story.title);

        self.stories.retain(|s| !s.has_id(&story.story_id));
        self.stories.insert(0, story.clone());
        session.insert_own_story(story.clone());

        Ok(story)
    }

    /// Deletes a story as `session`'s user.
    ///
    /// On success the id is filtered out of this list, the session's own
    /// stories and the session's favorites; collections that never held it
    /// are left as they are. On failure nothing changes locally.
    pub async fn remove_story(
        &mut self,
        api: &dyn StoryApi,
        session: &mut UserSession,
        story_id: &str,
    ) -> Result<()> {
        api.delete_story(&session.login_token, story_id).await?;
        debug!("Deleted story {}", story_id);

        self.stories.retain(|s| !s.has_id(story_id));
        session.forget_story(story_id);

        Ok(())
    }
}
