//! Story domain models.

mod list;
mod model;

pub use list::StoryList;
pub use model::{NewStory, Story};

/// Keeps the first story for each id, preserving order.
pub(crate) fn dedup_by_id(stories: Vec<Story>) -> Vec<Story> {
    let mut seen = std::collections::HashSet::new();
    stories
        .into_iter()
        .filter(|s| seen.insert(s.story_id.clone()))
        .collect()
}
