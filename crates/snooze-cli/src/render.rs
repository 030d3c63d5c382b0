//! Plain-text rendering of story and profile views.

use snooze_application::{ProfileView, StoryView};

pub const NO_STORIES: &str = "No stories yet!";
pub const NO_OWN_STORIES: &str = "No stories added by user yet!";
pub const NO_FAVORITES: &str = "No favorites added!";

const INVALID_HOST: &str = "invalid url";
const DELETE_MARKER: &str = "✖";

/// `title (host) by author, posted by username [id]`, preceded by the delete
/// marker on own stories and the favorite star when someone is logged in.
pub fn story_line(view: &StoryView) -> String {
    let mut line = String::new();
    if view.show_delete {
        line.push_str(DELETE_MARKER);
        line.push(' ');
    }
    if view.show_star {
        line.push(if view.is_favorite { '★' } else { '☆' });
        line.push(' ');
    }
    line.push_str(&format!(
        "{} ({}) by {}, posted by {} [{}]",
        view.title,
        view.host_name.as_deref().unwrap_or(INVALID_HOST),
        view.author,
        view.username,
        view.story_id
    ));
    line
}

/// One line per story, or `empty_message` when there are none.
pub fn story_list(views: &[StoryView], empty_message: &str) -> String {
    if views.is_empty() {
        return empty_message.to_string();
    }
    views.iter().map(story_line).collect::<Vec<_>>().join("\n")
}

pub fn profile(view: &ProfileView) -> String {
    format!(
        "Name: {}\nUsername: {}\nAccount Created: {}\nStories: {}\nFavorites: {}",
        view.name, view.username, view.account_created, view.story_count, view.favorite_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use snooze_core::testing::sample_story;

    fn view(host_name: Option<&str>) -> StoryView {
        let story = sample_story("s1", "bob");
        let mut view = StoryView::new(&story, None);
        view.host_name = host_name.map(str::to_string);
        view
    }

    #[test]
    fn test_anonymous_line() {
        assert_eq!(
            story_line(&view(Some("s1.example.com"))),
            "Story s1 (s1.example.com) by Author of s1, posted by bob [s1]"
        );
    }

    #[test]
    fn test_markers() {
        let mut v = view(Some("s1.example.com"));
        v.show_star = true;
        assert!(story_line(&v).starts_with("☆ Story s1"));

        v.is_favorite = true;
        v.show_delete = true;
        assert!(story_line(&v).starts_with("✖ ★ Story s1"));
    }

    #[test]
    fn test_invalid_host_does_not_abort() {
        let lines = story_list(&[view(None), view(Some("ok.example.com"))], NO_STORIES);
        let lines: Vec<&str> = lines.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("(invalid url)"));
        assert!(lines[1].contains("(ok.example.com)"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(story_list(&[], NO_OWN_STORIES), "No stories added by user yet!");
        assert_eq!(story_list(&[], NO_FAVORITES), "No favorites added!");
    }

    #[test]
    fn test_profile() {
        let text = profile(&ProfileView {
            name: "Alice".to_string(),
            username: "alice".to_string(),
            account_created: "2024-01-01".to_string(),
            story_count: 2,
            favorite_count: 0,
        });
        assert!(text.contains("Name: Alice"));
        assert!(text.contains("Username: alice"));
        assert!(text.contains("Account Created: 2024-01-01"));
    }
}
