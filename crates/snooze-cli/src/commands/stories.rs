use anyhow::Result;
use colored::Colorize;
use snooze_application::AppController;
use snooze_core::story::NewStory;

use crate::render;

pub fn list(controller: &AppController) -> Result<()> {
    println!(
        "{}",
        render::story_list(&controller.all_stories(), render::NO_STORIES)
    );
    Ok(())
}

pub fn mine(controller: &AppController) -> Result<()> {
    println!(
        "{}",
        render::story_list(&controller.own_stories()?, render::NO_OWN_STORIES)
    );
    Ok(())
}

pub async fn submit(
    controller: &mut AppController,
    title: String,
    author: String,
    url: String,
) -> Result<()> {
    let story = controller
        .submit_story(NewStory::new(title, author, url))
        .await?;
    println!(
        "{}",
        format!("Submitted \"{}\" [{}]", story.title, story.story_id).green()
    );
    Ok(())
}

pub async fn delete(controller: &mut AppController, story_id: &str) -> Result<()> {
    controller.delete_story(story_id).await?;
    println!("{}", format!("Deleted story {}", story_id).green());
    Ok(())
}
