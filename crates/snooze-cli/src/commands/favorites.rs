use anyhow::Result;
use colored::Colorize;
use snooze_application::AppController;

use crate::render;

pub async fn add(controller: &mut AppController, story_id: &str) -> Result<()> {
    controller.favorite(story_id).await?;
    println!("{}", format!("★ Added {} to favorites", story_id).yellow());
    Ok(())
}

pub async fn remove(controller: &mut AppController, story_id: &str) -> Result<()> {
    controller.unfavorite(story_id).await?;
    println!("☆ Removed {} from favorites", story_id);
    Ok(())
}

pub fn list(controller: &AppController) -> Result<()> {
    println!(
        "{}",
        render::story_list(&controller.favorites()?, render::NO_FAVORITES)
    );
    Ok(())
}
