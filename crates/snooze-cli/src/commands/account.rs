use anyhow::Result;
use colored::Colorize;
use snooze_application::AppController;
use snooze_core::credentials::CredentialStore;

use crate::render;

pub async fn signup(
    controller: &mut AppController,
    username: &str,
    password: &str,
    name: &str,
) -> Result<()> {
    let user = controller.signup(username, password, name).await?;
    println!("{}", format!("Welcome, {}! You are now logged in.", user.name).green());
    Ok(())
}

pub async fn login(controller: &mut AppController, username: &str, password: &str) -> Result<()> {
    let user = controller.login(username, password).await?;
    println!("{}", format!("Logged in as {}.", user.username).green());
    Ok(())
}

/// Forgets the remembered session without contacting the API.
pub async fn logout(credential_store: &dyn CredentialStore) -> Result<()> {
    // An unreadable file is still cleared below
    let remembered = credential_store.load().await.ok().flatten();
    credential_store.clear().await?;
    match remembered {
        Some(credentials) => {
            tracing::info!("[Logout] Cleared {}", credentials);
            println!("{}", format!("Logged out {}.", credentials.username).green());
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

pub fn profile(controller: &AppController) -> Result<()> {
    println!("{}", render::profile(&controller.profile()?));
    Ok(())
}
