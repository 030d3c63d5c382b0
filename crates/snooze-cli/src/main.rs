use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use snooze_application::AppController;
use snooze_core::api::StoryApi;
use snooze_core::credentials::CredentialStore;
use snooze_infrastructure::{ConfigService, FileCredentialStore, SnoozePaths};
use snooze_interaction::HttpStoryApi;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "snooze")]
#[command(about = "Snooze - a command-line client for Hack-or-Snooze", long_about = None)]
struct Cli {
    /// Base URL of the story API (overrides config.toml and SNOOZE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory holding config.toml and credentials.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all stories
    Stories,
    /// Create an account and log into it
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long, env = "SNOOZE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Display name
        #[arg(long)]
        name: String,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "SNOOZE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the remembered session
    Logout,
    /// Submit a new story
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        url: String,
    },
    /// Delete one of your stories
    Delete { story_id: String },
    /// Add a story to your favorites
    Favorite { story_id: String },
    /// Remove a story from your favorites
    Unfavorite { story_id: String },
    /// List your favorite stories
    Favorites,
    /// List the stories you submitted
    Mine,
    /// Show your profile
    Profile,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format!("Error: failed to start runtime: {}", e).red());
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = SnoozePaths::new(cli.config_dir.as_deref());
    let mut config = ConfigService::new(&paths)?
        .load()
        .context("Failed to load config.toml")?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    init_tracing(&config.log_level);
    tracing::debug!("[Main] Using API at {}", config.base_url);

    let credential_store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(&paths)?);

    // Logging out only touches local state, so it must not depend on the API
    if let Commands::Logout = cli.command {
        return commands::account::logout(credential_store.as_ref()).await;
    }

    let api: Arc<dyn StoryApi> = Arc::new(HttpStoryApi::from_config(&config));
    let mut controller = AppController::start(api, credential_store)
        .await
        .context("Failed to load stories")?;

    match cli.command {
        Commands::Stories => commands::stories::list(&controller),
        Commands::Signup {
            username,
            password,
            name,
        } => commands::account::signup(&mut controller, &username, &password, &name).await,
        Commands::Login { username, password } => {
            commands::account::login(&mut controller, &username, &password).await
        }
        Commands::Logout => Ok(controller.logout().await?),
        Commands::Submit { title, author, url } => {
            commands::stories::submit(&mut controller, title, author, url).await
        }
        Commands::Delete { story_id } => commands::stories::delete(&mut controller, &story_id).await,
        Commands::Favorite { story_id } => {
            commands::favorites::add(&mut controller, &story_id).await
        }
        Commands::Unfavorite { story_id } => {
            commands::favorites::remove(&mut controller, &story_id).await
        }
        Commands::Favorites => commands::favorites::list(&controller),
        Commands::Mine => commands::stories::mine(&controller),
        Commands::Profile => commands::account::profile(&controller),
    }
}

/// Logs to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore a subscriber that is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
