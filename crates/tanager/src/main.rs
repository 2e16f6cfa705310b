// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tanager - command-line client for the Tanager social network.
//!
//! This is the binary entry point: it loads and validates configuration,
//! restores the persisted session, and dispatches subcommands.

mod app;
mod commands;
mod output;
mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::App;

/// Tanager - command-line client for the Tanager social network.
#[derive(Parser, Debug)]
#[command(name = "tanager", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in (prompts for the password).
    Login { username: String },
    /// Create an account and sign in.
    Register { username: String },
    /// Sign out and clear the persisted session.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// Print the feed once.
    Feed {
        /// Show posts from followed users only.
        #[arg(long)]
        following: bool,
    },
    /// Create a post.
    Post {
        content: String,
        /// Post as a reply to an existing post.
        #[arg(long, value_name = "ID")]
        reply_to: Option<i64>,
        /// Attach an image file.
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
    },
    /// Toggle your like on a post.
    Like { id: i64 },
    /// Toggle your repost of a post.
    Repost { id: i64 },
    /// Delete your post (asks for confirmation).
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Share a post into a conversation.
    Share { id: i64, to: String },
    /// Search for users.
    Search { query: String },
    /// Toggle following a user.
    Follow { username: String },
    /// Update your profile.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Show notifications (marks them read).
    Activity {
        /// Only show one kind: follow, like, repost, or reply.
        #[arg(long)]
        kind: Option<String>,
    },
    /// List conversations and unread counts.
    Contacts,
    /// Print the conversation with a user (marks it read).
    Chat { username: String },
    /// Send a direct message.
    Send { username: String, text: String },
    /// Poll the feed until Ctrl-C, printing updates.
    Watch {
        /// Watch the following feed instead.
        #[arg(long)]
        following: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    /// Set display name and/or bio.
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Upload a new avatar image.
    Avatar { path: PathBuf },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match tanager_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            tanager_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let app = match App::init(config).await {
        Ok(app) => app,
        Err(e) => {
            output::error(&e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login { username } => commands::login(&app, &username).await,
        Commands::Register { username } => commands::register(&app, &username).await,
        Commands::Logout => commands::logout(&app).await,
        Commands::Whoami => commands::whoami(&app).await,
        Commands::Feed { following } => commands::feed(&app, following).await,
        Commands::Post {
            content,
            reply_to,
            image,
        } => commands::post(&app, &content, reply_to, image.as_deref()).await,
        Commands::Like { id } => commands::like(&app, id).await,
        Commands::Repost { id } => commands::repost(&app, id).await,
        Commands::Delete { id, yes } => commands::delete(&app, id, yes).await,
        Commands::Share { id, to } => commands::share(&app, id, &to).await,
        Commands::Search { query } => commands::search(&app, &query).await,
        Commands::Follow { username } => commands::follow(&app, &username).await,
        Commands::Profile { action } => match action {
            ProfileAction::Set { name, bio } => commands::profile_set(&app, name, bio).await,
            ProfileAction::Avatar { path } => commands::profile_avatar(&app, &path).await,
        },
        Commands::Activity { kind } => commands::activity(&app, kind.as_deref()).await,
        Commands::Contacts => commands::contacts(&app).await,
        Commands::Chat { username } => commands::chat(&app, &username).await,
        Commands::Send { username, text } => commands::send(&app, &username, &text).await,
        Commands::Watch { following } => watch::run(&app, following).await,
    };

    if let Err(e) = result {
        output::error(&e);
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tanager={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
