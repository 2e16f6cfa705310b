// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One function per subcommand.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use tanager_core::{
    ActivityKind, Credentials, PostDraft, ProfileUpdate, TanagerError, Upload,
};
use tanager_sync::{
    ActivityStore, ContactsStore, ConversationStore, FeedStore, FollowControl, FollowState,
};

use crate::app::App;
use crate::output;

pub async fn login(app: &App, username: &str) -> Result<(), TanagerError> {
    let credentials = prompt_credentials(username)?;
    let identity = app.api.login(&credentials).await?;
    app.session.login(identity.clone()).await?;
    println!("signed in as {}", format!("@{}", identity.username).cyan());
    Ok(())
}

pub async fn register(app: &App, username: &str) -> Result<(), TanagerError> {
    let credentials = prompt_credentials(username)?;
    let identity = app.api.register(&credentials).await?;
    app.session.login(identity.clone()).await?;
    println!("account created, signed in as {}", format!("@{}", identity.username).cyan());
    Ok(())
}

pub async fn logout(app: &App) -> Result<(), TanagerError> {
    app.session.logout().await?;
    println!("signed out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    println!("{}", format!("@{}", identity.username).cyan().bold());
    if let Some(name) = &identity.display_name {
        println!("{name}");
    }
    if let Some(bio) = &identity.bio {
        println!("{bio}");
    }
    Ok(())
}

pub async fn feed(app: &App, following: bool) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let posts = if following {
        app.api.following_feed(&identity.username).await?
    } else {
        app.api.feed().await?
    };
    output::posts(&posts, &identity.username);
    Ok(())
}

pub async fn post(
    app: &App,
    content: &str,
    reply_to: Option<i64>,
    image: Option<&Path>,
) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let attachment = match image {
        Some(path) => Some(read_upload(path).await?),
        None => None,
    };
    let draft = PostDraft {
        content: content.to_string(),
        parent_id: reply_to,
        attachment,
    };
    let store = FeedStore::new(app.api.clone(), app.bus.clone(), identity.username);
    let created = store.create(&draft).await?;
    println!("posted {}", format!("#{}", created.id).dimmed());
    Ok(())
}

pub async fn like(app: &App, id: i64) -> Result<(), TanagerError> {
    let store = viewer_feed(app).await?;
    store.like(id).await?;
    report_post(&store, id, app);
    Ok(())
}

pub async fn repost(app: &App, id: i64) -> Result<(), TanagerError> {
    let store = viewer_feed(app).await?;
    store.repost(id).await?;
    report_post(&store, id, app);
    Ok(())
}

pub async fn delete(app: &App, id: i64, yes: bool) -> Result<(), TanagerError> {
    let store = viewer_feed(app).await?;
    let confirmed = yes || confirm(&format!("Delete post #{id}? This cannot be undone."))?;
    if store.delete(id, confirmed).await? {
        println!("deleted {}", format!("#{id}").dimmed());
    } else {
        println!("aborted");
    }
    Ok(())
}

pub async fn share(app: &App, id: i64, to: &str) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    app.api.share_post(id, &identity.username, to).await?;
    println!("shared #{id} with @{to}");
    Ok(())
}

pub async fn search(app: &App, query: &str) -> Result<(), TanagerError> {
    app.require_identity()?;
    let users = app.api.search_users(query).await?;
    if users.is_empty() {
        println!("{}", "no users found".dimmed());
    }
    for user in users {
        let name = user.display_name.as_deref().unwrap_or(&user.username);
        println!("{} {name}", format!("@{}", user.username).cyan());
    }
    Ok(())
}

pub async fn follow(app: &App, username: &str) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let control = FollowControl::new(
        app.api.clone(),
        identity.username,
        username,
        FollowState::default(),
    );
    control.toggle().await?;
    println!("follow toggled for {}", format!("@{username}").cyan());
    Ok(())
}

pub async fn profile_set(
    app: &App,
    name: Option<String>,
    bio: Option<String>,
) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let update = ProfileUpdate {
        display_name: name,
        bio,
    };
    let updated = app.api.update_profile(&identity.username, &update).await?;
    // Keep the persisted session in step with the server's copy.
    app.session.login(updated).await?;
    println!("profile updated");
    Ok(())
}

pub async fn profile_avatar(app: &App, path: &Path) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let upload = read_upload(path).await?;
    let updated = app.api.update_avatar(&identity.username, &upload).await?;
    app.session.login(updated).await?;
    println!("avatar updated");
    Ok(())
}

pub async fn activity(app: &App, kind: Option<&str>) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let filter = kind.map(parse_kind).transpose()?;
    let store = ActivityStore::new(app.api.clone(), identity.username);
    store.refresh().await?;
    let list = store.filtered(filter);
    if list.is_empty() {
        println!("{}", "no activity".dimmed());
    }
    for item in list {
        output::activity(&item);
    }
    Ok(())
}

pub async fn contacts(app: &App) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let store = ContactsStore::new(app.api.clone(), app.bus.clone(), identity.username);
    store.refresh().await;
    let view = store.view().get();
    output::contacts(&view.contacts, &view.unread);
    Ok(())
}

pub async fn chat(app: &App, peer: &str) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let viewer = identity.username.clone();
    let store = ConversationStore::new(app.api.clone(), app.bus.clone(), viewer.clone(), peer);
    store.refresh().await;
    let messages = store.messages().get();
    if messages.is_empty() {
        println!("{}", format!("no messages with @{peer} yet").dimmed());
    }
    for message in &messages {
        output::message(message, &viewer);
    }
    Ok(())
}

pub async fn send(app: &App, peer: &str, text: &str) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let store = ConversationStore::new(app.api.clone(), app.bus.clone(), identity.username, peer);
    store.draft().set(text.to_string());
    store.send().await?;
    println!("sent to {}", format!("@{peer}").cyan());
    Ok(())
}

/// A feed store primed with the current feed, for standalone mutations.
async fn viewer_feed(app: &App) -> Result<FeedStore, TanagerError> {
    let identity = app.require_identity()?;
    let store = FeedStore::new(app.api.clone(), app.bus.clone(), identity.username);
    store.refresh().await;
    Ok(store)
}

fn report_post(store: &FeedStore, id: i64, app: &App) {
    if let (Some(post), Ok(identity)) = (
        store.posts().get().into_iter().find(|p| p.id == id),
        app.require_identity(),
    ) {
        output::post(&post, &identity.username);
    }
}

fn prompt_credentials(username: &str) -> Result<Credentials, TanagerError> {
    let password = rpassword::prompt_password("Password: ")
        .map_err(|e| TanagerError::Internal(format!("failed to read password: {e}")))?;
    Ok(Credentials {
        username: username.to_string(),
        password,
    })
}

fn confirm(prompt: &str) -> Result<bool, TanagerError> {
    print!("{prompt} [y/N] ");
    std::io::stdout()
        .flush()
        .map_err(|e| TanagerError::Internal(format!("stdout: {e}")))?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| TanagerError::Internal(format!("stdin: {e}")))?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn parse_kind(raw: &str) -> Result<ActivityKind, TanagerError> {
    raw.to_uppercase().parse::<ActivityKind>().map_err(|_| {
        TanagerError::Internal(format!(
            "unknown activity kind `{raw}` (expected follow, like, repost, or reply)"
        ))
    })
}

async fn read_upload(path: &Path) -> Result<Upload, TanagerError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| TanagerError::Internal(format!("failed to read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let mime_type = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string();
    Ok(Upload {
        file_name,
        mime_type,
        bytes,
    })
}
