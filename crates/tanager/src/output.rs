// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for feed items, messages, and errors.

use colored::Colorize;
use tanager_core::{Activity, Contact, Message, Post, TanagerError, UnreadCounts};

pub fn error(err: &TanagerError) {
    eprintln!("{} {}", "error:".red().bold(), err.user_message());
}

pub fn post(post: &Post, viewer: &str) {
    let author = post.author_username().unwrap_or("unknown");
    let mut badges = String::new();
    if post.liked_by(viewer) {
        badges.push_str(" ♥");
    }
    if post.reposted_by(viewer) {
        badges.push_str(" ↻");
    }
    if let Some(reposter) = &post.repost_from_user_name {
        println!("{}", format!("  reposted by @{reposter}").dimmed());
    }
    println!(
        "{} {} {}",
        format!("#{}", post.id).dimmed(),
        format!("@{author}").cyan().bold(),
        badges.yellow()
    );
    println!("  {}", post.content);
    println!(
        "  {}",
        format!(
            "{} likes · {} replies · {} reposts",
            post.likes_count, post.replies_count, post.reposts_count
        )
        .dimmed()
    );
}

pub fn posts(list: &[Post], viewer: &str) {
    if list.is_empty() {
        println!("{}", "nothing here yet".dimmed());
        return;
    }
    for item in list {
        post(item, viewer);
        println!();
    }
}

pub fn activity(activity: &Activity) {
    let marker = if activity.read { " " } else { "•" };
    let what = match activity.kind {
        tanager_core::ActivityKind::Follow => "followed you",
        tanager_core::ActivityKind::Like => "liked your post",
        tanager_core::ActivityKind::Repost => "reposted your post",
        tanager_core::ActivityKind::Reply => "replied to your post",
    };
    println!(
        "{} {} {}",
        marker.yellow(),
        format!("@{}", activity.actor.username).cyan(),
        what
    );
    if let Some(post) = &activity.post {
        println!("    {}", post.content.dimmed());
    }
}

pub fn message(message: &Message, viewer: &str) {
    let who = if message.sender.username == viewer {
        "you".green().bold()
    } else {
        format!("@{}", message.sender.username).cyan().bold()
    };
    println!("{who}: {}", message.content);
    if let Some(post) = &message.shared_post {
        println!("    {} {}", "shared:".dimmed(), post.content.dimmed());
    }
}

pub fn contacts(contacts: &[Contact], unread: &UnreadCounts) {
    if contacts.is_empty() {
        println!("{}", "no conversations yet".dimmed());
        return;
    }
    for contact in contacts {
        let count = unread.get(&contact.username).copied().unwrap_or(0);
        let badge = if count > 0 {
            format!(" ({count} unread)").yellow().to_string()
        } else {
            String::new()
        };
        let name = contact
            .display_name
            .as_deref()
            .unwrap_or(&contact.username);
        println!("{} {}{badge}", format!("@{}", contact.username).cyan(), name);
    }
}
