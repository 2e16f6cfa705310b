// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live feed watching: runs the refetch scheduler until Ctrl-C.

use std::time::Duration;

use colored::Colorize;
use tanager_core::TanagerError;
use tanager_sync::{FeedStore, FeedTab};
use tracing::warn;

use crate::app::App;
use crate::output;

pub async fn run(app: &App, following: bool) -> Result<(), TanagerError> {
    let identity = app.require_identity()?;
    let viewer = identity.username.clone();

    let mut feed = FeedStore::new(app.api.clone(), app.bus.clone(), viewer.clone());
    if following {
        feed.set_tab(FeedTab::Following).await;
    }

    let mut rx = feed.posts().subscribe();
    let mut last = rx.borrow().clone();
    feed.start(Duration::from_secs(app.config.sync.feed_interval_secs));
    println!("{}", "watching feed (Ctrl-C to stop)".dimmed());

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!(error = %e, "ctrl-c handler failed");
                }
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let posts = rx.borrow_and_update().clone();
                // Every poll notifies; only redraw on real change.
                if posts != last {
                    println!("{}", "── feed updated ──".dimmed());
                    output::posts(&posts, &viewer);
                    last = posts;
                }
            }
        }
    }

    feed.stop();
    println!("stopped");
    Ok(())
}
