// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity-scoped view gating.
//!
//! A protected view must not be shown without a session, and must not be
//! shown (or redirected away from) while the restore is still pending.

use crate::SessionStore;

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["/login", "/register"];

/// The guard's decision for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Restore has not completed; render nothing yet.
    Pending,
    Allow,
    RedirectToLogin,
}

/// Gate checked on every navigation.
pub struct RouteGuard<'a> {
    session: &'a SessionStore,
}

impl<'a> RouteGuard<'a> {
    pub fn new(session: &'a SessionStore) -> Self {
        Self { session }
    }

    pub fn check(&self, path: &str) -> GuardDecision {
        if !self.session.is_restored() {
            return GuardDecision::Pending;
        }
        if PUBLIC_ROUTES.contains(&path) || self.session.current().is_some() {
            return GuardDecision::Allow;
        }
        GuardDecision::RedirectToLogin
    }
}
