// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Observable state cells.

use tokio::sync::watch;

/// A clonable handle to a single piece of view state.
///
/// Readers subscribe through a [`watch`] channel and always observe the
/// latest value; writers replace or modify the value in place. Each store
/// owns one writer path per user action, so writes never race within a
/// view.
#[derive(Debug)]
pub struct ViewState<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> ViewState<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        let _ = self.tx.send_replace(value);
    }

    /// Modifies the value in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Subscribes to value changes. The receiver immediately sees the
    /// current value via `borrow()`.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Clone + Default> Default for ViewState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
