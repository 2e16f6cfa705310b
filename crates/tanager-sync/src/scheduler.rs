// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic refetch driving.
//!
//! A [`RefetchTask`] fetches immediately on spawn, then on a fixed period,
//! and additionally whenever a subscribed [`ChangeEvent`] arrives. The
//! fetch closure performs the state write itself; the task wraps every
//! fetch in a cancellation race, so once the task is stopped (or its
//! handle dropped) no in-flight response can write state.

use std::future::Future;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::bus::{ChangeBus, ChangeEvent};

/// Handle to a running refetch loop. Cancels on [`stop`](Self::stop) and
/// on drop.
#[derive(Debug)]
pub struct RefetchTask {
    cancel: CancellationToken,
}

impl RefetchTask {
    /// Spawns the loop. `interest`, when set, subscribes the task to the
    /// bus and triggers an out-of-cycle fetch whenever the named event
    /// arrives; other events are ignored.
    pub fn spawn<F, Fut>(
        period: std::time::Duration,
        interest: Option<(ChangeBus, ChangeEvent)>,
        mut fetch: F,
    ) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let wanted = interest.as_ref().map(|(_, event)| *event);
            let mut signal = interest.map(|(bus, _)| bus.subscribe());
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // The first tick completes immediately: fetch on start.
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        trace!("periodic refetch");
                    }
                    event = next_event(&mut signal) => {
                        if event.is_some() && event != wanted {
                            continue;
                        }
                        debug!(?event, "signalled refetch");
                        // A signalled fetch restarts the period.
                        ticker.reset();
                    }
                }

                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = fetch() => {}
                }
            }
            debug!("refetch task stopped");
        });

        Self { cancel }
    }

    /// Stops the loop. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for RefetchTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Waits for the next bus event; `None` in the result marks a lagged
/// receiver, which is treated as "something changed" by the caller. With
/// no subscription (or a closed bus) this pends forever, leaving only the
/// periodic ticks.
async fn next_event(
    signal: &mut Option<broadcast::Receiver<ChangeEvent>>,
) -> Option<ChangeEvent> {
    match signal {
        Some(rx) => loop {
            match rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => return None,
                Err(broadcast::error::RecvError::Closed) => std::future::pending().await,
            }
        },
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    fn counting_fetch(counter: Arc<AtomicUsize>) -> impl FnMut() -> std::future::Ready<()> {
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_immediately_then_on_period() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = RefetchTask::spawn(
            Duration::from_secs(5),
            None,
            counting_fetch(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 4);
        task.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn bus_event_triggers_out_of_cycle_fetch() {
        let counter = Arc::new(AtomicUsize::new(0));
        let bus = ChangeBus::new();
        let _task = RefetchTask::spawn(
            Duration::from_secs(60),
            Some((bus.clone(), ChangeEvent::ContentChanged)),
            counting_fetch(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        bus.publish(ChangeEvent::ContentChanged);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn uninteresting_events_are_ignored() {
        let counter = Arc::new(AtomicUsize::new(0));
        let bus = ChangeBus::new();
        let _task = RefetchTask::spawn(
            Duration::from_secs(60),
            Some((bus.clone(), ChangeEvent::ContentChanged)),
            counting_fetch(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        bus.publish(ChangeEvent::MessagesChanged);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_prevents_further_fetches() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = RefetchTask::spawn(
            Duration::from_secs(5),
            None,
            counting_fetch(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        task.stop();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_mid_fetch_drops_the_in_flight_future() {
        let counter = Arc::new(AtomicUsize::new(0));
        let slow = counter.clone();
        let task = RefetchTask::spawn(Duration::from_secs(60), None, move || {
            let counter = slow.clone();
            async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        // The first fetch is sleeping inside its body when stop() lands.
        tokio::time::sleep(Duration::from_millis(100)).await;
        task.stop();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_loop() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let _task = RefetchTask::spawn(
                Duration::from_secs(5),
                None,
                counting_fetch(counter.clone()),
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
