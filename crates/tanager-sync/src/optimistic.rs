// SPDX-FileCopyrightText: 2026 Tanager Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optimistic mutation with exact rollback.
//!
//! Every toggle in the client follows the same sequence: capture the
//! current cell value, apply the local change, fire the request, and on
//! failure restore the captured value verbatim. Rapid repeated calls do
//! not queue; each call captures whatever the cell holds at call time, so
//! the last local intent wins regardless of how earlier requests resolve.

use std::future::Future;

use tanager_core::TanagerError;
use tracing::debug;

use crate::state::ViewState;

/// Applies `apply` locally, then awaits `request`. On failure the cell is
/// restored to the exact value captured before `apply` ran.
pub async fn mutate<T, R, Fut>(
    state: &ViewState<T>,
    apply: impl FnOnce(&mut T),
    request: Fut,
) -> Result<R, TanagerError>
where
    T: Clone,
    Fut: Future<Output = Result<R, TanagerError>>,
{
    let snapshot = state.get();
    state.update(apply);

    match request.await {
        Ok(response) => Ok(response),
        Err(e) => {
            debug!(error = %e, "mutation failed, rolling back");
            state.set(snapshot);
            Err(e)
        }
    }
}

/// Like [`mutate`], but reconciles the cell with the server's response on
/// success (for endpoints that return the authoritative record).
pub async fn mutate_reconcile<T, R, Fut>(
    state: &ViewState<T>,
    apply: impl FnOnce(&mut T),
    request: Fut,
    reconcile: impl FnOnce(&mut T, &R),
) -> Result<R, TanagerError>
where
    T: Clone,
    Fut: Future<Output = Result<R, TanagerError>>,
{
    let response = mutate(state, apply, request).await?;
    state.update(|value| reconcile(value, &response));
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    async fn failing() -> Result<(), TanagerError> {
        Err(TanagerError::Api {
            status: 500,
            message: "boom".into(),
        })
    }

    #[tokio::test]
    async fn success_keeps_the_applied_value() {
        let cell = ViewState::new((3i64, false));
        let result = mutate(
            &cell,
            |(count, flag)| {
                *count += 1;
                *flag = true;
            },
            async { Ok::<_, TanagerError>(()) },
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(cell.get(), (4, true));
    }

    #[tokio::test]
    async fn failure_restores_the_captured_value() {
        let cell = ViewState::new((3i64, false));
        let result = mutate(
            &cell,
            |(count, flag)| {
                *count += 1;
                *flag = true;
            },
            failing(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(cell.get(), (3, false));
    }

    #[tokio::test]
    async fn reconcile_applies_the_server_response() {
        let cell = ViewState::new(10i64);
        let result = mutate_reconcile(
            &cell,
            |count| *count += 1,
            async { Ok::<_, TanagerError>(42i64) },
            |count, authoritative| *count = *authoritative,
        )
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(cell.get(), 42);
    }

    proptest! {
        // Failure leaves the cell exactly as captured, for arbitrary
        // (counter, flag) starting points and arbitrary local deltas.
        #[test]
        fn rollback_is_exact(start_count in -1000i64..1000, start_flag: bool, delta in -5i64..5) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            rt.block_on(async {
                let cell = ViewState::new((start_count, start_flag));
                let result = mutate(
                    &cell,
                    |(count, flag)| {
                        *count += delta;
                        *flag = !*flag;
                    },
                    failing(),
                )
                .await;
                prop_assert!(result.is_err());
                prop_assert_eq!(cell.get(), (start_count, start_flag));
                Ok(())
            })?;
        }
    }
}
