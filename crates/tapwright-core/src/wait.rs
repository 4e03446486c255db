//! Wait/poll engine.
//!
//! Polls a selector at a fixed interval until it matches or a deadline
//! passes. The loop runs inline in the calling test; nothing is spawned.
//! Query errors while polling are logged and treated as "not there yet",
//! since the screen is often mid-transition when a wait starts.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::automator::Automator;
use crate::element::MatchSet;
use crate::error::{StepResult, TestFailure};
use crate::selector::Selector;

/// Result of polling a selector.
#[derive(Debug, Clone)]
pub enum WaitOutcome {
    /// The selector matched before the deadline.
    Matched(MatchSet),
    /// The deadline passed with no match.
    TimedOut { selector: Selector, elapsed: Duration },
}

impl WaitOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, WaitOutcome::Matched(_))
    }

    /// Converts a timeout into [`TestFailure::Timeout`].
    pub fn into_result(self) -> StepResult<MatchSet> {
        match self {
            WaitOutcome::Matched(found) => Ok(found),
            WaitOutcome::TimedOut { selector, elapsed } => {
                Err(TestFailure::Timeout { selector, elapsed })
            }
        }
    }

    /// The matches, or `None` on timeout. For callers that treat a
    /// timeout as absence rather than failure.
    pub fn matches(self) -> Option<MatchSet> {
        match self {
            WaitOutcome::Matched(found) => Some(found),
            WaitOutcome::TimedOut { .. } => None,
        }
    }
}

impl Automator {
    /// Polls `selector` until it matches or `timeout` elapses.
    ///
    /// The first query happens immediately. Never fails: a timeout is
    /// reported as [`WaitOutcome::TimedOut`].
    pub async fn poll(&self, selector: &Selector, timeout: Duration) -> WaitOutcome {
        let start = Instant::now();
        let interval = self.config().poll_interval();
        let mut polls: u32 = 0;

        loop {
            polls += 1;
            match self.driver().query(selector).await {
                Ok(found) if !found.is_empty() => {
                    debug!(%selector, polls, elapsed_ms = start.elapsed().as_millis() as u64, "matched");
                    return WaitOutcome::Matched(found);
                }
                Ok(_) => {}
                Err(e) => debug!(%selector, error = %e, "query failed while polling"),
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                debug!(%selector, polls, elapsed_ms = elapsed.as_millis() as u64, "timed out");
                return WaitOutcome::TimedOut {
                    selector: selector.clone(),
                    elapsed,
                };
            }
            // Never sleep past the deadline.
            sleep(interval.min(timeout - elapsed)).await;
        }
    }

    /// Waits for `selector`, failing with [`TestFailure::Timeout`].
    pub async fn wait_for(&self, selector: &Selector, timeout: Duration) -> StepResult<MatchSet> {
        self.poll(selector, timeout).await.into_result()
    }

    /// [`wait_for`](Self::wait_for) with the configured default timeout.
    pub async fn wait_for_default(&self, selector: &Selector) -> StepResult<MatchSet> {
        self.wait_for(selector, self.config().default_timeout()).await
    }

    /// Soft check: true if `selector` matches within `timeout`.
    pub async fn exists_within(&self, selector: &Selector, timeout: Duration) -> bool {
        self.poll(selector, timeout).await.is_matched()
    }

    /// Soft check with the configured soft-check timeout (5 s by default).
    pub async fn is_present(&self, selector: &Selector) -> bool {
        self.exists_within(selector, self.config().soft_check_timeout())
            .await
    }
}
