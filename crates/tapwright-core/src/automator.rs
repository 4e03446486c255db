//! The automation helper entry point.
//!
//! This module provides the [`Automator`] type, which holds a
//! [`QueryExecutor`] backend, the timing budgets from
//! [`AutomationConfig`], and the step [`Journal`]. The locator, wait engine,
//! action composer and assertions are all methods on it, spread across
//! their own modules.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tapwright_core::automator::Automator;
//! use tapwright_core::compose::Capture;
//! use tapwright_core::driver::QueryExecutor;
//! use tapwright_core::selector::Selector;
//!
//! async fn login(backend: Arc<dyn QueryExecutor>) -> Result<(), tapwright_core::TestFailure> {
//!     let app = Automator::new(backend);
//!     app.enter_text(&Selector::id("username"), "evolve", Some("typed-username")).await?;
//!     app.tap(&Selector::marked("Log In"), Capture::after("logged-in")).await?;
//!     app.assert_present(&Selector::marked("My Devices"), "device-list").await
//! }
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::time::Instant;
use tracing::{debug, info_span, warn, Instrument};

use crate::config::AutomationConfig;
use crate::driver::QueryExecutor;
use crate::error::StepResult;
use crate::journal::{Journal, StepOutcome, StepRecord};
use crate::selector::Selector;

/// Runs locate, wait, act and assert steps against a [`QueryExecutor`].
///
/// Each call owns its transient state (poll deadlines, scroll geometry).
/// An automator is meant to drive one device session from one test at a
/// time.
pub struct Automator {
    driver: Arc<dyn QueryExecutor>,
    config: AutomationConfig,
    journal: Arc<Journal>,
    /// Tags captured by the step currently running.
    step_shots: Mutex<Vec<String>>,
}

impl Automator {
    /// Creates an automator with default budgets and an in-memory journal.
    pub fn new(driver: Arc<dyn QueryExecutor>) -> Self {
        Self::with_config(driver, AutomationConfig::default())
    }

    pub fn with_config(driver: Arc<dyn QueryExecutor>, config: AutomationConfig) -> Self {
        Self {
            driver,
            config,
            journal: Arc::new(Journal::new()),
            step_shots: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the journal, e.g. with one that persists to a file.
    pub fn with_journal(mut self, journal: Arc<Journal>) -> Self {
        self.journal = journal;
        self
    }

    /// Returns a reference to the underlying driver.
    pub fn driver(&self) -> &Arc<dyn QueryExecutor> {
        &self.driver
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    pub fn journal(&self) -> &Arc<Journal> {
        &self.journal
    }

    /// Captures a named screenshot.
    ///
    /// An empty tag means "skip": nothing is written and `Ok(false)` is
    /// returned.
    pub async fn screenshot(&self, tag: &str) -> StepResult<bool> {
        if tag.is_empty() {
            return Ok(false);
        }
        self.driver.screenshot(tag).await?;
        debug!(tag, "screenshot captured");
        if let Ok(mut shots) = self.step_shots.lock() {
            shots.push(tag.to_string());
        }
        Ok(true)
    }

    /// Captures a screenshot if a tag was supplied.
    pub(crate) async fn capture(&self, tag: Option<&str>) -> StepResult<bool> {
        match tag {
            Some(tag) => self.screenshot(tag).await,
            None => Ok(false),
        }
    }

    /// Runs one composed step inside a tracing span and journals its outcome.
    pub(crate) async fn run_step<T, F>(
        &self,
        step: &'static str,
        selector: Option<&Selector>,
        body: F,
    ) -> StepResult<T>
    where
        F: Future<Output = StepResult<T>>,
    {
        let target = selector.map(|s| s.to_string()).unwrap_or_default();
        let span = info_span!("step", step, selector = %target);
        async {
            self.take_step_shots();
            let start = Instant::now();
            let result = body.await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            let outcome = match &result {
                Ok(_) => {
                    debug!(elapsed_ms, "step passed");
                    StepOutcome::Passed
                }
                Err(e) => {
                    warn!(elapsed_ms, error = %e, "step failed");
                    StepOutcome::Failed(e.to_string())
                }
            };
            self.journal.record(
                StepRecord::new(step, selector.cloned(), outcome, elapsed_ms)
                    .with_screenshots(self.take_step_shots()),
            );
            result
        }
        .instrument(span)
        .await
    }

    fn take_step_shots(&self) -> Vec<String> {
        self.step_shots
            .lock()
            .map(|mut shots| std::mem::take(&mut *shots))
            .unwrap_or_default()
    }
}
