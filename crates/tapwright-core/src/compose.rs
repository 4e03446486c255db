//! Composed locate → act → capture steps.
//!
//! Each step is a fixed sequence with no rollback: the first failing call
//! aborts the step and the error propagates. Screenshots are taken before
//! or after the action according to the step's [`Capture`]; both orders
//! exist because some tests need the pre-action state and others the
//! post-action state.
//!
//! Steps that wait return the [`MatchSet`] the wait observed, so callers
//! see exactly the elements the action was issued against.

use std::time::Duration;

use tracing::debug;

use crate::automator::Automator;
use crate::element::MatchSet;
use crate::error::StepResult;
use crate::selector::Selector;
use crate::wait::WaitOutcome;

/// When to screenshot relative to a step's action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Capture {
    /// No screenshot.
    #[default]
    Skip,
    /// Screenshot the pre-action state.
    Before(String),
    /// Screenshot the post-action state.
    After(String),
}

impl Capture {
    pub fn before(tag: impl Into<String>) -> Self {
        Capture::Before(tag.into())
    }

    pub fn after(tag: impl Into<String>) -> Self {
        Capture::After(tag.into())
    }

    fn before_tag(&self) -> Option<&str> {
        match self {
            Capture::Before(tag) => Some(tag.as_str()),
            _ => None,
        }
    }

    fn after_tag(&self) -> Option<&str> {
        match self {
            Capture::After(tag) => Some(tag.as_str()),
            _ => None,
        }
    }
}

impl Automator {
    /// Waits for `selector` (tap timeout), then taps it.
    pub async fn tap(&self, selector: &Selector, capture: Capture) -> StepResult<MatchSet> {
        self.run_step("tap", Some(selector), async {
            let found = self.wait_for(selector, self.config().tap_timeout()).await?;
            self.tap_found(selector, &capture).await?;
            Ok(found)
        })
        .await
    }

    /// Taps, then captures `tag`.
    pub async fn tap_then_screenshot(&self, selector: &Selector, tag: &str) -> StepResult<MatchSet> {
        self.tap(selector, Capture::after(tag)).await
    }

    /// Captures `tag`, then taps.
    pub async fn screenshot_then_tap(&self, tag: &str, selector: &Selector) -> StepResult<MatchSet> {
        self.tap(selector, Capture::before(tag)).await
    }

    /// Scrolls until `selector` is on screen, then taps it.
    pub async fn scroll_and_tap(&self, selector: &Selector, capture: Capture) -> StepResult<MatchSet> {
        self.run_step("scroll_and_tap", Some(selector), async {
            let found = self.locate_with_scroll(selector, None).await?;
            self.tap_found(selector, &capture).await?;
            Ok(found)
        })
        .await
    }

    /// Waits for a text field, scrolling to it if it never shows up, types
    /// `text`, then captures `screenshot`.
    ///
    /// The wait before scrolling uses the soft-check budget, so a field
    /// below the fold costs seconds rather than the full default timeout.
    pub async fn enter_text(
        &self,
        selector: &Selector,
        text: &str,
        screenshot: Option<&str>,
    ) -> StepResult<MatchSet> {
        self.run_step("enter_text", Some(selector), async {
            let found = match self.poll(selector, self.config().soft_check_timeout()).await {
                WaitOutcome::Matched(found) => found,
                WaitOutcome::TimedOut { .. } => {
                    debug!(%selector, "not visible, scrolling");
                    self.locate_with_scroll(selector, None).await?
                }
            };
            self.driver().enter_text(selector, text).await?;
            self.capture(screenshot).await?;
            Ok(found)
        })
        .await
    }

    /// Waits for a text field, double-taps it to select its content, then
    /// clears it.
    pub async fn clear_text(&self, selector: &Selector) -> StepResult<MatchSet> {
        self.run_step("clear_text", Some(selector), async {
            let found = self.wait_for_default(selector).await?;
            self.driver().double_activate(selector).await?;
            self.driver().clear_text().await?;
            Ok(found)
        })
        .await
    }

    /// Taps `selector` if it shows up within `timeout`.
    ///
    /// Meant for transient UI such as permission prompts. Absence is a
    /// silent no-op returning `Ok(false)`; only a failing tap or
    /// screenshot is an error.
    pub async fn tap_if_present(
        &self,
        selector: &Selector,
        timeout: Duration,
        screenshot: Option<&str>,
    ) -> StepResult<bool> {
        self.run_step("tap_if_present", Some(selector), async {
            if !self.exists_within(selector, timeout).await {
                debug!(%selector, "absent, skipping tap");
                return Ok(false);
            }
            self.capture(screenshot).await?;
            self.driver().tap(selector).await?;
            Ok(true)
        })
        .await
    }

    async fn tap_found(&self, selector: &Selector, capture: &Capture) -> StepResult<()> {
        self.capture(capture.before_tag()).await?;
        self.driver().tap(selector).await?;
        self.capture(capture.after_tag()).await?;
        Ok(())
    }
}
