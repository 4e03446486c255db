//! Text and presence assertions.
//!
//! Text assertions are lenient toward empty values: if either side is
//! empty there is nothing to compare and the assertion passes. Optional UI
//! text that has not rendered should not fail a run. Comparison is
//! ordinal, so case and locale differences count as mismatches.

use tracing::debug;

use crate::automator::Automator;
use crate::error::{StepResult, TestFailure};
use crate::selector::Selector;
use crate::wait::WaitOutcome;

/// True when both strings are non-empty and differ.
pub fn is_text_different(old: &str, new: &str) -> bool {
    !old.is_empty() && !new.is_empty() && old != new
}

/// Fails when `expected` and `actual` are both non-empty and differ.
pub fn assert_text_equal(expected: &str, actual: &str) -> StepResult<()> {
    if is_text_different(expected, actual) {
        return Err(TestFailure::Assertion(format!(
            "TEST FAILURE. Expecting: {}, Actual: {}",
            expected, actual
        )));
    }
    Ok(())
}

impl Automator {
    /// Waits for `selector` with the default timeout, captures `tag`, and
    /// fails if nothing matched.
    ///
    /// The screenshot is taken either way, so a failure leaves behind an
    /// artifact of what was on screen instead.
    pub async fn assert_present(&self, selector: &Selector, tag: &str) -> StepResult<()> {
        self.run_step("assert_present", Some(selector), async {
            let outcome = self.poll(selector, self.config().default_timeout()).await;
            self.screenshot(tag).await?;
            match outcome {
                WaitOutcome::Matched(_) => Ok(()),
                WaitOutcome::TimedOut { elapsed, .. } => Err(TestFailure::Assertion(format!(
                    "FAILURE: {} ({} not found after {}ms)",
                    tag,
                    selector,
                    elapsed.as_millis()
                ))),
            }
        })
        .await
    }

    /// Waits for `selector` and compares the text of the match at `index`
    /// with `expected`, then captures `tag`.
    ///
    /// An index past the end of the match set, or an element without
    /// text, has nothing to compare and passes.
    pub async fn assert_text_at(
        &self,
        selector: &Selector,
        index: usize,
        expected: &str,
        tag: &str,
    ) -> StepResult<()> {
        self.run_step("assert_text_at", Some(selector), async {
            let found = self.wait_for_default(selector).await?;
            let Some(element) = found.get(index) else {
                debug!(%selector, index, matches = found.len(), "no element at index");
                return Ok(());
            };
            let actual = element.text.as_deref().unwrap_or_default();
            assert_text_equal(expected, actual)?;
            self.screenshot(tag).await?;
            Ok(())
        })
        .await
    }
}
