//! Scroll-to-find element location.
//!
//! [`Automator::locate_with_scroll`] queries a selector and, while it does
//! not match, drags the content upward by a fixed, content-relative
//! distance and queries again. The search is bounded by
//! [`AutomationConfig::max_scroll_attempts`](crate::config::AutomationConfig::max_scroll_attempts)
//! so a missing element fails deterministically instead of hanging.
//!
//! The drag is anchored on a reference element (the first element on
//! screen). Its geometry and the resulting gap are computed once per
//! search and reused for every attempt.

use tokio::time::sleep;
use tracing::debug;

use crate::automator::Automator;
use crate::element::{ElementMatch, MatchSet};
use crate::error::{StepResult, TestFailure};
use crate::selector::Selector;

/// Half the drag distance for a reference element of the given height.
///
/// `default_gap` is used unless the element is shorter than twice that,
/// in which case a quarter of its height keeps both drag endpoints
/// inside the element.
pub fn scroll_gap(height: f64, default_gap: f64) -> f64 {
    if height < default_gap * 2.0 {
        height / 4.0
    } else {
        default_gap
    }
}

/// Per-search scroll state. Lives for one `locate_with_scroll` call.
struct ScrollState {
    attempts: u32,
    reference: ElementMatch,
    gap: f64,
}

impl ScrollState {
    /// Drag endpoints: from below the center to above it.
    fn drag_points(&self) -> (f64, f64, f64, f64) {
        let cx = self.reference.rect.center_x();
        let cy = self.reference.rect.center_y();
        (cx, cy + self.gap, cx, cy - self.gap)
    }
}

impl Automator {
    /// Finds `selector`, scrolling down until it appears.
    ///
    /// Returns the first non-empty [`MatchSet`]. When `screenshot` is a
    /// non-empty tag it is captured once the element is found.
    ///
    /// # Errors
    ///
    /// * [`TestFailure::NoRootView`] if a scroll is needed but nothing is on
    ///   screen to anchor it.
    /// * [`TestFailure::NotFound`] once the attempt budget is spent.
    pub async fn locate_with_scroll(
        &self,
        selector: &Selector,
        screenshot: Option<&str>,
    ) -> StepResult<MatchSet> {
        let found = self.driver().query(selector).await?;
        if !found.is_empty() {
            self.capture(screenshot).await?;
            return Ok(found);
        }

        let mut state = self.scroll_state(selector).await?;
        let max_attempts = self.config().max_scroll_attempts;
        let (from_x, from_y, to_x, to_y) = state.drag_points();

        while state.attempts < max_attempts {
            self.driver().drag(from_x, from_y, to_x, to_y).await?;
            state.attempts += 1;
            sleep(self.config().scroll_settle()).await;

            let found = self.driver().query(selector).await?;
            debug!(%selector, attempt = state.attempts, matches = found.len(), "scrolled");
            if !found.is_empty() {
                self.capture(screenshot).await?;
                return Ok(found);
            }
        }

        Err(TestFailure::NotFound {
            selector: selector.clone(),
            attempts: state.attempts,
        })
    }

    async fn scroll_state(&self, selector: &Selector) -> StepResult<ScrollState> {
        let on_screen = self.driver().query(&Selector::any()).await?;
        let reference = on_screen
            .into_iter()
            .next()
            .ok_or_else(|| TestFailure::NoRootView {
                selector: selector.clone(),
            })?;
        let gap = scroll_gap(reference.rect.height, self.config().scroll_gap);
        debug!(%selector, height = reference.rect.height, gap, "scroll anchored");
        Ok(ScrollState {
            attempts: 0,
            reference,
            gap,
        })
    }

    /// Width and height of the first element matching `selector`, if any.
    ///
    /// Performs a single query; no waiting or scrolling.
    pub async fn element_size(&self, selector: &Selector) -> StepResult<Option<(f64, f64)>> {
        let found = self.driver().query(selector).await?;
        Ok(found.first().map(|e| (e.rect.width, e.rect.height)))
    }
}
