//! Test step failures.
//!
//! Every helper returns `Result<T, TestFailure>`. A failure aborts the
//! current step when propagated with `?`; soft checks convert absence into
//! `false` instead of producing one of these.

use std::time::Duration;

use thiserror::Error;

use crate::driver::DriverError;
use crate::selector::Selector;

#[derive(Error, Debug)]
pub enum TestFailure {
    /// The selector never matched within the scroll budget.
    #[error("Unable to scroll down to find element {selector} after {attempts} attempts")]
    NotFound { selector: Selector, attempts: u32 },

    /// Nothing at all is on screen to anchor a scroll gesture.
    #[error("Unable to get root view while searching for {selector}")]
    NoRootView { selector: Selector },

    /// An explicit wait exceeded its deadline.
    #[error("Timed out after {}ms waiting for element {selector}", .elapsed.as_millis())]
    Timeout { selector: Selector, elapsed: Duration },

    /// Expected/actual mismatch or a required element was absent.
    #[error("{0}")]
    Assertion(String),

    /// The query executor itself failed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl TestFailure {
    /// The selector this failure is about, if any.
    pub fn selector(&self) -> Option<&Selector> {
        match self {
            TestFailure::NotFound { selector, .. }
            | TestFailure::NoRootView { selector }
            | TestFailure::Timeout { selector, .. } => Some(selector),
            TestFailure::Assertion(_) | TestFailure::Driver(_) => None,
        }
    }
}

pub type StepResult<T> = Result<T, TestFailure>;
