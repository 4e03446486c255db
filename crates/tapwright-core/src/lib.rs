//! # tapwright-core
//!
//! Retrying, polling and scroll-search primitives for mobile UI automation
//! tests.
//!
//! UI that renders asynchronously makes naive test steps flaky: an element
//! is queried a moment before it appears, or it sits just below the fold.
//! This crate wraps a backend's raw query/tap/drag primitives in bounded
//! waits and scroll searches, and reports every failure as a
//! [`TestFailure`] naming the selector involved.
//!
//! ## Modules
//!
//! - [`selector`] - Declarative, comparable element selectors
//! - [`element`] - Element trees, matches and match sets
//! - [`driver`] - The [`QueryExecutor`](driver::QueryExecutor) backend trait
//! - [`automator`] - The [`Automator`](automator::Automator) entry point
//! - [`locator`] - Scroll-to-find search
//! - [`wait`] - Polling waits and soft presence checks
//! - [`compose`] - Locate → act → capture steps
//! - [`assertion`] - Text and presence assertions
//! - [`journal`] - Step records, optionally persisted as JSON Lines
//! - [`config`] - Timing and scroll budgets
//! - [`logging`] - Tracing subscriber setup
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tapwright_core::automator::Automator;
//! use tapwright_core::driver::QueryExecutor;
//! use tapwright_core::selector::Selector;
//!
//! async fn open_device(backend: Arc<dyn QueryExecutor>) -> Result<(), tapwright_core::TestFailure> {
//!     let app = Automator::new(backend);
//!
//!     // Dismiss the location prompt if the OS shows one.
//!     app.tap_if_present(&Selector::marked("Allow"), Duration::from_secs(5), None).await?;
//!
//!     // The device may be far down the list.
//!     app.scroll_and_tap(&Selector::text_is("Kitchen Button"), Default::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod assertion;
pub mod automator;
pub mod compose;
pub mod config;
pub mod driver;
pub mod element;
pub mod error;
pub mod journal;
pub mod locator;
pub mod logging;
pub mod selector;
pub mod wait;

pub use error::{StepResult, TestFailure};
