//! Query executor trait for backend-agnostic UI automation.
//!
//! This module defines the [`QueryExecutor`] trait, the seam between the
//! automation helpers and whatever actually talks to the app under test
//! (an accessibility agent on a device, an emulator bridge, or a scripted
//! fake in tests). The helpers only ever call through this trait.
//!
//! Every method is awaited to completion before the helpers issue the next
//! call, so from the point of view of a test the executor behaves as a
//! synchronous request/response interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::element::{MatchSet, UIElement};
use crate::selector::Selector;

/// Errors reported by a query executor backend.
#[derive(Error, Debug)]
pub enum DriverError {
    /// A command or operation failed with the given message.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The backend is not available or not connected.
    #[error("Not connected to automation backend")]
    NotConnected,

    /// The backend does not implement the requested operation.
    #[error("Operation not supported by this backend: {0}")]
    Unsupported(&'static str),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for the external collaborator that resolves selectors and
/// performs raw UI actions.
///
/// Implementors must provide the raw actions. [`query`](QueryExecutor::query)
/// has a default implementation that fetches the whole hierarchy via
/// [`dump_tree`](QueryExecutor::dump_tree) and filters it locally with the
/// selector; backends that support server-side search should override it.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Get the full UI element hierarchy of the current screen.
    ///
    /// The default returns [`DriverError::Unsupported`], for backends that
    /// only implement [`query`](Self::query).
    async fn dump_tree(&self) -> Result<Vec<UIElement>, DriverError> {
        Err(DriverError::Unsupported("dump_tree"))
    }

    /// Resolve a selector to the elements currently on screen.
    async fn query(&self, selector: &Selector) -> Result<MatchSet, DriverError> {
        let tree = self.dump_tree().await?;
        Ok(selector.search(&tree))
    }

    /// Tap the element(s) matching a selector.
    async fn tap(&self, selector: &Selector) -> Result<(), DriverError>;

    /// Type text into the element matching a selector.
    async fn enter_text(&self, selector: &Selector, text: &str) -> Result<(), DriverError>;

    /// Clear the text of the currently focused element.
    async fn clear_text(&self) -> Result<(), DriverError>;

    /// Double-tap the element matching a selector (selects its content).
    async fn double_activate(&self, selector: &Selector) -> Result<(), DriverError>;

    /// Drag from one screen point to another.
    async fn drag(&self, from_x: f64, from_y: f64, to_x: f64, to_y: f64)
        -> Result<(), DriverError>;

    /// Capture a screenshot and store it as a named artifact.
    ///
    /// File format and location belong to the backend.
    async fn screenshot(&self, tag: &str) -> Result<(), DriverError>;
}
