//! Viewer error types

use thiserror::Error;

/// Viewer-specific errors
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Page loop no longer accepts input
    #[error("page event loop closed")]
    LoopClosed,

    /// Page loop task failed
    #[error("page event loop task failed: {0}")]
    Join(String),

    /// Building the page from its description failed
    #[error("page setup error: {0}")]
    Contract(#[from] contracts::ContractError),
}
