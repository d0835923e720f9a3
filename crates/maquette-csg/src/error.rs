//! Error types for the preview pipeline

use thiserror::Error;

/// Result type alias using the preview pipeline's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing a preview frame.
///
/// A failed frame is abandoned, its working set is swept, and the next
/// redraw starts fresh; none of these are fatal to the application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The working set would outgrow its per-frame node budget
    #[error("working set exceeded its budget of {limit} nodes")]
    CapacityExceeded {
        /// Nodes the pipeline tried to hold
        nodes: usize,
        /// Configured budget
        limit: usize,
    },

    /// The scene nests deeper than the configured limit
    #[error("scene nesting depth {depth} exceeds the limit of {limit}")]
    DepthExceeded {
        /// Depth reached while walking the scene
        depth: usize,
        /// Configured limit
        limit: usize,
    },
}
