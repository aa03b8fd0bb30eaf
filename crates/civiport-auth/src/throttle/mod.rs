//! Failure trackers over the pluggable counter store.

pub mod tracker;

pub use tracker::{AttemptTracker, BlockStatus, FailureOutcome};
