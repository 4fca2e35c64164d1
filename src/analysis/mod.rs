//! Analysis module - read-only queries over a decoded dump

pub mod graph;
pub mod weights;

// Re-export key types
pub use graph::{GraphStats, TransitionGraph};
pub use weights::{Polarity, RankedWeight, top_state_features, top_transitions};
