//! Citeview Panel - event-driven state for the scrollable result view
//!
//! Wires the pure core to a host event loop:
//! - Throttled scroll sampling with leading+trailing emission
//! - Active-record state and the "more results" affordance
//! - The positioning pass driver that writes translations through a sink

pub mod panel;
pub mod sampler;

// Re-exports
pub use panel::{OffsetSink, ResultPanel};
pub use sampler::ScrollSampler;
