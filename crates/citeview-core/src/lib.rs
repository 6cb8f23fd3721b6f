//! Citeview Core - citation grouping and sticky annotation positioning
//!
//! This crate provides the pure pieces of the scrollable result panel:
//! - Result payload model (citations, directory citations, new code, diffs)
//! - Citation grouping by file or directory path
//! - Geometry abstraction over the host's layout tree
//! - The positioning pass that computes per-comment translations
//!
//! Nothing here touches timers or I/O; the event-driven wiring lives in
//! the `citeview-panel` crate.

pub mod citations;
pub mod constants;
pub mod geometry;
pub mod payload;
pub mod position;

// Re-exports for convenience
pub use citations::{CitationEntry, CitationGroups, Citations};
pub use geometry::{ElementRect, GeometrySnapshot, GeometrySource, StaticGeometry};
pub use payload::{other_blocks, parse_results, PayloadError, ResultBlock};
pub use position::{compute_offsets, CommentOffset};
