//! Panel constants and configuration defaults
//!
//! Centralized location for the fixed visual-chrome values the positioning
//! pass depends on. These mirror the shipped presentation; they are product
//! numbers, not derived ones.

use std::time::Duration;

/// Layout configuration
pub mod layout {
    /// Trailing chrome below the last anchor of a group (card footer only)
    pub const TRAILING_CHROME_LAST: f64 = 170.0;

    /// Trailing chrome below a non-last anchor (footer plus the spacing
    /// reserved for the following code part)
    pub const TRAILING_CHROME: f64 = 205.0;

    /// Vertical gutter between stacked comments
    pub const COMMENT_GUTTER: f64 = 12.0;

    /// Content overflow beyond which the "more results" hint is shown
    pub const MORE_RESULTS_THRESHOLD: f64 = 180.0;
}

/// Scroll sampling configuration
pub mod sampling {
    use super::*;

    /// Minimum interval between positioning passes
    pub const SCROLL_SAMPLE_INTERVAL: Duration = Duration::from_millis(75);
}
