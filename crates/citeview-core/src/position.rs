//! Sticky annotation positioning
//!
//! One pass turns a scroll offset plus live geometry into a translation
//! per citation comment. Comments track the viewport while their anchor is
//! in view, then freeze at the anchor's trailing edge and stack below
//! previously frozen comments. This mimics native sticky positioning
//! without using it; the stacking rule depends on sibling state, not just
//! each element's own geometry.
//!
//! The pass is a pure function: accumulators reset every call, geometry is
//! read fresh, the only output is the offset list.

use tracing::trace;

use crate::citations::{CitationEntry, CitationGroups};
use crate::constants::layout::{COMMENT_GUTTER, TRAILING_CHROME, TRAILING_CHROME_LAST};
use crate::geometry::{GeometrySnapshot, GeometrySource};

/// Computed translation for one citation comment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommentOffset<'a> {
    pub entry: &'a CitationEntry,
    /// Vertical translation to apply to the comment element, in px
    pub offset_y: f64,
    /// Whether the comment has frozen at its anchor's trailing edge
    pub locked: bool,
}

/// Per-pass accumulators; never persisted between passes
#[derive(Debug, Default)]
struct PositionerState {
    /// Height consumed by all comments placed so far
    cumulative_comment_height: f64,
    /// Height consumed by comments that have locked
    cumulative_sticky_height: f64,
}

/// Compute translations for every positionable comment
///
/// Groups are traversed in stored order, entries in ascending index; the
/// whole pass uses the single `scroll_top` it was given. Entries whose
/// geometry is not available yet are skipped without touching the
/// accumulators and retried on the next sample.
pub fn compute_offsets<'a>(
    scroll_top: f64,
    groups: &'a CitationGroups,
    geometry: &impl GeometrySource,
) -> Vec<CommentOffset<'a>> {
    let mut state = PositionerState::default();
    let mut offsets = Vec::with_capacity(groups.entry_count());

    for (_, entries) in groups.iter() {
        for entry in entries {
            let Some(snapshot) = GeometrySnapshot::read(geometry, &entry.anchor_id, &entry.comment_id)
            else {
                trace!(index = entry.index, "geometry not available, skipping entry");
                continue;
            };
            offsets.push(position_entry(scroll_top, entry, snapshot, &mut state));
        }
    }

    offsets
}

/// Position one comment and update the pass accumulators
fn position_entry<'a>(
    scroll_top: f64,
    entry: &'a CitationEntry,
    snapshot: GeometrySnapshot,
    state: &mut PositionerState,
) -> CommentOffset<'a> {
    let trailing_chrome = if entry.is_last_in_group {
        TRAILING_CHROME_LAST
    } else {
        TRAILING_CHROME
    };

    // Anchor bottom in content space, minus the chrome below the excerpt
    let anchor_bottom_adjusted = snapshot.anchor_bottom + scroll_top - trailing_chrome;

    // Furthest down this comment may sit before running past its anchor
    let lowest_allowed =
        anchor_bottom_adjusted - snapshot.comment_height - state.cumulative_comment_height;

    // Track the viewport, stacked below frozen siblings, clamped to the
    // anchor and never above the comment's static position
    let offset_y = (scroll_top - state.cumulative_sticky_height)
        .min(lowest_allowed)
        .max(0.0);

    let locked = offset_y == lowest_allowed && scroll_top > anchor_bottom_adjusted;
    if locked {
        state.cumulative_sticky_height += snapshot.comment_height + COMMENT_GUTTER;
    }
    state.cumulative_comment_height += snapshot.comment_height + COMMENT_GUTTER;

    CommentOffset {
        entry,
        offset_y,
        locked,
    }
}
