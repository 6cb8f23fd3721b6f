//! Geometry abstraction
//!
//! The positioning pass needs live element geometry but must stay testable
//! without a rendering engine, so all layout reads go through the
//! `GeometrySource` trait. Rects are viewport-relative, the way a layout
//! tree reports them; adding the current scroll offset converts to content
//! space.
//!
//! Absence of a rect is a normal transient state (element not mounted
//! yet), never an error.

use std::collections::HashMap;

/// Bounding box of one element, viewport-relative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub bottom: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
}

impl ElementRect {
    pub fn new(top: f64, height: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom: top + height,
            height,
            left,
            right,
        }
    }
}

/// Supplies current, post-layout geometry at call time
///
/// Implementations must not cache across positioning passes; layout can
/// change between samples (resize, content load).
pub trait GeometrySource {
    /// Bounding box for an element id, or `None` while it is not mounted
    fn rect(&self, element_id: &str) -> Option<ElementRect>;
}

/// The geometry one positioning step consumes for one citation
///
/// Read fresh each pass and discarded immediately after use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    pub comment_height: f64,
    pub anchor_top: f64,
    pub anchor_bottom: f64,
}

impl GeometrySnapshot {
    /// Read fresh geometry for an anchor/comment pair
    ///
    /// `None` when either element is missing; the caller skips the entry
    /// for this pass and retries next sample.
    pub fn read(source: &impl GeometrySource, anchor_id: &str, comment_id: &str) -> Option<Self> {
        let anchor = source.rect(anchor_id)?;
        let comment = source.rect(comment_id)?;
        Some(Self {
            comment_height: comment.height,
            anchor_top: anchor.top,
            anchor_bottom: anchor.bottom,
        })
    }
}

/// Map-backed geometry for headless hosts and tests
///
/// Stores rects in content space and reports them viewport-relative for
/// the current scroll offset, matching what a scrolled layout tree would
/// return.
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    rects: HashMap<String, ElementRect>,
    scroll_top: f64,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element rect in content space
    pub fn insert(&mut self, element_id: impl Into<String>, rect: ElementRect) {
        self.rects.insert(element_id.into(), rect);
    }

    pub fn remove(&mut self, element_id: &str) {
        self.rects.remove(element_id);
    }

    /// Set the scroll offset used to derive viewport-relative rects
    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top;
    }
}

impl GeometrySource for StaticGeometry {
    fn rect(&self, element_id: &str) -> Option<ElementRect> {
        self.rects.get(element_id).map(|r| ElementRect {
            top: r.top - self.scroll_top,
            bottom: r.bottom - self.scroll_top,
            ..*r
        })
    }
}
