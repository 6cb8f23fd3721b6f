//! Result panel state
//!
//! Owns everything one mounted result view needs between events: the
//! active record, its grouped citations, the scroll sampler, and the
//! "more results" affordance flag. Positioning passes run synchronously
//! inside the sampled scroll callback and write their only observable
//! effect through [`OffsetSink`].

use tracing::debug;

use citeview_core::citations::Citations;
use citeview_core::constants::layout::MORE_RESULTS_THRESHOLD;
use citeview_core::geometry::GeometrySource;
use citeview_core::payload::ResultBlock;
use citeview_core::position::compute_offsets;

use crate::sampler::ScrollSampler;

/// Receives computed comment translations
///
/// Applied once per entry per positioning pass; this is the panel's only
/// externally observable effect.
pub trait OffsetSink {
    fn apply_translate_y(&mut self, comment_id: &str, offset_px: f64);
}

/// State for one mounted result view
pub struct ResultPanel {
    /// Identifier of the record currently shown
    record_id: u64,
    /// Citations derived from the record's payload; immutable until the
    /// record or payload changes
    citations: Citations,
    /// Throttle over the raw scroll stream
    sampler: ScrollSampler,
    /// Whether any scroll sample has been observed for this record
    has_scrolled: bool,
}

impl ResultPanel {
    pub fn new(record_id: u64, blocks: &[ResultBlock]) -> Self {
        Self {
            record_id,
            citations: Citations::from_results(blocks),
            sampler: ScrollSampler::new(),
            has_scrolled: false,
        }
    }

    pub fn record_id(&self) -> u64 {
        self.record_id
    }

    pub fn citations(&self) -> &Citations {
        &self.citations
    }

    pub fn has_scrolled(&self) -> bool {
        self.has_scrolled
    }

    /// Switch to another record (or a refreshed payload for the same one)
    ///
    /// Citations are regrouped from scratch and the sampler is replaced,
    /// discarding any pending trailing emission that was computed against
    /// the old index set.
    pub fn set_record(&mut self, record_id: u64, blocks: &[ResultBlock]) {
        debug!(record_id, "switching active record");
        self.record_id = record_id;
        self.citations = Citations::from_results(blocks);
        self.sampler = ScrollSampler::new();
        self.has_scrolled = false;
    }

    /// Feed a raw scroll offset from the containing scrollable region
    ///
    /// Runs a positioning pass when the sampler lets the offset through.
    pub fn on_scroll(
        &mut self,
        scroll_top: f64,
        geometry: &impl GeometrySource,
        sink: &mut impl OffsetSink,
    ) {
        if let Some(sampled) = self.sampler.offer(scroll_top) {
            self.position(sampled, geometry, sink);
        }
    }

    /// Event-loop tick: flush a due trailing sample, if any
    pub fn tick(&mut self, geometry: &impl GeometrySource, sink: &mut impl OffsetSink) {
        if let Some(sampled) = self.sampler.poll() {
            self.position(sampled, geometry, sink);
        }
    }

    /// Whether the floating "more results" hint should be shown
    ///
    /// Content must overflow the viewport by more than the threshold and
    /// the user must not have scrolled this record yet.
    pub fn shows_more_results(&self, scroll_height: f64, client_height: f64) -> bool {
        scroll_height - client_height > MORE_RESULTS_THRESHOLD && !self.has_scrolled
    }

    /// Run one positioning pass against the active citation mapping
    fn position(
        &mut self,
        scroll_top: f64,
        geometry: &impl GeometrySource,
        sink: &mut impl OffsetSink,
    ) {
        // Any observed sample hides the affordance, even a tiny scroll
        self.has_scrolled = true;

        let groups = self.citations.active();
        if groups.is_empty() {
            return;
        }
        for offset in compute_offsets(scroll_top, groups, geometry) {
            sink.apply_translate_y(&offset.entry.comment_id, offset.offset_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citeview_core::geometry::{ElementRect, StaticGeometry};
    use citeview_core::payload::CiteBlock;
    use std::thread::sleep;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSink {
        applied: Vec<(String, f64)>,
    }

    impl OffsetSink for RecordingSink {
        fn apply_translate_y(&mut self, comment_id: &str, offset_px: f64) {
            self.applied.push((comment_id.to_string(), offset_px));
        }
    }

    fn cite(path: &str) -> ResultBlock {
        ResultBlock::Cite(CiteBlock {
            path: Some(path.into()),
            ..Default::default()
        })
    }

    fn fixture_geometry(scroll_top: f64) -> StaticGeometry {
        let mut geometry = StaticGeometry::new();
        geometry.insert("code-0", ElementRect::new(600.0, 400.0, 0.0, 640.0));
        geometry.insert("comment-0", ElementRect::new(600.0, 50.0, 660.0, 900.0));
        geometry.set_scroll_top(scroll_top);
        geometry
    }

    #[test]
    fn test_scroll_applies_offsets_through_sink() {
        let mut panel = ResultPanel::new(1, &[cite("src/a.rs")]);
        let geometry = fixture_geometry(900.0);
        let mut sink = RecordingSink::default();

        panel.on_scroll(900.0, &geometry, &mut sink);
        assert_eq!(sink.applied, vec![("comment-0".to_string(), 780.0)]);
    }

    #[test]
    fn test_more_results_hides_after_first_sample() {
        let mut panel = ResultPanel::new(1, &[cite("src/a.rs")]);
        let geometry = fixture_geometry(0.0);
        let mut sink = RecordingSink::default();

        // Overflow 200 > 180 and no scroll observed yet
        assert!(panel.shows_more_results(1000.0, 800.0));
        // Under the threshold the hint never shows
        assert!(!panel.shows_more_results(1000.0, 900.0));

        panel.on_scroll(5.0, &geometry, &mut sink);
        assert!(!panel.shows_more_results(1000.0, 800.0));

        // A new record resets the affordance
        panel.set_record(2, &[cite("src/b.rs")]);
        assert!(panel.shows_more_results(1000.0, 800.0));
    }

    #[test]
    fn test_empty_citations_are_noop() {
        let mut panel = ResultPanel::new(1, &[]);
        let geometry = StaticGeometry::new();
        let mut sink = RecordingSink::default();

        panel.on_scroll(300.0, &geometry, &mut sink);
        assert!(sink.applied.is_empty());
        // The sample still counts as observed
        assert!(panel.has_scrolled());
    }

    #[test]
    fn test_tick_flushes_trailing_sample() {
        let mut panel = ResultPanel::new(1, &[cite("src/a.rs")]);
        let mut sink = RecordingSink::default();

        // Leading emission at scroll 0, then a burst value held back
        panel.on_scroll(0.0, &fixture_geometry(0.0), &mut sink);
        panel.on_scroll(900.0, &fixture_geometry(900.0), &mut sink);
        assert_eq!(sink.applied.len(), 1);

        // Nothing due yet
        panel.tick(&fixture_geometry(900.0), &mut sink);
        assert_eq!(sink.applied.len(), 1);

        sleep(Duration::from_millis(90));
        panel.tick(&fixture_geometry(900.0), &mut sink);
        assert_eq!(sink.applied.len(), 2);
        assert_eq!(sink.applied[1], ("comment-0".to_string(), 780.0));
    }

    #[test]
    fn test_record_change_discards_pending_sample() {
        let mut panel = ResultPanel::new(1, &[cite("src/a.rs")]);
        let mut sink = RecordingSink::default();

        panel.on_scroll(0.0, &fixture_geometry(0.0), &mut sink);
        panel.on_scroll(900.0, &fixture_geometry(900.0), &mut sink);

        // Supersede: the held-back offset must never be positioned against
        // the new record's index set
        panel.set_record(2, &[cite("src/b.rs")]);
        sleep(Duration::from_millis(90));
        panel.tick(&fixture_geometry(900.0), &mut sink);
        assert_eq!(sink.applied.len(), 1);
    }
}
