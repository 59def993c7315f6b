//! Edit tracking between parses.
//!
//! The host reports each buffer mutation as an [`EditRecord`]; the tracker
//! coalesces pending records into one [`DirtyRange`] - the minimal span
//! known to require re-parsing - which the engine consumes on the next
//! `feed`. All offsets are *character* positions, keeping the protocol
//! independent of text encoding width.
//!
//! Only a single dirty region is tracked per parse cycle: overlapping or
//! adjacent edits merge by interval union, and disjoint edits widen the
//! range to their bounding span. Multi-region splicing is out of scope, so
//! precision is traded for a single splice per cycle.

use crate::base::EngineError;

/// One buffer mutation: `[start, old_end)` in the pre-edit buffer was
/// replaced by `[start, new_end)` in the post-edit buffer.
///
/// Invariant: `start <= old_end && start <= new_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRecord {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

impl EditRecord {
    pub fn new(start: usize, old_end: usize, new_end: usize) -> Result<Self, EngineError> {
        if start > old_end || start > new_end {
            return Err(EngineError::InvalidEdit {
                start,
                old_end,
                new_end,
            });
        }
        Ok(Self {
            start,
            old_end,
            new_end,
        })
    }
}

/// The coalesced span of every edit since the last successful parse.
///
/// `start..old_end` is in the coordinates of the *last parsed* snapshot;
/// `start..new_end` is in the coordinates of the current buffer. Each
/// incoming edit arrives in current-buffer coordinates and is rebased
/// through the accumulated size delta when merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRange {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

impl DirtyRange {
    fn from_edit(edit: EditRecord) -> Self {
        Self {
            start: edit.start,
            old_end: edit.old_end,
            new_end: edit.new_end,
        }
    }

    /// Merge a later edit into this range.
    ///
    /// Positions in the new edit at or beyond this range's `new_end` lie in
    /// untouched text; they map back to the old snapshot shifted by the
    /// accumulated delta, which is where `old_end` grows from.
    fn merge(self, edit: EditRecord) -> Self {
        let start = self.start.min(edit.start);
        let old_end = self.old_end + edit.old_end.saturating_sub(self.new_end);
        let new_end = edit.new_end + self.new_end.saturating_sub(edit.old_end);
        Self {
            start,
            old_end,
            new_end,
        }
    }
}

/// Records edit ranges and computes the minimal re-parse region.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditTracker {
    dirty: Option<DirtyRange>,
}

impl EditTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edit, coalescing into the pending dirty range.
    pub fn record(&mut self, edit: EditRecord) {
        self.dirty = Some(match self.dirty {
            None => DirtyRange::from_edit(edit),
            Some(dirty) => dirty.merge(edit),
        });
    }

    /// The pending dirty range, if any edits were recorded.
    pub fn dirty(&self) -> Option<DirtyRange> {
        self.dirty
    }

    /// Reset after a successful feed.
    pub fn clear(&mut self) {
        self.dirty = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(start: usize, old_end: usize, new_end: usize) -> EditRecord {
        EditRecord::new(start, old_end, new_end).unwrap()
    }

    #[test]
    fn test_invalid_edit_rejected() {
        assert!(matches!(
            EditRecord::new(5, 3, 6),
            Err(EngineError::InvalidEdit { .. })
        ));
        assert!(matches!(
            EditRecord::new(5, 6, 3),
            Err(EngineError::InvalidEdit { .. })
        ));
        assert!(EditRecord::new(5, 5, 5).is_ok());
    }

    #[test]
    fn test_single_edit() {
        let mut tracker = EditTracker::new();
        tracker.record(edit(2, 5, 6));
        assert_eq!(
            tracker.dirty(),
            Some(DirtyRange {
                start: 2,
                old_end: 5,
                new_end: 6
            })
        );
    }

    #[test]
    fn test_overlapping_edits_coalesce() {
        // [2,5) -> [2,6), then [4,6) -> [4,7): one range covering at
        // least [2,7) in the current buffer
        let mut tracker = EditTracker::new();
        tracker.record(edit(2, 5, 6));
        tracker.record(edit(4, 6, 7));
        let dirty = tracker.dirty().unwrap();
        assert_eq!(dirty.start, 2);
        assert_eq!(dirty.old_end, 5);
        assert!(dirty.new_end >= 7);
    }

    #[test]
    fn test_disjoint_edits_bound_to_single_span() {
        // Edits at [1,2) and [10,11): the dirty range is the bounding span
        let mut tracker = EditTracker::new();
        tracker.record(edit(1, 2, 2));
        tracker.record(edit(10, 11, 11));
        let dirty = tracker.dirty().unwrap();
        assert_eq!(dirty.start, 1);
        assert_eq!(dirty.old_end, 11);
        assert_eq!(dirty.new_end, 11);
    }

    #[test]
    fn test_later_edit_rebased_through_delta() {
        // Insert 3 chars at 0, then edit at [10,12) of the *new* buffer.
        // [10,12) current maps to [7,9) in the old snapshot.
        let mut tracker = EditTracker::new();
        tracker.record(edit(0, 0, 3));
        tracker.record(edit(10, 12, 13));
        let dirty = tracker.dirty().unwrap();
        assert_eq!(dirty.start, 0);
        assert_eq!(dirty.old_end, 9);
        assert_eq!(dirty.new_end, 13);
    }

    #[test]
    fn test_edit_inside_previous_insertion() {
        // Replace [2,5) with 4 chars (new_end 6), then edit wholly inside
        // the inserted text: old span must not grow
        let mut tracker = EditTracker::new();
        tracker.record(edit(2, 5, 6));
        tracker.record(edit(3, 4, 8));
        let dirty = tracker.dirty().unwrap();
        assert_eq!(dirty.start, 2);
        assert_eq!(dirty.old_end, 5);
        assert_eq!(dirty.new_end, 10);
    }

    #[test]
    fn test_clear_resets() {
        let mut tracker = EditTracker::new();
        tracker.record(edit(0, 1, 2));
        tracker.clear();
        assert_eq!(tracker.dirty(), None);
    }

    #[test]
    fn test_pure_deletion() {
        let mut tracker = EditTracker::new();
        tracker.record(edit(4, 9, 4));
        assert_eq!(
            tracker.dirty(),
            Some(DirtyRange {
                start: 4,
                old_end: 9,
                new_end: 4
            })
        );
    }
}
