//! Vertical cell merges.
//!
//! RTF links merged cells purely by position: a `\clvmrg` cell continues
//! whatever `\clvmgf` span sits at the same column index in the row above.
//! [`MergeTracker`] walks rows in order and rejects continuations that have
//! nothing to continue or that do not line up with the cell above.

use super::control::ControlWord;
use super::error::{RtfError, RtfResult};

/// Vertical merge state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum VerticalMerge {
    #[default]
    None,
    /// Starts a span that extends downward
    First,
    /// Continues the span of the cell above
    Continuation,
}

impl VerticalMerge {
    pub(crate) fn control_word(self) -> Option<ControlWord> {
        match self {
            VerticalMerge::None => None,
            VerticalMerge::First => Some(ControlWord::merge_first()),
            VerticalMerge::Continuation => Some(ControlWord::merge_continue()),
        }
    }
}

/// Per-column span state carried from one row to the next.
#[derive(Debug, Default)]
pub struct MergeTracker {
    /// Right boundary of the open span at each column of the previous row
    open: Vec<Option<i32>>,
    table: usize,
    row: usize,
}

impl MergeTracker {
    /// Tracker for the table at `table` (its index among the document's tables).
    pub fn new(table: usize) -> Self {
        Self {
            open: Vec::new(),
            table,
            row: 0,
        }
    }

    /// Feed the next row as `(state, cellx)` pairs in column order.
    pub fn advance<I>(&mut self, cells: I) -> RtfResult<()>
    where
        I: IntoIterator<Item = (VerticalMerge, i32)>,
    {
        let mut next = Vec::with_capacity(self.open.len());
        for (column, (state, boundary)) in cells.into_iter().enumerate() {
            let span = match state {
                VerticalMerge::None => None,
                VerticalMerge::First => Some(boundary),
                VerticalMerge::Continuation => {
                    let expected = self.open.get(column).copied().flatten().ok_or(
                        RtfError::MergeWithoutAnchor {
                            table: self.table,
                            row: self.row,
                            column,
                        },
                    )?;
                    if expected != boundary {
                        return Err(RtfError::MergeBoundaryMismatch {
                            table: self.table,
                            row: self.row,
                            column,
                            expected,
                            found: boundary,
                        });
                    }
                    Some(boundary)
                },
            };
            next.push(span);
        }
        self.open = next;
        self.row += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VerticalMerge::*;

    #[test]
    fn test_span_over_three_rows() {
        let mut tracker = MergeTracker::new(0);
        tracker.advance([(First, 2500), (None, 10000)]).unwrap();
        tracker
            .advance([(Continuation, 2500), (None, 6250), (None, 10000)])
            .unwrap();
        tracker.advance([(Continuation, 2500)]).unwrap();
        assert_eq!(tracker.row, 3);
    }

    #[test]
    fn test_continuation_without_first() {
        let mut tracker = MergeTracker::new(2);
        tracker.advance([(None, 100), (None, 200)]).unwrap();
        let err = tracker.advance([(None, 100), (Continuation, 200)]).unwrap_err();
        assert!(matches!(
            err,
            RtfError::MergeWithoutAnchor { table: 2, row: 1, column: 1 }
        ));
    }

    #[test]
    fn test_continuation_in_first_row() {
        let mut tracker = MergeTracker::new(0);
        assert!(tracker.advance([(Continuation, 100)]).is_err());
    }

    #[test]
    fn test_none_row_breaks_the_span() {
        let mut tracker = MergeTracker::new(0);
        tracker.advance([(First, 100)]).unwrap();
        tracker.advance([(None, 100)]).unwrap();
        assert!(tracker.advance([(Continuation, 100)]).is_err());
    }

    #[test]
    fn test_boundary_mismatch() {
        let mut tracker = MergeTracker::new(0);
        tracker.advance([(First, 2500), (None, 10000)]).unwrap();
        let err = tracker.advance([(Continuation, 3000)]).unwrap_err();
        assert!(matches!(
            err,
            RtfError::MergeBoundaryMismatch { expected: 2500, found: 3000, .. }
        ));
    }

    #[test]
    fn test_markers() {
        assert_eq!(None.control_word(), Option::None);
        assert_eq!(First.control_word().map(|w| w.name()), Some("clvmgf"));
        assert_eq!(Continuation.control_word().map(|w| w.name()), Some("clvmrg"));
    }
}
