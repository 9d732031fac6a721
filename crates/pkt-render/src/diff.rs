#![forbid(unsafe_code)]

//! Row diff: which cells of a row must be rewritten.
//!
//! The painter repositions the cursor with relative-move sequences that cost
//! four to seven bytes. Skipping over a short stretch of unchanged cells is
//! therefore more expensive than simply rewriting them, so differing cells
//! separated by fewer than [`MIN_SKIP_GAP`] unchanged cells are merged into
//! one run.
//!
//! # Algorithm
//!
//! 1. Scan left to right for the first differing cell; it starts a run.
//! 2. Keep scanning. Each differing cell extends the run to that cell.
//! 3. Once [`MIN_SKIP_GAP`] consecutive unchanged cells follow the run's last
//!    differing cell, close the run and go back to step 1.
//!
//! ```
//! use pkt_render::cell::{Cell, Color};
//! use pkt_render::diff::row_runs;
//!
//! let old = vec![Cell::BLANK; 20];
//! let mut new = old.clone();
//! new[2] = Cell::new(b'a', Color::INHERIT);
//! new[5] = Cell::new(b'b', Color::INHERIT);
//! new[15] = Cell::new(b'c', Color::INHERIT);
//!
//! let runs = row_runs(0, &old, &new);
//! assert_eq!(runs.len(), 2);
//! assert_eq!((runs[0].x0, runs[0].x1), (2, 5));
//! assert_eq!((runs[1].x0, runs[1].x1), (15, 15));
//! ```

use smallvec::SmallVec;

use crate::cell::Cell;

/// Unchanged cells needed between two differences before they are painted
/// as separate runs.
pub const MIN_SKIP_GAP: usize = 7;

/// A stretch of one row to rewrite. Both ends are differing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    /// Row index.
    pub y: usize,
    /// Start column (inclusive).
    pub x0: usize,
    /// End column (inclusive).
    pub x1: usize,
}

impl ChangeRun {
    #[inline]
    pub const fn new(y: usize, x0: usize, x1: usize) -> Self {
        debug_assert!(x0 <= x1);
        Self { y, x0, x1 }
    }

    /// Number of cells in the run.
    #[inline]
    pub const fn len(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    /// Always false; a run covers at least one cell.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Runs for one row. Most rows change in at most a couple of places.
pub type RowRuns = SmallVec<[ChangeRun; 4]>;

/// Compute the runs needed to turn `old` into `new` on row `y`.
///
/// Cells of `new` beyond the end of `old` always differ.
#[must_use]
pub fn row_runs(y: usize, old: &[Cell], new: &[Cell]) -> RowRuns {
    let differs = |x: usize| old.get(x) != Some(&new[x]);
    let width = new.len();
    let mut runs = RowRuns::new();
    let mut x = 0;
    while x < width {
        if !differs(x) {
            x += 1;
            continue;
        }
        let start = x;
        let mut last = x;
        x += 1;
        while x < width && x - last <= MIN_SKIP_GAP {
            if differs(x) {
                last = x;
            }
            x += 1;
        }
        runs.push(ChangeRun::new(y, start, last));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Color;

    fn row_with(width: usize, marks: &[usize]) -> Vec<Cell> {
        let mut row = vec![Cell::BLANK; width];
        for &x in marks {
            row[x] = Cell::new(b'#', Color::INHERIT);
        }
        row
    }

    fn spans(runs: &RowRuns) -> Vec<(usize, usize)> {
        runs.iter().map(|r| (r.x0, r.x1)).collect()
    }

    #[test]
    fn identical_rows_have_no_runs() {
        let row = row_with(30, &[3, 9]);
        assert!(row_runs(0, &row, &row).is_empty());
    }

    #[test]
    fn single_cell_change() {
        let old = row_with(30, &[]);
        let new = row_with(30, &[12]);
        assert_eq!(spans(&row_runs(4, &old, &new)), vec![(12, 12)]);
        assert_eq!(row_runs(4, &old, &new)[0].y, 4);
    }

    #[test]
    fn gap_of_seven_splits() {
        let old = row_with(40, &[]);
        let new = row_with(40, &[10, 18]);
        assert_eq!(spans(&row_runs(0, &old, &new)), vec![(10, 10), (18, 18)]);
    }

    #[test]
    fn gap_of_six_merges() {
        let old = row_with(40, &[]);
        let new = row_with(40, &[10, 17]);
        assert_eq!(spans(&row_runs(0, &old, &new)), vec![(10, 17)]);
    }

    #[test]
    fn chained_small_gaps_merge_into_one_run() {
        let old = row_with(60, &[]);
        let new = row_with(60, &[5, 11, 17, 23]);
        assert_eq!(spans(&row_runs(0, &old, &new)), vec![(5, 23)]);
    }

    #[test]
    fn color_change_counts_as_difference() {
        let old = row_with(10, &[]);
        let mut new = old.clone();
        new[4] = Cell::new(b' ', Color::new(231, 238));
        assert_eq!(spans(&row_runs(0, &old, &new)), vec![(4, 4)]);
    }

    #[test]
    fn run_at_row_end() {
        let old = row_with(10, &[]);
        let new = row_with(10, &[8, 9]);
        assert_eq!(spans(&row_runs(0, &old, &new)), vec![(8, 9)]);
    }

    #[test]
    fn shorter_old_row_differs_past_its_end() {
        let old = row_with(4, &[]);
        let new = row_with(6, &[]);
        assert_eq!(spans(&row_runs(0, &old, &new)), vec![(4, 5)]);
    }

    #[test]
    fn run_len() {
        assert_eq!(ChangeRun::new(0, 3, 7).len(), 5);
        assert!(!ChangeRun::new(0, 3, 3).is_empty());
    }
}
