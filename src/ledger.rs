//! Per-observation nearest / second-nearest medoid bookkeeping.
//!
//! Three buffer sets are kept, one [`Record`] per row in each:
//!
//! * `current` - authoritative state for the committed medoid set,
//! * `temp` - scratch written by every scoring pass,
//! * `best` - the scratch of the best candidate seen in the running round.
//!
//! A promising candidate is kept by exchanging `temp` and `best`; a round is
//! committed by exchanging `best` and `current`. Both are `O(1)` swaps of the
//! owning vectors, so the per-candidate cost stays the distance scan.

use crate::Float;

/// Nearest (`D`, `DR`) and second-nearest (`E`, `ER`) medoid of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<T> {
    pub nearest: T,
    pub nearest_row: Option<usize>,
    pub second: T,
    pub second_row: Option<usize>,
}

impl<T: Float> Record<T> {
    pub fn unassigned() -> Self {
        Self {
            nearest: T::infinity(),
            nearest_row: None,
            second: T::infinity(),
            second_row: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ledger<T> {
    current: Vec<Record<T>>,
    temp: Vec<Record<T>>,
    best: Vec<Record<T>>,
}

impl<T: Float> Ledger<T> {
    pub fn new(n_rows: usize) -> Self {
        let fresh = vec![Record::unassigned(); n_rows];
        Self {
            current: fresh.clone(),
            temp: fresh.clone(),
            best: fresh,
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn current(&self) -> &[Record<T>] {
        &self.current
    }

    /// Read access to `current` alongside write access to `temp`.
    pub(crate) fn scratch(&mut self) -> (&[Record<T>], &mut [Record<T>]) {
        (&self.current, &mut self.temp)
    }

    /// Remember the last scoring pass as the round's best so far.
    pub(crate) fn keep_candidate(&mut self) {
        std::mem::swap(&mut self.temp, &mut self.best);
    }

    /// Make the round's best candidate authoritative.
    pub(crate) fn commit(&mut self) {
        std::mem::swap(&mut self.best, &mut self.current);
    }

    /// Total nearest-medoid distance over the committed records, summed in
    /// row order.
    pub fn sum_of_dissimilarities(&self) -> T {
        self.current
            .iter()
            .fold(T::zero(), |acc, record| acc + record.nearest)
    }

    pub(crate) fn into_current(self) -> Vec<Record<T>> {
        self.current
    }
}
