use crate::frame::Frame;
use crate::Float;

/// The selected medoids: row indices and a copy of their feature vectors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Medoids<T> {
    rows: Vec<usize>,
    points: Vec<Vec<T>>,
}

impl<T: Float> Medoids<T> {
    pub(crate) fn with_capacity(k: usize) -> Self {
        Self {
            rows: Vec::with_capacity(k),
            points: Vec::with_capacity(k),
        }
    }

    pub(crate) fn from_rows(frame: &Frame<T>, rows: &[usize]) -> Self {
        let mut medoids = Self::with_capacity(rows.len());
        for &row in rows {
            medoids.push(frame, row);
        }
        medoids
    }

    pub(crate) fn push(&mut self, frame: &Frame<T>, row: usize) {
        self.rows.push(row);
        self.points.push(frame.row(row).to_vec());
    }

    /// Put row `row` in the place of the medoid at `slot`.
    pub(crate) fn replace(&mut self, frame: &Frame<T>, slot: usize, row: usize) {
        self.rows[slot] = row;
        self.points[slot] = frame.row(row).to_vec();
    }

    pub(crate) fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// `(row, features)` of each medoid in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &[T])> + '_ {
        self.rows
            .iter()
            .copied()
            .zip(self.points.iter().map(Vec::as_slice))
    }

    pub(crate) fn into_parts(self) -> (Vec<usize>, Vec<Vec<T>>) {
        (self.rows, self.points)
    }
}
