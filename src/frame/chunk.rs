use crate::Float;

/// A contiguous horizontal slice of a [`Frame`](super::Frame).
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a, T: Float> {
    start: usize,
    n_cols: usize,
    data: &'a [T],
}

impl<'a, T: Float> Chunk<'a, T> {
    pub(super) fn new(start: usize, n_cols: usize, data: &'a [T]) -> Self {
        Self { start, n_cols, data }
    }

    /// Global row index of this chunk's first row.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row `r` of this chunk, where `r` is local to the chunk.
    #[inline]
    pub fn row(&self, r: usize) -> &'a [T] {
        let data = self.data;
        &data[r * self.n_cols..(r + 1) * self.n_cols]
    }

    /// `(global row index, features)` for every row in the chunk.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &'a [T])> + 'a {
        let start = self.start;
        let data = self.data;
        data.chunks(self.n_cols)
            .enumerate()
            .map(move |(r, point)| (start + r, point))
    }
}
