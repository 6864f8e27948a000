use crate::error::{PamError, Result};
use crate::Float;

mod chunk;

pub use self::chunk::Chunk;

/// Rows per chunk when none is requested.
pub const DEFAULT_CHUNK_ROWS: usize = 1024;

/// An immutable, row-major table of observations split into horizontal chunks.
///
/// Every row lives in exactly one chunk. Chunks are the unit of work handed to
/// an [`Executor`](crate::Executor).
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<T: Float> {
    data: Vec<T>,
    n_rows: usize,
    n_cols: usize,
    chunk_rows: usize,
}

impl<T: Float> Frame<T> {
    /// Copy a collection of equal-length feature vectors into a frame.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let n_cols = rows.first().ok_or(PamError::EmptyDataset)?.len();
        if n_cols == 0 {
            return Err(PamError::NoFeatures);
        }

        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for (n, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(PamError::WrongDimension(format!(
                    "0th observation has {n_cols} dimensions, but {n}th has {}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            n_rows: rows.len(),
            n_cols,
            chunk_rows: DEFAULT_CHUNK_ROWS.min(rows.len()),
        })
    }

    /// Take ownership of a flat row-major buffer of `n_cols` columns.
    pub fn from_flat(data: Vec<T>, n_cols: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(PamError::EmptyDataset);
        }
        if n_cols == 0 {
            return Err(PamError::NoFeatures);
        }
        if data.len() % n_cols != 0 {
            return Err(PamError::WrongDimension(format!(
                "buffer of {} values is not a whole number of {n_cols}-column rows",
                data.len()
            )));
        }

        let n_rows = data.len() / n_cols;
        Ok(Self {
            data,
            n_rows,
            n_cols,
            chunk_rows: DEFAULT_CHUNK_ROWS.min(n_rows),
        })
    }

    /// Re-partition the frame into chunks of at most `chunk_rows` rows.
    pub fn with_chunk_rows(mut self, chunk_rows: usize) -> Self {
        self.chunk_rows = chunk_rows.clamp(1, self.n_rows);
        self
    }

    pub fn num_rows(&self) -> usize {
        self.n_rows
    }

    pub fn num_cols(&self) -> usize {
        self.n_cols
    }

    pub fn num_chunks(&self) -> usize {
        (self.n_rows + self.chunk_rows - 1) / self.chunk_rows
    }

    pub fn chunk_rows(&self) -> usize {
        self.chunk_rows
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.n_rows && col < self.n_cols);
        self.data[row * self.n_cols + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    /// The chunks of this frame in row order.
    pub fn chunks(&self) -> impl ExactSizeIterator<Item = Chunk<'_, T>> + '_ {
        self.data
            .chunks(self.chunk_rows * self.n_cols)
            .enumerate()
            .map(move |(idx, data)| Chunk::new(idx * self.chunk_rows, self.n_cols, data))
    }

    /// Split a per-row buffer along this frame's chunk boundaries.
    ///
    /// `buf` must hold exactly one entry per row.
    pub(crate) fn split_rows_mut<'a, R>(&self, buf: &'a mut [R]) -> Vec<&'a mut [R]> {
        debug_assert_eq!(buf.len(), self.n_rows);
        buf.chunks_mut(self.chunk_rows).collect()
    }

    /// Split a per-row buffer along this frame's chunk boundaries.
    pub(crate) fn split_rows<'a, R>(&self, buf: &'a [R]) -> Vec<&'a [R]> {
        debug_assert_eq!(buf.len(), self.n_rows);
        buf.chunks(self.chunk_rows).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<f64>> {
        (0..10).map(|i| vec![i as f64, -(i as f64)]).collect()
    }

    #[test]
    fn shape_and_access() {
        let frame = Frame::from_rows(&rows()).unwrap();
        assert_eq!(frame.num_rows(), 10);
        assert_eq!(frame.num_cols(), 2);
        assert_eq!(frame.get(3, 1), -3.0);
        assert_eq!(frame.row(7), &[7.0, -7.0]);
        assert_eq!(frame.num_chunks(), 1);
    }

    #[test]
    fn chunks_cover_every_row_once() {
        let frame = Frame::from_rows(&rows()).unwrap().with_chunk_rows(3);
        assert_eq!(frame.num_chunks(), 4);

        let mut seen = vec![];
        for chunk in frame.chunks() {
            for (row, point) in chunk.rows() {
                assert_eq!(point, frame.row(row));
                seen.push(row);
            }
        }
        assert_eq!(seen, (0..10).collect::<Vec<_>>());

        let lens: Vec<usize> = frame.chunks().map(|c| c.len()).collect();
        assert_eq!(lens, vec![3, 3, 3, 1]);

        for (idx, chunk) in frame.chunks().enumerate() {
            assert_eq!(chunk.start(), idx * 3);
            for r in 0..chunk.len() {
                assert_eq!(chunk.row(r), frame.row(chunk.start() + r));
            }
        }

        let mut buf = vec![0; 10];
        let parts = frame.split_rows_mut(&mut buf);
        assert_eq!(parts.iter().map(|p| p.len()).collect::<Vec<_>>(), lens);
    }

    #[test]
    fn zero_chunk_rows_is_clamped() {
        let frame = Frame::from_rows(&rows()).unwrap().with_chunk_rows(0);
        assert_eq!(frame.chunk_rows(), 1);
        assert_eq!(frame.num_chunks(), 10);
    }

    #[test]
    fn rejects_bad_input() {
        let empty: Vec<Vec<f64>> = vec![];
        assert_eq!(Frame::from_rows(&empty), Err(PamError::EmptyDataset));
        assert_eq!(Frame::from_rows(&[Vec::<f64>::new()]), Err(PamError::NoFeatures));
        assert!(matches!(
            Frame::from_rows(&[vec![1.0, 2.0], vec![1.0]]),
            Err(PamError::WrongDimension(_))
        ));
        assert!(matches!(
            Frame::from_flat(vec![1.0, 2.0, 3.0], 2),
            Err(PamError::WrongDimension(_))
        ));
    }

    #[test]
    fn from_flat_matches_from_rows() {
        let flat: Vec<f64> = rows().into_iter().flatten().collect();
        let a = Frame::from_flat(flat, 2).unwrap();
        let b = Frame::from_rows(&rows()).unwrap();
        assert_eq!(a, b);
    }
}
