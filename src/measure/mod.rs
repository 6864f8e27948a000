use crate::Float;

/// How the dissimilarity between two observations is measured.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DissimilarityMeasure {
    #[default]
    Euclidean,
    Manhattan,
}

impl DissimilarityMeasure {
    /// Measure the dissimilarity between two feature vectors.
    ///
    /// Both vectors must have the same length; this is not checked.
    #[inline]
    pub fn distance<T: Float>(&self, a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        match *self {
            Self::Euclidean => euclidean(a, b),
            Self::Manhattan => manhattan(a, b),
        }
    }
}

fn euclidean<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y) * (x - y))
        .fold(T::zero(), |acc, x| acc + x)
        .sqrt()
}

fn manhattan<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y).abs())
        .fold(T::zero(), |acc, x| acc + x)
}
