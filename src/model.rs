use std::fmt;

use crate::ledger::Record;
use crate::measure::DissimilarityMeasure;
use crate::Float;

/// The result of a PAM fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PamModel<T: Float> {
    pub(crate) medoids: Vec<Vec<T>>,
    pub(crate) medoid_rows: Vec<usize>,
    pub(crate) measure: DissimilarityMeasure,
    pub(crate) summary: ModelSummary<T>,
    pub(crate) records: Vec<Record<T>>,
}

/// Progress statistics reported after BUILD and after every accepted swap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSummary<T> {
    pub swap_iterations: usize,
    pub sum_of_dissimilarities: T,
}

impl<T: Float> PamModel<T> {
    /// Feature vectors of the medoids, parallel to [`medoid_rows`](Self::medoid_rows).
    pub fn medoids(&self) -> &[Vec<T>] {
        &self.medoids
    }

    /// Row indices of the medoids in the training frame.
    pub fn medoid_rows(&self) -> &[usize] {
        &self.medoid_rows
    }

    pub fn swap_iterations(&self) -> usize {
        self.summary.swap_iterations
    }

    /// Total dissimilarity of every training row to its nearest medoid.
    pub fn sum_of_dissimilarities(&self) -> T {
        self.summary.sum_of_dissimilarities
    }

    pub fn summary(&self) -> ModelSummary<T> {
        self.summary
    }

    pub fn dissimilarity_measure(&self) -> DissimilarityMeasure {
        self.measure
    }

    /// Final nearest / second-nearest records of the training rows.
    pub fn ledger(&self) -> &[Record<T>] {
        &self.records
    }

    /// Index into [`medoid_rows`](Self::medoid_rows) of each training row's
    /// medoid. `None` only for rows whose distances were all NaN.
    pub fn assignments(&self) -> Vec<Option<usize>> {
        self.records
            .iter()
            .map(|record| {
                record
                    .nearest_row
                    .and_then(|row| self.medoid_rows.iter().position(|&m| m == row))
            })
            .collect()
    }

    /// Index of the medoid nearest to `point`, ties going to the lower index.
    pub fn predict(&self, point: &[T]) -> usize {
        let mut best = 0;
        let mut best_dist = T::infinity();
        for (idx, medoid) in self.medoids.iter().enumerate() {
            let dist = self.measure.distance(point, medoid);
            if dist < best_dist {
                best_dist = dist;
                best = idx;
            }
        }
        best
    }
}

impl<T: Float> fmt::Display for ModelSummary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sum = self.sum_of_dissimilarities.to_f64().unwrap_or(f64::NAN);
        writeln!(f, "Model Summary")?;
        writeln!(f, "{:>25}  {:>22}", "Number of Swap Iterations", "Sum of Dissimilarities")?;
        write!(f, "{:>25}  {:>22.5}", self.swap_iterations, sum)
    }
}
