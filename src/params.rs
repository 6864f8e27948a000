use crate::measure::DissimilarityMeasure;

// Defaults for parameters
const K_DEFAULT: usize = 2;
const DO_SWAP_DEFAULT: bool = true;
const MAX_SWAP_ITERATIONS_DEFAULT: usize = 1000;
const CHUNK_ROWS_DEFAULT: usize = crate::frame::DEFAULT_CHUNK_ROWS;

/// The parameters of a PAM fit. Use [`PamParams::builder`] to set them.
#[derive(Debug, Clone, PartialEq)]
pub struct PamParams {
    pub(crate) k: usize,
    pub(crate) dissimilarity_measure: DissimilarityMeasure,
    pub(crate) initial_medoids: Option<Vec<usize>>,
    pub(crate) do_swap: bool,
    pub(crate) max_swap_iterations: usize,
    pub(crate) chunk_rows: usize,
}

/// Builder object to set custom parameters.
#[derive(Debug, Clone, Default)]
pub struct PamParamsBuilder {
    k: Option<usize>,
    dissimilarity_measure: Option<DissimilarityMeasure>,
    initial_medoids: Option<Vec<usize>>,
    do_swap: Option<bool>,
    max_swap_iterations: Option<usize>,
    chunk_rows: Option<usize>,
}

impl PamParams {
    pub fn builder() -> PamParamsBuilder {
        PamParamsBuilder::default()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn dissimilarity_measure(&self) -> DissimilarityMeasure {
        self.dissimilarity_measure
    }

    pub fn initial_medoids(&self) -> Option<&[usize]> {
        self.initial_medoids.as_deref()
    }

    pub fn do_swap(&self) -> bool {
        self.do_swap
    }

    pub fn max_swap_iterations(&self) -> usize {
        self.max_swap_iterations
    }

    pub fn chunk_rows(&self) -> usize {
        self.chunk_rows
    }
}

impl Default for PamParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PamParamsBuilder {
    /// Sets the number of medoids to find. Checked against the dataset size
    /// when fitting. Defaults to 2.
    pub fn k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets how dissimilarity between observations is measured. Defaults to
    /// Euclidean.
    pub fn dissimilarity_measure(mut self, measure: DissimilarityMeasure) -> Self {
        self.dissimilarity_measure = Some(measure);
        self
    }

    /// Starts the SWAP phase from these rows instead of running BUILD. Must
    /// name exactly `k` distinct rows.
    pub fn initial_medoids(mut self, rows: Vec<usize>) -> Self {
        self.initial_medoids = Some(rows);
        self
    }

    /// Sets whether the SWAP phase runs at all. Defaults to true.
    pub fn do_swap(mut self, do_swap: bool) -> Self {
        self.do_swap = Some(do_swap);
        self
    }

    /// Caps the number of accepted swaps. Defaults to 1000.
    pub fn max_swap_iterations(mut self, max_swap_iterations: usize) -> Self {
        self.max_swap_iterations = Some(max_swap_iterations);
        self
    }

    /// Sets how many rows go into each chunk when fitting from raw rows.
    /// Values below one are raised to one. Defaults to 1024.
    pub fn chunk_rows(mut self, chunk_rows: usize) -> Self {
        self.chunk_rows = Some(chunk_rows.max(1));
        self
    }

    pub fn build(self) -> PamParams {
        PamParams {
            k: self.k.unwrap_or(K_DEFAULT),
            dissimilarity_measure: self.dissimilarity_measure.unwrap_or_default(),
            initial_medoids: self.initial_medoids,
            do_swap: self.do_swap.unwrap_or(DO_SWAP_DEFAULT),
            max_swap_iterations: self.max_swap_iterations.unwrap_or(MAX_SWAP_ITERATIONS_DEFAULT),
            chunk_rows: self.chunk_rows.unwrap_or(CHUNK_ROWS_DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = PamParams::default();
        assert_eq!(params.k(), 2);
        assert_eq!(params.dissimilarity_measure(), DissimilarityMeasure::Euclidean);
        assert_eq!(params.initial_medoids(), None);
        assert!(params.do_swap());
        assert_eq!(params.max_swap_iterations(), 1000);
        assert_eq!(params.chunk_rows(), 1024);
    }

    #[test]
    fn setters() {
        let params = PamParams::builder()
            .k(3)
            .dissimilarity_measure(DissimilarityMeasure::Manhattan)
            .initial_medoids(vec![4, 1, 7])
            .do_swap(false)
            .max_swap_iterations(5)
            .chunk_rows(0)
            .build();
        assert_eq!(params.k(), 3);
        assert_eq!(params.dissimilarity_measure(), DissimilarityMeasure::Manhattan);
        assert_eq!(params.initial_medoids(), Some(&[4, 1, 7][..]));
        assert!(!params.do_swap());
        assert_eq!(params.max_swap_iterations(), 5);
        assert_eq!(params.chunk_rows(), 1);
    }
}
