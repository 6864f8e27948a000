use thiserror::Error;

/// Reasons a PAM fit can be rejected or aborted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PamError {
    #[error("the dataset provided is empty")]
    EmptyDataset,
    #[error("observations have no feature columns")]
    NoFeatures,
    #[error("observations have mismatched dimensions: {0}")]
    WrongDimension(String),
    #[error("k must satisfy 1 <= k <= n, got k = {k} for n = {n} observations")]
    InvalidK { k: usize, n: usize },
    #[error("initial medoids must have exactly k = {expected} rows, got {actual}")]
    InitialMedoidCount { expected: usize, actual: usize },
    #[error("initial medoid row {row} is out of range for {n} observations")]
    InitialMedoidOutOfRange { row: usize, n: usize },
    #[error("initial medoid row {0} is listed more than once")]
    DuplicateInitialMedoid(usize),
    #[error("no medoid candidate could be accepted in build round {round}")]
    NoCandidate { round: usize },
    #[error("the fit was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PamError>;
