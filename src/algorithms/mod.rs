mod build;
mod medoids;
mod score;
mod swap;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};

use self::build::build;
use self::medoids::Medoids;
use self::score::AssignScore;
use self::swap::swap_iteration;
use crate::error::{PamError, Result};
use crate::executor::{Executor, Parallel};
use crate::frame::Frame;
use crate::ledger::Ledger;
use crate::measure::DissimilarityMeasure;
use crate::model::{ModelSummary, PamModel};
use crate::params::PamParams;
use crate::Float;

/// Partitioning Around Medoids, generic over the executor that runs each
/// scoring pass. Defaults to the rayon-backed [`Parallel`] executor.
#[derive(Debug, Clone)]
pub struct Pam<E = Parallel> {
    params: PamParams,
    executor: E,
    cancel: CancelFlag,
}

impl Pam<Parallel> {
    pub fn new(params: PamParams) -> Self {
        Self {
            params,
            executor: Parallel,
            cancel: CancelFlag::default(),
        }
    }
}

impl Default for Pam<Parallel> {
    fn default() -> Self {
        Self::new(PamParams::default())
    }
}

impl<E: Executor> Pam<E> {
    /// Run scoring passes on `executor` instead.
    pub fn with_executor<F: Executor>(self, executor: F) -> Pam<F> {
        Pam {
            params: self.params,
            executor,
            cancel: self.cancel,
        }
    }

    /// Abort with [`PamError::Cancelled`] once `flag` is set. The flag is read
    /// before each BUILD round and each SWAP iteration.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = CancelFlag::new(flag);
        self
    }

    pub fn params(&self) -> &PamParams {
        &self.params
    }

    /// Fit on raw feature vectors, chunked by the configured `chunk_rows`.
    pub fn fit_rows<T: Float>(&self, rows: &[Vec<T>]) -> Result<PamModel<T>> {
        let frame = Frame::from_rows(rows)?.with_chunk_rows(self.params.chunk_rows);
        self.fit(&frame)
    }

    /// Select medoids for `frame` with BUILD (or the configured initial
    /// medoids), then refine them with SWAP.
    pub fn fit<T: Float>(&self, frame: &Frame<T>) -> Result<PamModel<T>> {
        self.validate(frame)?;

        let k = self.params.k;
        let measure = self.params.dissimilarity_measure;
        let initial = self.params.initial_medoids.as_deref();
        let mut ledger = Ledger::new(frame.num_rows());

        superluminal_perf::begin_event("BUILD");
        let medoids = match initial {
            Some(rows) => Ok(seed(frame, &mut ledger, rows, measure, &self.executor)),
            None => build(frame, &mut ledger, k, measure, &self.executor, &self.cancel),
        };
        superluminal_perf::end_event();
        let mut medoids = medoids?;

        let mut summary = ModelSummary {
            swap_iterations: 0,
            sum_of_dissimilarities: ledger.sum_of_dissimilarities(),
        };
        info!("Build phase complete!\n{summary}");

        // SWAP has nothing to exchange for a single BUILD medoid.
        if self.params.do_swap && (k > 1 || initial.is_some()) {
            superluminal_perf::begin_event("SWAP");
            let swapped = self.swap_phase(frame, &mut ledger, &mut medoids, &mut summary);
            superluminal_perf::end_event();
            swapped?;
        }

        let (medoid_rows, medoids) = medoids.into_parts();
        Ok(PamModel {
            medoids,
            medoid_rows,
            measure,
            summary,
            records: ledger.into_current(),
        })
    }

    fn swap_phase<T: Float>(
        &self,
        frame: &Frame<T>,
        ledger: &mut Ledger<T>,
        medoids: &mut Medoids<T>,
        summary: &mut ModelSummary<T>,
    ) -> Result<()> {
        let measure = self.params.dissimilarity_measure;

        loop {
            if summary.swap_iterations >= self.params.max_swap_iterations {
                warn!(
                    "Stopping SWAP after {} iterations without reaching a local optimum",
                    summary.swap_iterations
                );
                return Ok(());
            }
            self.cancel.check()?;

            if swap_iteration(frame, ledger, medoids, measure, &self.executor).is_none() {
                return Ok(());
            }
            summary.swap_iterations += 1;
            summary.sum_of_dissimilarities = ledger.sum_of_dissimilarities();
            info!("Swap conducted!\n{summary}");
        }
    }

    fn validate<T: Float>(&self, frame: &Frame<T>) -> Result<()> {
        let k = self.params.k;
        let n = frame.num_rows();
        if k == 0 || k > n {
            return Err(PamError::InvalidK { k, n });
        }

        if let Some(rows) = self.params.initial_medoids.as_deref() {
            if rows.len() != k {
                return Err(PamError::InitialMedoidCount {
                    expected: k,
                    actual: rows.len(),
                });
            }
            for (idx, &row) in rows.iter().enumerate() {
                if row >= n {
                    return Err(PamError::InitialMedoidOutOfRange { row, n });
                }
                if rows[..idx].contains(&row) {
                    return Err(PamError::DuplicateInitialMedoid(row));
                }
            }
        }

        Ok(())
    }
}

/// Adopt caller-supplied medoids and fill the ledger for them.
fn seed<T, E>(
    frame: &Frame<T>,
    ledger: &mut Ledger<T>,
    rows: &[usize],
    measure: DissimilarityMeasure,
    executor: &E,
) -> Medoids<T>
where
    T: Float,
    E: Executor,
{
    let medoids = Medoids::from_rows(frame, rows);
    let task = AssignScore {
        medoids: &medoids,
        measure,
    };
    let (current, temp) = ledger.scratch();
    executor.map_reduce(frame, current, temp, &task);
    ledger.keep_candidate();
    ledger.commit();
    medoids
}

/// Cooperative cancellation, polled between rounds.
#[derive(Debug, Clone, Default)]
pub(crate) struct CancelFlag(Option<Arc<AtomicBool>>);

impl CancelFlag {
    pub(crate) fn new(flag: Arc<AtomicBool>) -> Self {
        Self(Some(flag))
    }

    pub(crate) fn check(&self) -> Result<()> {
        match &self.0 {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(PamError::Cancelled),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Serial;

    fn line() -> Vec<Vec<f64>> {
        [0.0, 1.0, 2.0, 10.0, 11.0, 12.0].iter().map(|&x| vec![x]).collect()
    }

    #[test]
    fn validation_happens_before_any_work() {
        let data = line();
        let fit = |params: PamParams| Pam::new(params).with_executor(Serial).fit_rows(&data);

        assert_eq!(
            fit(PamParams::builder().k(0).build()).err(),
            Some(PamError::InvalidK { k: 0, n: 6 })
        );
        assert_eq!(
            fit(PamParams::builder().k(7).build()).err(),
            Some(PamError::InvalidK { k: 7, n: 6 })
        );
        assert_eq!(
            fit(PamParams::builder().k(2).initial_medoids(vec![0]).build()).err(),
            Some(PamError::InitialMedoidCount { expected: 2, actual: 1 })
        );
        assert_eq!(
            fit(PamParams::builder().k(2).initial_medoids(vec![0, 6]).build()).err(),
            Some(PamError::InitialMedoidOutOfRange { row: 6, n: 6 })
        );
        assert_eq!(
            fit(PamParams::builder().k(2).initial_medoids(vec![3, 3]).build()).err(),
            Some(PamError::DuplicateInitialMedoid(3))
        );
    }

    #[test]
    fn seeded_fit_starts_from_given_medoids() {
        let params = PamParams::builder()
            .k(2)
            .initial_medoids(vec![0, 1])
            .do_swap(false)
            .build();
        let model = Pam::new(params).fit_rows(&line()).unwrap();
        assert_eq!(model.medoid_rows(), &[0, 1]);
        assert_eq!(model.swap_iterations(), 0);
        assert_eq!(model.sum_of_dissimilarities(), 0.0 + 0.0 + 1.0 + 9.0 + 10.0 + 11.0);
    }

    #[test]
    fn seeded_fit_swaps_to_optimum() {
        let params = PamParams::builder().k(2).initial_medoids(vec![0, 1]).build();
        let model = Pam::new(params).fit_rows(&line()).unwrap();
        let mut rows = model.medoid_rows().to_vec();
        rows.sort();
        assert_eq!(rows, vec![1, 4]);
        assert_eq!(model.sum_of_dissimilarities(), 4.0);
        assert!(model.swap_iterations() >= 1);
    }

    #[test]
    fn single_seeded_medoid_can_still_swap() {
        let params = PamParams::builder().k(1).initial_medoids(vec![5]).build();
        let model = Pam::new(params).fit_rows(&line()).unwrap();
        // Rows 2 and 3 tie at 30; the first one scanned is kept.
        assert_eq!(model.medoid_rows(), &[2]);
        assert_eq!(model.swap_iterations(), 1);
        assert_eq!(model.sum_of_dissimilarities(), 30.0);
    }

    #[test]
    fn iteration_cap_stops_swap() {
        let params = PamParams::builder()
            .k(2)
            .initial_medoids(vec![0, 1])
            .max_swap_iterations(0)
            .build();
        let model = Pam::new(params).fit_rows(&line()).unwrap();
        assert_eq!(model.medoid_rows(), &[0, 1]);
        assert_eq!(model.swap_iterations(), 0);
    }

    #[test]
    fn cancelled_fit() {
        let flag = Arc::new(AtomicBool::new(true));
        let result = Pam::new(PamParams::default())
            .with_cancel_flag(flag)
            .fit_rows(&line());
        assert_eq!(result.err(), Some(PamError::Cancelled));
    }
}
