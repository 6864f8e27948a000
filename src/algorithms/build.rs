use log::debug;

use super::medoids::Medoids;
use super::score::BuildScore;
use super::CancelFlag;
use crate::error::{PamError, Result};
use crate::executor::Executor;
use crate::frame::Frame;
use crate::ledger::Ledger;
use crate::measure::DissimilarityMeasure;
use crate::Float;

/// Greedily select `k` medoids.
///
/// Round 0 picks the row with the smallest total dissimilarity to all rows
/// (first minimum wins). Every later round picks the row whose addition
/// lowers the total the most (last maximum wins). On return `ledger.current()`
/// holds each row's nearest and second-nearest medoid.
pub(crate) fn build<T, E>(
    frame: &Frame<T>,
    ledger: &mut Ledger<T>,
    k: usize,
    measure: DissimilarityMeasure,
    executor: &E,
    cancel: &CancelFlag,
) -> Result<Medoids<T>>
where
    T: Float,
    E: Executor,
{
    let mut medoids = Medoids::with_capacity(k);

    for round in 0..k {
        cancel.check()?;

        let mut best_score = if round == 0 { T::max_value() } else { -T::one() };
        let mut chosen = None;

        for row in 0..frame.num_rows() {
            if medoids.contains(row) {
                continue;
            }

            let task = BuildScore {
                candidate: frame.row(row),
                candidate_row: row,
                round,
                measure,
            };
            let (current, temp) = ledger.scratch();
            let score = executor.map_reduce(frame, current, temp, &task);

            let improves = if round == 0 {
                score < best_score
            } else {
                score >= best_score
            };
            if improves {
                best_score = score;
                chosen = Some(row);
                ledger.keep_candidate();
            }
        }

        let row = chosen.ok_or(PamError::NoCandidate { round })?;
        medoids.push(frame, row);
        ledger.commit();

        debug!("BUILD round {round}: selected row {row} (score {best_score:?})");
    }

    Ok(medoids)
}
