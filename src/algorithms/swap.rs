use log::debug;

use super::medoids::Medoids;
use super::score::SwapScore;
use crate::executor::Executor;
use crate::frame::Frame;
use crate::ledger::Ledger;
use crate::measure::DissimilarityMeasure;
use crate::Float;

/// One SWAP iteration.
///
/// Scores every `(medoid, non-medoid)` pair, medoids in slot order and
/// candidates in row order, and keeps the first pair reaching the lowest
/// negative `T_ih`. If there is one the swap is applied, the ledger committed
/// and `Some(T_ih)` returned. `None` means the medoids are a local optimum.
pub(crate) fn swap_iteration<T, E>(
    frame: &Frame<T>,
    ledger: &mut Ledger<T>,
    medoids: &mut Medoids<T>,
    measure: DissimilarityMeasure,
    executor: &E,
) -> Option<T>
where
    T: Float,
    E: Executor,
{
    let mut best_tih = T::max_value();
    let mut best_swap = None;

    for slot in 0..medoids.len() {
        let medoid_row = medoids.rows()[slot];

        for candidate_row in 0..frame.num_rows() {
            if medoids.contains(candidate_row) {
                continue;
            }

            let task = SwapScore {
                medoid_row,
                candidate: frame.row(candidate_row),
                candidate_row,
                medoids,
                measure,
            };
            let (current, temp) = ledger.scratch();
            let tih = executor.map_reduce(frame, current, temp, &task);

            if tih < T::zero() && tih < best_tih {
                best_tih = tih;
                best_swap = Some((slot, candidate_row));
                ledger.keep_candidate();
            }
        }
    }

    let (slot, candidate_row) = best_swap?;
    debug!(
        "SWAP: replacing medoid row {} with row {candidate_row} (T_ih {best_tih:?})",
        medoids.rows()[slot]
    );
    medoids.replace(frame, slot, candidate_row);
    ledger.commit();

    Some(best_tih)
}
