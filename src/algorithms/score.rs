use super::medoids::Medoids;
use crate::executor::RowTask;
use crate::ledger::Record;
use crate::measure::DissimilarityMeasure;
use crate::Float;

/// Scores one BUILD candidate `i`.
///
/// In round 0 the score is `sum_j d(j, i)`. In later rounds it is the gain
/// `sum_j max(D_j - d(j, i), 0)` the candidate offers over the committed
/// nearest medoids. Either way `temp` receives the records the rows would have
/// if `i` joined the medoid set.
pub(crate) struct BuildScore<'a, T> {
    pub(crate) candidate: &'a [T],
    pub(crate) candidate_row: usize,
    pub(crate) round: usize,
    pub(crate) measure: DissimilarityMeasure,
}

impl<'a, T: Float> RowTask<T> for BuildScore<'a, T> {
    fn map_row(&self, _row: usize, point: &[T], current: &Record<T>, temp: &mut Record<T>) -> T {
        let d_j_i = self.measure.distance(point, self.candidate);

        if self.round == 0 {
            *temp = Record {
                nearest: d_j_i,
                nearest_row: Some(self.candidate_row),
                second: T::infinity(),
                second_row: None,
            };
            return d_j_i;
        }

        let gain = current.nearest - d_j_i;
        if gain > T::zero() {
            *temp = Record {
                nearest: d_j_i,
                nearest_row: Some(self.candidate_row),
                second: current.nearest,
                second_row: current.nearest_row,
            };
            gain
        } else {
            *temp = *current;
            if d_j_i < current.second {
                temp.second = d_j_i;
                temp.second_row = Some(self.candidate_row);
            }
            T::zero()
        }
    }
}

/// Scores the swap of medoid row `i` for non-medoid row `h`: `T_ih = sum_j C_jih`.
///
/// Rows that move to `h` contribute a negative term. Rows that lose `i` to a
/// farther medoid contribute a positive one. The more negative `T_ih`, the more
/// the total dissimilarity drops if the swap is made. `temp` receives the
/// records the rows would have after the swap.
pub(crate) struct SwapScore<'a, T> {
    pub(crate) medoid_row: usize,
    pub(crate) candidate: &'a [T],
    pub(crate) candidate_row: usize,
    pub(crate) medoids: &'a Medoids<T>,
    pub(crate) measure: DissimilarityMeasure,
}

impl<'a, T: Float> SwapScore<'a, T> {
    fn second_nearest(&self, point: &[T], nearest_row: Option<usize>) -> (T, Option<usize>) {
        second_nearest(
            point,
            self.medoids,
            self.medoid_row,
            nearest_row,
            self.candidate,
            self.candidate_row,
            self.measure,
        )
    }
}

impl<'a, T: Float> RowTask<T> for SwapScore<'a, T> {
    fn map_row(&self, _row: usize, point: &[T], current: &Record<T>, temp: &mut Record<T>) -> T {
        let d_j_h = self.measure.distance(point, self.candidate);

        if current.nearest_row != Some(self.medoid_row) {
            // j keeps its medoid unless h is closer.
            if d_j_h < current.nearest {
                *temp = Record {
                    nearest: d_j_h,
                    nearest_row: Some(self.candidate_row),
                    second: current.nearest,
                    second_row: current.nearest_row,
                };
                d_j_h - current.nearest
            } else {
                let (second, second_row) = self.second_nearest(point, current.nearest_row);
                *temp = Record {
                    nearest: current.nearest,
                    nearest_row: current.nearest_row,
                    second,
                    second_row,
                };
                T::zero()
            }
        } else if d_j_h < current.second {
            // j loses its medoid and h is the closest remaining choice.
            *temp = Record {
                nearest: d_j_h,
                nearest_row: Some(self.candidate_row),
                second: current.second,
                second_row: current.second_row,
            };
            d_j_h - current.nearest
        } else {
            // j loses its medoid and falls back to its second-nearest.
            let (second, second_row) = self.second_nearest(point, current.second_row);
            *temp = Record {
                nearest: current.second,
                nearest_row: current.second_row,
                second,
                second_row,
            };
            current.second - current.nearest
        }
    }
}

/// Computes every row's nearest and second-nearest medoid from scratch for a
/// caller-supplied medoid set. Scores each row by its nearest distance.
pub(crate) struct AssignScore<'a, T> {
    pub(crate) medoids: &'a Medoids<T>,
    pub(crate) measure: DissimilarityMeasure,
}

impl<'a, T: Float> RowTask<T> for AssignScore<'a, T> {
    fn map_row(&self, _row: usize, point: &[T], _current: &Record<T>, temp: &mut Record<T>) -> T {
        let mut closest = Closest::new();
        for (row, medoid) in self.medoids.iter() {
            closest.offer(self.measure.distance(point, medoid), row);
        }
        *temp = closest.into_record();
        temp.nearest
    }
}

/// The closest medoid to `point` other than `nearest_row` once the medoid at
/// row `removed_row` is replaced by `candidate`, and the row it belongs to.
///
/// `nearest_row` is excluded by row, not by distance, so a medoid tied with it
/// still qualifies and the result never names `nearest_row` itself. Remaining
/// medoids are visited in slot order and the candidate last; ties keep the
/// earlier one.
pub(crate) fn second_nearest<T: Float>(
    point: &[T],
    medoids: &Medoids<T>,
    removed_row: usize,
    nearest_row: Option<usize>,
    candidate: &[T],
    candidate_row: usize,
    measure: DissimilarityMeasure,
) -> (T, Option<usize>) {
    let mut second = (T::infinity(), None);
    let mut offer = |dist: T, row: usize| {
        if dist < second.0 {
            second = (dist, Some(row));
        }
    };

    for (row, medoid) in medoids.iter() {
        if row != removed_row && Some(row) != nearest_row {
            offer(measure.distance(point, medoid), row);
        }
    }
    if Some(candidate_row) != nearest_row {
        offer(measure.distance(point, candidate), candidate_row);
    }
    second
}

/// Running two smallest `(distance, row)` pairs.
struct Closest<T> {
    first: (T, Option<usize>),
    second: (T, Option<usize>),
}

impl<T: Float> Closest<T> {
    fn new() -> Self {
        Self {
            first: (T::infinity(), None),
            second: (T::infinity(), None),
        }
    }

    fn offer(&mut self, dist: T, row: usize) {
        if dist < self.first.0 {
            self.second = self.first;
            self.first = (dist, Some(row));
        } else if dist < self.second.0 {
            self.second = (dist, Some(row));
        }
    }

    fn into_record(self) -> Record<T> {
        Record {
            nearest: self.first.0,
            nearest_row: self.first.1,
            second: self.second.0,
            second_row: self.second.1,
        }
    }
}
