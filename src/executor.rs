//! The map/reduce substrate every scoring pass runs on.
//!
//! A [`RowTask`] is applied to each row of each chunk, reading that row's
//! committed [`Record`] and overwriting its scratch record. Each chunk folds its
//! rows into a partial sum and the partials are added up in chunk order, so the
//! result does not depend on how chunks were scheduled.

use rayon::prelude::*;

use crate::frame::{Chunk, Frame};
use crate::ledger::Record;
use crate::Float;

/// Work done for a single observation during a scoring pass.
pub trait RowTask<T: Float>: Sync {
    /// Score row `row` (global index) with features `point`, given its
    /// committed record, and write its tentative record into `temp`.
    fn map_row(&self, row: usize, point: &[T], current: &Record<T>, temp: &mut Record<T>) -> T;
}

pub trait Executor {
    /// Run `task` over every row of `frame` and return the sum of its scores.
    ///
    /// `current` and `temp` hold one record per row of `frame`. Only `temp` is
    /// written, and each chunk only writes the rows it owns.
    fn map_reduce<T, M>(
        &self,
        frame: &Frame<T>,
        current: &[Record<T>],
        temp: &mut [Record<T>],
        task: &M,
    ) -> T
    where
        T: Float,
        M: RowTask<T>;
}

/// Runs chunks one after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

/// Runs chunks on the rayon thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

impl Executor for Serial {
    fn map_reduce<T, M>(
        &self,
        frame: &Frame<T>,
        current: &[Record<T>],
        temp: &mut [Record<T>],
        task: &M,
    ) -> T
    where
        T: Float,
        M: RowTask<T>,
    {
        let current = frame.split_rows(current);
        let temp = frame.split_rows_mut(temp);

        let partials = frame
            .chunks()
            .zip(current)
            .zip(temp)
            .map(|((chunk, current), temp)| map_chunk(&chunk, current, temp, task));

        combine(partials)
    }
}

impl Executor for Parallel {
    fn map_reduce<T, M>(
        &self,
        frame: &Frame<T>,
        current: &[Record<T>],
        temp: &mut [Record<T>],
        task: &M,
    ) -> T
    where
        T: Float,
        M: RowTask<T>,
    {
        let chunks: Vec<Chunk<'_, T>> = frame.chunks().collect();
        let current = frame.split_rows(current);
        let temp = frame.split_rows_mut(temp);

        let partials: Vec<T> = chunks
            .par_iter()
            .zip(current.into_par_iter())
            .zip(temp.into_par_iter())
            .map(|((chunk, current), temp)| map_chunk(chunk, current, temp, task))
            .collect();

        combine(partials)
    }
}

fn map_chunk<T, M>(chunk: &Chunk<'_, T>, current: &[Record<T>], temp: &mut [Record<T>], task: &M) -> T
where
    T: Float,
    M: RowTask<T>,
{
    debug_assert_eq!(chunk.len(), current.len());
    chunk
        .rows()
        .zip(current)
        .zip(temp.iter_mut())
        .fold(T::zero(), |acc, (((row, point), current), temp)| {
            acc + task.map_row(row, point, current, temp)
        })
}

fn combine<T: Float>(partials: impl IntoIterator<Item = T>) -> T {
    partials.into_iter().fold(T::zero(), |acc, x| acc + x)
}
