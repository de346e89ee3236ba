// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The data-parallel raster driver.
//!
//! The clear pass runs on the calling thread.  The compute pass splits
//! the rows of the raster into a static set of contiguous blocks, hands
//! each block to its own scoped worker, and joins them all before
//! returning.  A block is a disjoint `&mut` slice of the caller's
//! buffer, so workers never share a byte and need no locking; the
//! `Frame` they read from is immutable.

use std::ops::Range;

use log::{debug, trace};

use crate::errors::{RenderError, Result};
use crate::frame::Frame;
use crate::planes::View;
use crate::raster::Raster;

/// A static split of the rows `0..height` into at most `workers`
/// contiguous ranges.  Every range but the last holds the same number
/// of rows; together they cover every row exactly once, in order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowPartition {
    height: usize,
    rows_per_block: usize,
}

impl RowPartition {
    /// Both `height` and `workers` must be positive.
    pub fn new(height: usize, workers: usize) -> Result<RowPartition> {
        if height == 0 || workers == 0 {
            return Err(RenderError::invalid(format!(
                "cannot split {} rows across {} workers",
                height, workers
            )));
        }
        let workers = workers.min(height);
        Ok(RowPartition {
            height,
            rows_per_block: (height + workers - 1) / workers,
        })
    }

    /// The number of rows partitioned.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows handed to each worker (the last may get fewer).
    pub fn rows_per_block(&self) -> usize {
        self.rows_per_block
    }

    /// The number of blocks, and so of workers actually spawned.
    pub fn len(&self) -> usize {
        (self.height + self.rows_per_block - 1) / self.rows_per_block
    }

    /// A partition always has at least one block.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The row ranges, in order.
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> {
        let (height, step) = (self.height, self.rows_per_block);
        (0..height)
            .step_by(step)
            .map(move |start| start..(start + step).min(height))
    }
}

/// A fork-join driver with a fixed worker count.
#[derive(Copy, Clone, Debug)]
pub struct ParallelRenderer {
    workers: usize,
}

impl Default for ParallelRenderer {
    fn default() -> Self {
        ParallelRenderer {
            workers: num_cpus::get(),
        }
    }
}

impl ParallelRenderer {
    /// A renderer that spreads rows across `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(RenderError::invalid("worker count must be positive"));
        }
        Ok(ParallelRenderer { workers })
    }

    /// The configured worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Render into `colors`, a `width` x `height` BGRA buffer.  The
    /// result is byte-identical to `sequential::render`.
    pub fn render(
        &self,
        colors: &mut [u8],
        width: usize,
        height: usize,
        view: View,
        calc_iter_num: u32,
    ) -> Result<()> {
        let frame = Frame::new(width, height, view, calc_iter_num)?;
        let mut raster = Raster::new(colors, width, height)?;
        let partition = RowPartition::new(height, self.workers)?;
        debug!(
            "parallel render {}x{} {:?} budget {} on {} workers",
            width,
            height,
            view,
            calc_iter_num,
            partition.len()
        );
        raster.clear();
        par_for_rows(&mut raster, &partition, |row, bytes| {
            frame.paint_row(row, bytes)
        })?;
        debug!("parallel render {}x{} done", width, height);
        Ok(())
    }
}

/// Run `paint` over every row of `raster`, one scoped worker per block
/// of `partition`.  Returns once every worker has finished.  The
/// partition must have been built for the raster's height.
pub fn par_for_rows<F>(raster: &mut Raster, partition: &RowPartition, paint: F) -> Result<()>
where
    F: Fn(usize, &mut [u8]) + Sync,
{
    if partition.height() != raster.height() {
        return Err(RenderError::invalid(format!(
            "partition covers {} rows, raster has {}",
            partition.height(),
            raster.height()
        )));
    }
    let stride = raster.stride();
    let paint = &paint;
    let blocks = raster.row_blocks_mut(partition.rows_per_block())?;
    crossbeam::scope(|spawner| {
        for (rows, block) in partition.ranges().zip(blocks) {
            spawner.spawn(move |_| {
                trace!("worker taking rows {:?}", rows);
                for (row, bytes) in rows.zip(block.chunks_mut(stride)) {
                    paint(row, bytes);
                }
            });
        }
    })
    .map_err(|_| RenderError::WorkerPanicked)
}

/// Render with one worker per logical CPU.
pub fn render(
    colors: &mut [u8],
    width: usize,
    height: usize,
    view: View,
    calc_iter_num: u32,
) -> Result<()> {
    ParallelRenderer::default().render(colors, width, height, view, calc_iter_num)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequential;

    fn ranges(height: usize, workers: usize) -> Vec<Range<usize>> {
        RowPartition::new(height, workers).unwrap().ranges().collect()
    }

    #[test]
    fn partition_splits_evenly() {
        assert_eq!(ranges(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn partition_gives_the_remainder_to_the_last_block() {
        assert_eq!(ranges(10, 4), vec![0..3, 3..6, 6..9, 9..10]);
        assert_eq!(ranges(7, 3), vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn partition_never_spawns_idle_workers() {
        assert_eq!(ranges(3, 16), vec![0..1, 1..2, 2..3]);
        assert_eq!(RowPartition::new(3, 16).unwrap().len(), 3);
    }

    #[test]
    fn partition_with_uneven_blocks_may_use_fewer_workers() {
        // ceil(9 / 4) = 3 rows per block leaves only three blocks.
        let partition = RowPartition::new(9, 4).unwrap();
        assert_eq!(partition.len(), 3);
        assert_eq!(ranges(9, 4), vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn partition_covers_every_row_once() {
        for height in 1..40 {
            for workers in 1..12 {
                let mut next = 0;
                for range in ranges(height, workers) {
                    assert_eq!(range.start, next);
                    assert!(range.end > range.start);
                    next = range.end;
                }
                assert_eq!(next, height);
            }
        }
    }

    #[test]
    fn partition_rejects_zero() {
        assert!(RowPartition::new(0, 4).is_err());
        assert!(RowPartition::new(4, 0).is_err());
        assert!(ParallelRenderer::new(0).is_err());
    }

    #[test]
    fn matches_sequential() {
        let view = View::new(90.0, -40.0, 5.0);
        let (width, height) = (61, 37);
        let mut expected = vec![0u8; width * height * 4];
        sequential::render(&mut expected, width, height, view, 80).unwrap();
        for workers in &[1, 2, 3, 8, 64] {
            let mut colors = vec![0x77u8; width * height * 4];
            ParallelRenderer::new(*workers)
                .unwrap()
                .render(&mut colors, width, height, view, 80)
                .unwrap();
            assert_eq!(colors, expected, "{} workers", workers);
        }
    }

    #[test]
    fn worker_panic_is_reported() {
        let mut colors = vec![0u8; 4 * 4 * 4];
        let mut raster = Raster::new(&mut colors, 4, 4).unwrap();
        let partition = RowPartition::new(4, 2).unwrap();
        let result = par_for_rows(&mut raster, &partition, |row, _| {
            if row == 3 {
                panic!("boom");
            }
        });
        assert_eq!(result, Err(RenderError::WorkerPanicked));
    }

    #[test]
    fn partition_for_another_height_is_rejected() {
        let mut colors = vec![0u8; 4 * 4 * 4];
        let mut raster = Raster::new(&mut colors, 4, 4).unwrap();
        for height in &[2, 5] {
            let partition = RowPartition::new(*height, 2).unwrap();
            let result = par_for_rows(&mut raster, &partition, |_, bytes| {
                for b in bytes.iter_mut() {
                    *b = 0xee;
                }
            });
            match result {
                Err(RenderError::InvalidArgument(_)) => {}
                r => panic!("unexpected result {:?}", r),
            }
        }
        assert!(colors.iter().all(|b| *b == 0));
    }

    #[test]
    fn every_row_is_painted() {
        let mut colors = vec![0u8; 3 * 7 * 4];
        let mut raster = Raster::new(&mut colors, 3, 7).unwrap();
        let partition = RowPartition::new(7, 3).unwrap();
        par_for_rows(&mut raster, &partition, |_, bytes| {
            for b in bytes.iter_mut() {
                *b = 0xee;
            }
        })
        .unwrap();
        assert!(colors.iter().all(|b| *b == 0xee));
    }
}
