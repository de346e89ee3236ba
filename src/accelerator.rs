//! The accelerator entry point.
//!
//! There is no device backend here.  This module only pins down the
//! contract such a backend has to meet: the same signature as the CPU
//! drivers, a grid of blocks of threads where each thread owns exactly
//! one pixel, and a raster byte-identical to the CPU output.  The host
//! side walks the grid itself, one block after another.

use log::debug;

use crate::errors::{RenderError, Result};
use crate::frame::Frame;
use crate::planes::{Pixel, View};
use crate::raster::Raster;

/// The shape of a launch: how many threads wide and high each block is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LaunchConfig {
    /// Threads per block along a row.
    pub block_width: usize,
    /// Threads per block down a column.
    pub block_height: usize,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        LaunchConfig {
            block_width: 16,
            block_height: 16,
        }
    }
}

impl LaunchConfig {
    /// Blocks needed to cover a `width` x `height` raster.
    pub fn grid(&self, width: usize, height: usize) -> (usize, usize) {
        (
            (width + self.block_width - 1) / self.block_width,
            (height + self.block_height - 1) / self.block_height,
        )
    }

    /// Global pixel of thread `thread` in block `block`, or `None` for
    /// the idle threads of a partial block along the edge.
    pub fn global_pixel(
        &self,
        block: (usize, usize),
        thread: (usize, usize),
        width: usize,
        height: usize,
    ) -> Option<Pixel> {
        let column = block.0 * self.block_width + thread.0;
        let row = block.1 * self.block_height + thread.1;
        if column < width && row < height {
            Some(Pixel(column, row))
        } else {
            None
        }
    }
}

/// The per-thread body: one thread, one pixel.
#[inline]
fn fractal_kernel(frame: &Frame, raster: &mut Raster, pixel: Pixel) {
    frame.paint_pixel(&pixel, raster.pixel_mut(&pixel));
}

/// Render into `colors` with an explicit launch shape.
pub fn render_with(
    config: LaunchConfig,
    colors: &mut [u8],
    width: usize,
    height: usize,
    view: View,
    calc_iter_num: u32,
) -> Result<()> {
    if config.block_width == 0 || config.block_height == 0 {
        return Err(RenderError::invalid(format!(
            "launch blocks must be non-empty, got {}x{}",
            config.block_width, config.block_height
        )));
    }
    let frame = Frame::new(width, height, view, calc_iter_num)?;
    let mut raster = Raster::new(colors, width, height)?;
    let grid = config.grid(width, height);
    debug!(
        "accelerator render {}x{} {:?} budget {} grid {:?} of {:?}",
        width, height, view, calc_iter_num, grid, config
    );
    raster.clear();
    for block_y in 0..grid.1 {
        for block_x in 0..grid.0 {
            for thread_y in 0..config.block_height {
                for thread_x in 0..config.block_width {
                    let pixel = config.global_pixel(
                        (block_x, block_y),
                        (thread_x, thread_y),
                        width,
                        height,
                    );
                    if let Some(pixel) = pixel {
                        fractal_kernel(&frame, &mut raster, pixel);
                    }
                }
            }
        }
    }
    debug!("accelerator render {}x{} done", width, height);
    Ok(())
}

/// Render into `colors` with the default 16x16 launch shape.
pub fn render(
    colors: &mut [u8],
    width: usize,
    height: usize,
    view: View,
    calc_iter_num: u32,
) -> Result<()> {
    render_with(
        LaunchConfig::default(),
        colors,
        width,
        height,
        view,
        calc_iter_num,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequential;

    #[test]
    fn grid_rounds_up() {
        let config = LaunchConfig::default();
        assert_eq!(config.grid(16, 16), (1, 1));
        assert_eq!(config.grid(17, 33), (2, 3));
    }

    #[test]
    fn edge_threads_are_idle() {
        let config = LaunchConfig {
            block_width: 4,
            block_height: 4,
        };
        assert_eq!(config.global_pixel((1, 0), (1, 3), 6, 4), Some(Pixel(5, 3)));
        assert_eq!(config.global_pixel((1, 0), (2, 0), 6, 4), None);
        assert_eq!(config.global_pixel((0, 1), (0, 0), 6, 4), None);
    }

    #[test]
    fn rejects_empty_blocks() {
        let mut colors = vec![0u8; 4 * 4 * 4];
        let config = LaunchConfig {
            block_width: 0,
            block_height: 8,
        };
        assert!(render_with(config, &mut colors, 4, 4, View::new(1.0, 0.0, 0.0), 10).is_err());
    }

    #[test]
    fn matches_sequential() {
        let view = View::new(120.0, 60.0, -20.0);
        let (width, height) = (45, 29);
        let mut expected = vec![0u8; width * height * 4];
        sequential::render(&mut expected, width, height, view, 64).unwrap();
        for (bw, bh) in &[(16, 16), (1, 1), (7, 3), (64, 64)] {
            let config = LaunchConfig {
                block_width: *bw,
                block_height: *bh,
            };
            let mut colors = vec![0u8; width * height * 4];
            render_with(config, &mut colors, width, height, view, 64).unwrap();
            assert_eq!(colors, expected, "{:?}", config);
        }
    }
}
