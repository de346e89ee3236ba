//! The single-threaded raster driver.  It clears the raster and then
//! visits every pixel in row-major order; nothing is skipped and there
//! is no early exit.

use itertools::iproduct;
use log::debug;

use crate::errors::Result;
use crate::frame::Frame;
use crate::planes::{Pixel, View};
use crate::raster::Raster;

/// Render into `colors`, a `width` x `height` BGRA buffer.
pub fn render(
    colors: &mut [u8],
    width: usize,
    height: usize,
    view: View,
    calc_iter_num: u32,
) -> Result<()> {
    let frame = Frame::new(width, height, view, calc_iter_num)?;
    let mut raster = Raster::new(colors, width, height)?;
    debug!(
        "sequential render {}x{} {:?} budget {}",
        width, height, view, calc_iter_num
    );
    render_frame(&frame, &mut raster);
    debug!("sequential render {}x{} done", width, height);
    Ok(())
}

/// The clear and compute passes over an already-validated raster.
pub fn render_frame(frame: &Frame, raster: &mut Raster) {
    raster.clear();
    for (row, column) in iproduct!(0..raster.height(), 0..raster.width()) {
        let pixel = Pixel(column, row);
        frame.paint_pixel(&pixel, raster.pixel_mut(&pixel));
    }
}
