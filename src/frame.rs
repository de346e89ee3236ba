//! The per-call render context.  Everything a pixel needs to be
//! shaded (the mapping, the budget and the ramp) travels together in a
//! `Frame`, which every driver builds once per call and shares
//! read-only with its workers.

use crate::errors::Result;
use crate::escape::{escape_time, EscapeResult};
use crate::palette::Palette;
use crate::planes::{Pixel, PlaneMapper, View};
use crate::raster::BYTES_PER_PIXEL;

/// The immutable parameters of one render call.
#[derive(Copy, Clone, Debug)]
pub struct Frame {
    mapper: PlaneMapper,
    palette: Palette,
    calc_iter_num: u32,
}

impl Frame {
    /// Validates the view and the iteration budget.  The raster's own
    /// preconditions are checked by `Raster::new`.
    pub fn new(width: usize, height: usize, view: View, calc_iter_num: u32) -> Result<Frame> {
        view.validate()?;
        let palette = Palette::new(calc_iter_num)?;
        Ok(Frame {
            mapper: PlaneMapper::new(width, height, view),
            palette,
            calc_iter_num,
        })
    }

    /// Map and iterate one pixel.
    #[inline]
    pub fn shade(&self, pixel: &Pixel) -> EscapeResult {
        escape_time(self.mapper.pixel_to_point(pixel), self.calc_iter_num)
    }

    /// Shade and paint a single BGRA pixel.
    #[inline]
    pub fn paint_pixel(&self, pixel: &Pixel, bgra: &mut [u8]) {
        self.palette.paint(bgra, self.shade(pixel));
    }

    /// Shade and paint every pixel of `row`, whose bytes are `bytes`.
    pub fn paint_row(&self, row: usize, bytes: &mut [u8]) {
        for (column, bgra) in bytes.chunks_mut(BYTES_PER_PIXEL).enumerate() {
            self.paint_pixel(&Pixel(column, row), bgra);
        }
    }
}
