//! The color mapper: a fixed two-channel ramp from escape counts to
//! blue and red.  Green is never written here; it keeps whatever the
//! raster clear left in it.

use crate::errors::{RenderError, Result};
use crate::escape::EscapeResult;
use crate::raster::{B, G, R};

/// The ramp for one render call.  The normalization constant depends
/// on the iteration budget, so a palette is built per call and never
/// shared between calls with different budgets.
#[derive(Copy, Clone, Debug)]
pub struct Palette {
    calc_iter_num: u32,
    inv_calc_iter_num: f32,
}

impl Palette {
    /// `calc_iter_num` must be greater than 1.
    pub fn new(calc_iter_num: u32) -> Result<Palette> {
        if calc_iter_num <= 1 {
            return Err(RenderError::invalid(format!(
                "iteration budget must be greater than 1, got {}",
                calc_iter_num
            )));
        }
        Ok(Palette {
            calc_iter_num,
            inv_calc_iter_num: 1.0 / (calc_iter_num - 1) as f32,
        })
    }

    /// `1 / (calc_iter_num - 1)`.
    pub fn inv_calc_iter_num(&self) -> f32 {
        self.inv_calc_iter_num
    }

    /// The blue and red channel values for an escape result.  Channel
    /// values outside `0..=255` saturate, including those from counts
    /// past the budget.
    pub fn channels(&self, result: EscapeResult) -> (u8, u8) {
        match result {
            EscapeResult::Bounded => (0, 0),
            EscapeResult::Escaped(iter) => {
                let n = self.calc_iter_num as f32;
                let remaining = (i64::from(self.calc_iter_num) - i64::from(iter)) as f32;
                let blue = 255.0 - remaining * self.inv_calc_iter_num * 255.0;
                let red = 255.0 - (n - 0.5 * iter as f32) * self.inv_calc_iter_num * 255.0;
                (blue as u8, red as u8)
            }
        }
    }

    /// Write the color for `result` into one BGRA pixel.  Alpha is
    /// never touched.
    #[inline]
    pub fn paint(&self, bgra: &mut [u8], result: EscapeResult) {
        let (blue, red) = self.channels(result);
        if let EscapeResult::Bounded = result {
            bgra[G] = 0;
        }
        bgra[B] = blue;
        bgra[R] = red;
    }
}
