//! The caller-owned BGRA pixel buffer.

use std::slice::ChunksMut;

use crate::errors::{RenderError, Result};
use crate::planes::Pixel;

/// Four 8-bit channels per pixel.
pub const BYTES_PER_PIXEL: usize = 4;
/// Blue channel index.
pub const B: usize = 0;
/// Green channel index.
pub const G: usize = 1;
/// Red channel index.
pub const R: usize = 2;
/// Alpha channel index.
pub const A: usize = 3;

/// A borrowed `width` x `height` BGRA buffer.  The raster only ever
/// writes into the caller's bytes; it never resizes or reallocates.
#[derive(Debug)]
pub struct Raster<'a> {
    pixels: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Raster<'a> {
    /// Wraps `pixels`, checking that it holds exactly `width * height`
    /// pixels.
    pub fn new(pixels: &'a mut [u8], width: usize, height: usize) -> Result<Raster<'a>> {
        if width == 0 || height == 0 {
            return Err(RenderError::invalid(format!(
                "raster dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                RenderError::invalid(format!("raster {}x{} is too large", width, height))
            })?;
        if pixels.len() != expected {
            return Err(RenderError::invalid(format!(
                "buffer holds {} bytes, a {}x{} raster needs {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Raster {
            pixels,
            width,
            height,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes in a single row.
    pub fn stride(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    /// Black out the color channels and make every pixel opaque.
    pub fn clear(&mut self) {
        for bgra in self.pixels.chunks_mut(BYTES_PER_PIXEL) {
            bgra[B] = 0;
            bgra[G] = 0;
            bgra[R] = 0;
            bgra[A] = 255;
        }
    }

    /// The four bytes of one pixel.
    #[inline]
    pub fn pixel_mut(&mut self, pixel: &Pixel) -> &mut [u8] {
        let offset = pixel.1 * self.stride() + pixel.0 * BYTES_PER_PIXEL;
        &mut self.pixels[offset..offset + BYTES_PER_PIXEL]
    }

    /// The bytes of one row.
    #[cfg(test)]
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let stride = self.stride();
        &mut self.pixels[row * stride..(row + 1) * stride]
    }

    /// Split the buffer into disjoint blocks of `rows` whole rows each;
    /// the last block may be shorter.
    pub(crate) fn row_blocks_mut(&mut self, rows: usize) -> Result<ChunksMut<u8>> {
        if rows == 0 {
            return Err(RenderError::invalid("row blocks must hold at least one row"));
        }
        let stride = self.stride();
        Ok(self.pixels.chunks_mut(rows * stride))
    }
}
