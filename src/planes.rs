//! Contains the PlaneMapper struct, which describes a relationship
//! between a raster of pixels with an origin at the top-left corner
//! and the complex plane.  The plane's origin sits at the exact center
//! of the raster, and the imaginary axis runs upward, so increasing
//! the row *decreases* the imaginary part.
use num::Complex;

use crate::errors::{RenderError, Result};

/// Which region of the complex plane is visible.  `scale` is the
/// number of pixels per unit of the complex plane; the offsets are in
/// pixels and slide the window around.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
    /// Pixels per unit.
    pub scale: f32,
    /// Horizontal shift, in pixels.
    pub offset_x: f32,
    /// Vertical shift, in pixels.  Positive values move the window down.
    pub offset_y: f32,
}

impl View {
    /// Constructor.  Does not validate; see `validate()`.
    pub fn new(scale: f32, offset_x: f32, offset_y: f32) -> View {
        View {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// A zero scale would divide by zero in the mapper, and a
    /// non-finite one poisons every pixel.
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return Err(RenderError::invalid(format!(
                "scale must be finite and non-zero, got {}",
                self.scale
            )));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(RenderError::invalid(format!(
                "offsets must be finite, got ({}, {})",
                self.offset_x, self.offset_y
            )));
        }
        Ok(())
    }
}

/// Describes the column, row of a pixel in the raster.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a `width` x `height` raster onto the complex plane
/// through a `View`.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    view: View,
    // Half the raster size as reals, so odd dimensions keep the origin
    // at the true center.
    half: (f32, f32),
}

impl PlaneMapper {
    /// Constructor.  The view is assumed to have been validated.
    pub fn new(width: usize, height: usize, view: View) -> PlaneMapper {
        PlaneMapper {
            width,
            height,
            view,
            half: (width as f32 / 2.0, height as f32 / 2.0),
        }
    }

    /// The total number of pixels in the raster.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Given a pixel of the raster, return the complex number it
    /// represents.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f32> {
        Complex::new(
            (pixel.0 as f32 - self.half.0 + self.view.offset_x) / self.view.scale,
            (self.half.1 - pixel.1 as f32 - self.view.offset_y) / self.view.scale,
        )
    }
}
