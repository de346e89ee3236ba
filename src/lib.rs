#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal kernel
//!
//! Every pixel of a raster is mapped onto the complex plane and
//! iterated under `z -> z^2 + c` until its orbit leaves the circle of
//! radius 2 or the iteration budget runs out.  Points that never leave
//! are painted black; the rest get a blue/red ramp keyed on how long
//! they took to escape.
//!
//! The raster is a caller-owned BGRA buffer, written in place.  Three
//! drivers share the same math and produce byte-identical output: a
//! sequential one, a row-partitioned fork-join one, and an
//! accelerator-shaped one that walks a grid of one-pixel threads.

use std::fmt;
use std::str::FromStr;

pub mod accelerator;
pub mod errors;
pub mod escape;
pub mod ffi;
pub mod frame;
pub mod palette;
pub mod parallel;
pub mod planes;
pub mod raster;
pub mod sequential;

pub use errors::{RenderError, Result};
pub use escape::{escape_time, EscapeResult};
pub use frame::Frame;
pub use palette::Palette;
pub use parallel::{ParallelRenderer, RowPartition};
pub use planes::{Pixel, PlaneMapper, View};
pub use raster::Raster;

/// Which driver renders a call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Strategy {
    /// Single thread, row-major.
    Sequential,
    /// Rows split across `num_cpus::get()` workers.
    Parallel,
    /// The accelerator contract, emulated on the host.
    Accelerator,
}

impl Strategy {
    /// Every strategy, in the order the host application lists them.
    pub const ALL: [Strategy; 3] = [
        Strategy::Sequential,
        Strategy::Parallel,
        Strategy::Accelerator,
    ];

    /// Render into `colors`, a `width` x `height` BGRA buffer.
    pub fn render(
        self,
        colors: &mut [u8],
        width: usize,
        height: usize,
        view: View,
        calc_iter_num: u32,
    ) -> Result<()> {
        match self {
            Strategy::Sequential => sequential::render(colors, width, height, view, calc_iter_num),
            Strategy::Parallel => parallel::render(colors, width, height, view, calc_iter_num),
            Strategy::Accelerator => {
                accelerator::render(colors, width, height, view, calc_iter_num)
            }
        }
    }

    /// The name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Parallel => "parallel",
            Strategy::Accelerator => "accelerator",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Strategy> {
        Strategy::ALL
            .iter()
            .cloned()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| RenderError::invalid(format!("unknown strategy '{}'", s)))
    }
}
