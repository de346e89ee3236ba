//! The C entry points a hosting application links against.
//!
//! All three share one signature.  Each returns `0` on success, `-1`
//! when a precondition does not hold and `-2` when a worker panicked.
//! On failure the reason is logged and, for invalid arguments, the
//! buffer is left untouched.

use std::slice;

use log::error;

use crate::errors::{RenderError, Result};
use crate::planes::View;
use crate::raster::BYTES_PER_PIXEL;
use crate::Strategy;

/// Returned when the call completed.
pub const STATUS_OK: i32 = 0;
/// Returned when an argument violated a precondition.
pub const STATUS_INVALID_ARGUMENT: i32 = -1;
/// Returned when a parallel worker panicked.
pub const STATUS_WORKER_PANICKED: i32 = -2;

fn dimension(name: &str, value: i32) -> Result<usize> {
    if value <= 0 {
        return Err(RenderError::invalid(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(value as usize)
}

fn budget(value: i32) -> Result<u32> {
    if value <= 1 {
        return Err(RenderError::invalid(format!(
            "iteration budget must be greater than 1, got {}",
            value
        )));
    }
    Ok(value as u32)
}

/// Check the raw arguments, borrow the buffer and hand it to `strategy`.
///
/// # Safety
///
/// `colors` must be null or point to `width * height * 4` writable
/// bytes that nothing else touches for the duration of the call.
#[allow(clippy::too_many_arguments)]
unsafe fn render_raw(
    strategy: Strategy,
    colors: *mut u8,
    width: i32,
    height: i32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    calc_iter_num: i32,
) -> Result<()> {
    if colors.is_null() {
        return Err(RenderError::invalid("color buffer is null"));
    }
    let width = dimension("width", width)?;
    let height = dimension("height", height)?;
    let calc_iter_num = budget(calc_iter_num)?;
    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| RenderError::invalid(format!("raster {}x{} is too large", width, height)))?;
    let colors = slice::from_raw_parts_mut(colors, len);
    strategy.render(
        colors,
        width,
        height,
        View::new(scale, offset_x, offset_y),
        calc_iter_num,
    )
}

fn status(strategy: Strategy, result: Result<()>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => {
            error!("{} render failed: {}", strategy, e);
            match e {
                RenderError::InvalidArgument(_) => STATUS_INVALID_ARGUMENT,
                RenderError::WorkerPanicked => STATUS_WORKER_PANICKED,
            }
        }
    }
}

/// Single-threaded render.
///
/// # Safety
///
/// `colors` must be null or point to `width * height * 4` writable
/// bytes owned by the caller.
#[export_name = "SequentialCPUFractalCalc"]
pub unsafe extern "C" fn sequential_cpu_fractal_calc(
    colors: *mut u8,
    width: i32,
    height: i32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    calc_iter_num: i32,
) -> i32 {
    let strategy = Strategy::Sequential;
    status(
        strategy,
        render_raw(strategy, colors, width, height, scale, offset_x, offset_y, calc_iter_num),
    )
}

/// Row-parallel render on every logical CPU.
///
/// # Safety
///
/// `colors` must be null or point to `width * height * 4` writable
/// bytes owned by the caller.
#[export_name = "ParallelCPUFractalCalc"]
pub unsafe extern "C" fn parallel_cpu_fractal_calc(
    colors: *mut u8,
    width: i32,
    height: i32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    calc_iter_num: i32,
) -> i32 {
    let strategy = Strategy::Parallel;
    status(
        strategy,
        render_raw(strategy, colors, width, height, scale, offset_x, offset_y, calc_iter_num),
    )
}

/// Accelerator-contract render.
///
/// # Safety
///
/// `colors` must be null or point to `width * height * 4` writable
/// bytes owned by the caller.
#[export_name = "ParallelGPUFractalCalc"]
pub unsafe extern "C" fn parallel_gpu_fractal_calc(
    colors: *mut u8,
    width: i32,
    height: i32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    calc_iter_num: i32,
) -> i32 {
    let strategy = Strategy::Accelerator;
    status(
        strategy,
        render_raw(strategy, colors, width, height, scale, offset_x, offset_y, calc_iter_num),
    )
}
