//! Circular (wraparound) sub-pixel shifts.
//!
//! Both methods compute `out(x, y) = in(x - dx, y - dy)` on a periodic grid.
//! Integer shifts are exact rolls regardless of method.

use crate::image::{ImageView, OwnedImage};
use crate::util::{ProbeKernelError, ProbeKernelResult};

mod bilinear;
mod fourier;

pub use bilinear::shift_wrapped_bilinear;
pub use fourier::shift_wrapped_fourier;

/// Interpolation used when moving the probe center to the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftMethod {
    /// Phase-ramp shift; band-limited, may ring around sharp edges.
    Fourier,
    /// Weighted blend of the four neighbouring integer rolls.
    Bilinear,
}

/// Shifts `src` by `(dx, dy)` with wraparound using `method`.
pub fn shift_wrapped(
    src: ImageView<'_, f64>,
    dx: f64,
    dy: f64,
    method: ShiftMethod,
) -> ProbeKernelResult<OwnedImage<f64>> {
    if !dx.is_finite() || !dy.is_finite() {
        return Err(ProbeKernelError::InvalidParameter {
            name: "shift",
            reason: "shift must be finite",
        });
    }
    let dx = reduce_shift(dx, src.width());
    let dy = reduce_shift(dy, src.height());
    if dx.fract() == 0.0 && dy.fract() == 0.0 {
        return Ok(roll(src, dx as i64, dy as i64));
    }
    Ok(match method {
        ShiftMethod::Fourier => shift_wrapped_fourier(src, dx, dy),
        ShiftMethod::Bilinear => shift_wrapped_bilinear(src, dx, dy),
    })
}

/// Integer circular shift.
pub fn roll(src: ImageView<'_, f64>, dx: i64, dy: i64) -> OwnedImage<f64> {
    let width = src.width();
    let height = src.height();
    let mut out = vec![0.0f64; width * height];
    for_each_row_mut(&mut out, width, |y, dst| {
        let src_row = src
            .row(wrap_index(y, dy, height))
            .expect("row within bounds");
        for (x, value) in dst.iter_mut().enumerate() {
            *value = src_row[wrap_index(x, dx, width)];
        }
    });
    OwnedImage::new(out, width, height).expect("roll output is contiguous")
}

/// Reduces a finite shift to `[0, n]` on a periodic axis of length `n`.
///
/// Shifts are periodic in `n`, so the result moves pixels exactly as `d`
/// does while keeping the integer part small enough for index arithmetic.
pub(crate) fn reduce_shift(d: f64, n: usize) -> f64 {
    d.rem_euclid(n as f64)
}

/// Index of the source sample that lands on `i` after shifting by `shift`.
pub(crate) fn wrap_index(i: usize, shift: i64, n: usize) -> usize {
    let n = n as i64;
    (i as i64 % n - shift.rem_euclid(n)).rem_euclid(n) as usize
}

/// Runs `f(y, row)` over every row of a contiguous buffer.
///
/// With the `rayon` feature rows are processed in parallel. Each row is
/// computed independently, so both paths produce identical output.
pub(crate) fn for_each_row_mut<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        data.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}
