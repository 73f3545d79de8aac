//! Fourier (phase ramp) wraparound shift.
//!
//! The 2D phase ramp factorizes per axis, so the shift is applied as two
//! separable circular convolutions with precomputed taps. The intermediate
//! row pass stays complex; only the final real part is kept.

use num_complex::Complex64;

use crate::image::{ImageView, OwnedImage};
use crate::shift::{for_each_row_mut, reduce_shift};
use crate::util::math::fourier_shift_taps;

/// Shifts `src` by `(dx, dy)` with wraparound using the Fourier shift theorem.
///
/// Frequencies follow the `fftfreq` layout, so for even lengths the Nyquist
/// bin is treated as negative and a sub-pixel shift leaves a small imaginary
/// residue that is discarded.
pub fn shift_wrapped_fourier(src: ImageView<'_, f64>, dx: f64, dy: f64) -> OwnedImage<f64> {
    let width = src.width();
    let height = src.height();
    let taps_x = fourier_shift_taps(width, reduce_shift(dx, width));
    let taps_y = fourier_shift_taps(height, reduce_shift(dy, height));

    let mut rows = vec![Complex64::new(0.0, 0.0); width * height];
    for_each_row_mut(&mut rows, width, |y, dst| {
        let src_row = src.row(y).expect("row within bounds");
        for (j, value) in dst.iter_mut().enumerate() {
            let mut acc = Complex64::new(0.0, 0.0);
            for (m, tap) in taps_x.iter().enumerate() {
                acc += *tap * src_row[(j + width - m) % width];
            }
            *value = acc;
        }
    });

    let mut out = vec![0.0f64; width * height];
    for_each_row_mut(&mut out, width, |y, dst| {
        for (x, value) in dst.iter_mut().enumerate() {
            let mut acc = Complex64::new(0.0, 0.0);
            for (m, tap) in taps_y.iter().enumerate() {
                let src_y = (y + height - m) % height;
                acc += *tap * rows[src_y * width + x];
            }
            *value = acc.re;
        }
    });

    OwnedImage::new(out, width, height).expect("shift output is contiguous")
}
