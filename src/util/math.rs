//! Numeric helpers for kernel shaping and wrapped shifts.

use std::f64::consts::{FRAC_PI_2, TAU};

use num_complex::Complex64;

/// Signed wrapped coordinate of index `i` on a periodic axis of length `n`.
///
/// Matches `fftfreq(n) * n`: `0, 1, .., ceil(n/2)-1, -floor(n/2), .., -1`.
pub(crate) fn wrapped_coord(i: usize, n: usize) -> f64 {
    let half = n / 2;
    ((i + half) % n) as f64 - half as f64
}

/// Falls from 1 at `r <= ri` to 0 at `r >= ro` with a `cos^2` profile.
pub(crate) fn sine_squared_step(r: f64, ri: f64, ro: f64) -> f64 {
    let t = ((r - ri) / (ro - ri)).clamp(0.0, 1.0);
    let c = (FRAC_PI_2 * t).cos();
    c * c
}

/// Logistic step centered halfway between `ri` and `ro`.
///
/// The width is a quarter of the annulus thickness, so the profile has
/// mostly decayed by the outer radius.
pub(crate) fn logistic_step(r: f64, ri: f64, ro: f64) -> f64 {
    let r0 = 0.5 * (ri + ro);
    let width = 0.25 * (ro - ri);
    1.0 / (1.0 + ((r - r0) / width).exp())
}

/// Circular convolution taps that shift a periodic signal of length `n` by `d`.
///
/// `taps[m] = (1/n) * sum_k exp(2πi k (m - d) / n)` over the `fftfreq`
/// frequencies `k`, i.e. the inverse DFT of the phase ramp `exp(-2πi k d / n)`.
/// Applying them as `out[j] = sum_m taps[m] * in[(j - m) mod n]` is the
/// Fourier shift theorem without an FFT.
pub(crate) fn fourier_shift_taps(n: usize, d: f64) -> Vec<Complex64> {
    let inv_n = 1.0 / n as f64;
    (0..n)
        .map(|m| {
            let acc: Complex64 = (0..n)
                .map(|k| {
                    let freq = wrapped_coord(k, n);
                    Complex64::from_polar(1.0, TAU * freq * (m as f64 - d) * inv_n)
                })
                .sum();
            acc * inv_n
        })
        .collect()
}
