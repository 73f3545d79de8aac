//! Radial ring subtraction applied to a centered, unit-sum probe.
//!
//! All profiles are evaluated on wrapped coordinates, so radius 0 is pixel
//! `(0, 0)` and the profile wraps across the image edges like the probe does.

use crate::image::OwnedImage;
use crate::util::math::wrapped_coord;
use crate::util::{ProbeKernelError, ProbeKernelResult};

/// Squared wrapped radius of every pixel, row-major.
fn radius_squared(width: usize, height: usize) -> impl Iterator<Item = f64> {
    (0..height).flat_map(move |y| {
        let qy = wrapped_coord(y, height);
        (0..width).map(move |x| {
            let qx = wrapped_coord(x, width);
            qx * qx + qy * qy
        })
    })
}

/// Subtracts `profile / sum(profile)` from `kernel`.
fn subtract_normalized(kernel: &mut OwnedImage<f64>, profile: Vec<f64>) -> ProbeKernelResult<()> {
    let total: f64 = profile.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(ProbeKernelError::DegenerateProbe {
            reason: "subtracted profile has no weight",
        });
    }
    for (value, p) in kernel.data_mut().iter_mut().zip(profile) {
        *value -= p / total;
    }
    Ok(())
}

/// Subtracts a unit-sum Gaussian whose variance is `sigma^2` times the
/// probe's own mean squared radius.
pub(crate) fn subtract_gaussian(kernel: &mut OwnedImage<f64>, sigma: f64) -> ProbeKernelResult<()> {
    let (width, height) = (kernel.width(), kernel.height());
    let total = kernel.sum();
    let spread: f64 = radius_squared(width, height)
        .zip(kernel.data())
        .map(|(r2, &p)| r2 * p)
        .sum::<f64>()
        / total;
    if !(spread.is_finite() && spread > 0.0) {
        return Err(ProbeKernelError::DegenerateProbe {
            reason: "probe has no radial spread",
        });
    }

    let denom = 2.0 * spread * sigma * sigma;
    let profile = radius_squared(width, height)
        .map(|r2| (-r2 / denom).exp())
        .collect();
    subtract_normalized(kernel, profile)
}

/// Subtracts a unit-sum radial profile `f(r)`.
pub(crate) fn subtract_radial<F>(kernel: &mut OwnedImage<f64>, f: F) -> ProbeKernelResult<()>
where
    F: Fn(f64) -> f64,
{
    let profile = radius_squared(kernel.width(), kernel.height())
        .map(|r2| f(r2.sqrt()))
        .collect();
    subtract_normalized(kernel, profile)
}

#[cfg(test)]
mod tests {
    use super::{radius_squared, subtract_gaussian, subtract_radial};
    use crate::image::OwnedImage;
    use crate::util::ProbeKernelError;

    #[test]
    fn radius_wraps_at_edges() {
        let r2: Vec<f64> = radius_squared(4, 1).collect();
        assert_eq!(r2, vec![0.0, 1.0, 4.0, 1.0]);
    }

    #[test]
    fn delta_probe_has_no_spread() {
        let mut data = vec![0.0f64; 16];
        data[0] = 1.0;
        let mut kernel = OwnedImage::new(data, 4, 4).unwrap();
        let err = subtract_gaussian(&mut kernel, 1.0).unwrap_err();
        assert!(matches!(err, ProbeKernelError::DegenerateProbe { .. }));
    }

    #[test]
    fn radial_subtraction_zeroes_the_sum() {
        let mut kernel = OwnedImage::filled(1.0 / 25.0, 5, 5).unwrap();
        subtract_radial(&mut kernel, |r| if r <= 1.0 { 1.0 } else { 0.0 }).unwrap();
        assert!(kernel.sum().abs() < 1e-12);
        // Five pixels lie within radius 1, each losing 1/5.
        assert!((kernel.get(0, 0).unwrap() - (0.04 - 0.2)).abs() < 1e-12);
        assert!((kernel.get(2, 2).unwrap() - 0.04).abs() < 1e-12);
    }
}
