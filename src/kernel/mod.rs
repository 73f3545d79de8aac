//! Cross-correlation kernel construction.
//!
//! Every mode first normalizes the probe to unit sum and shifts its center to
//! pixel `(0, 0)` with wraparound. `flat` stops there. The other modes then
//! subtract a unit-sum radial profile, which surrounds the probe with a ring of
//! negative weight and gives the kernel an edge-filtering response; those
//! kernels sum to zero.

use crate::image::{ImageView, OwnedImage};
use crate::metadata::KernelArgs;
use crate::probe::center::center_of_mass;
use crate::shift::{shift_wrapped, ShiftMethod};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{logistic_step, sine_squared_step};
use crate::util::{ProbeKernelError, ProbeKernelResult};

mod shape;
mod spec;

pub use spec::{KernelMode, KernelShape, KernelSpec};

/// Builds a kernel from `probe` as described by `spec`.
///
/// The output has the probe's dimensions.
pub fn build_kernel(
    probe: ImageView<'_, f64>,
    spec: &KernelSpec,
) -> ProbeKernelResult<OwnedImage<f64>> {
    let _span = trace_span!(
        "build_kernel",
        mode = spec.mode().as_str(),
        width = probe.width(),
        height = probe.height()
    )
    .entered();

    spec.validate()?;

    let total = probe.sum();
    if total == 0.0 || !total.is_finite() {
        return Err(ProbeKernelError::DegenerateProbe {
            reason: "total intensity is zero or not finite",
        });
    }

    let (cx, cy) = match spec.center {
        Some(center) => center,
        None => center_of_mass(probe)?,
    };
    let method = spec.shift_method();
    trace_event!(
        "kernel_center",
        center_x = cx,
        center_y = cy,
        detected = spec.center.is_none(),
        bilinear = method == ShiftMethod::Bilinear
    );

    let mut kernel = shift_wrapped(probe, -cx, -cy, method)?;
    let inv_total = total.recip();
    for value in kernel.data_mut() {
        *value *= inv_total;
    }

    match spec.shape {
        KernelShape::Flat => {}
        KernelShape::Gaussian { sigma } => shape::subtract_gaussian(&mut kernel, sigma)?,
        KernelShape::Sigmoid { radii: (ri, ro) } => {
            shape::subtract_radial(&mut kernel, |r| sine_squared_step(r, ri, ro))?
        }
        KernelShape::SigmoidLog { radii: (ri, ro) } => {
            shape::subtract_radial(&mut kernel, |r| logistic_step(r, ri, ro))?
        }
    }

    trace_event!("kernel_built", sum = kernel.sum());
    Ok(kernel)
}

/// Builds a kernel from a mode selector and keyword parameters.
///
/// Fails with [`ProbeKernelError::UnknownMode`] for an unsupported `mode` and
/// with a parameter error when `args` do not fit the mode.
pub fn build_kernel_from_args(
    probe: ImageView<'_, f64>,
    mode: &str,
    args: &KernelArgs,
) -> ProbeKernelResult<OwnedImage<f64>> {
    let mode: KernelMode = mode.parse()?;
    let spec = KernelSpec::from_args(mode, args)?;
    build_kernel(probe, &spec)
}

#[cfg(test)]
mod tests {
    use super::{build_kernel, build_kernel_from_args, KernelSpec};
    use crate::image::OwnedImage;
    use crate::metadata::KernelArgs;
    use crate::util::ProbeKernelError;

    fn disk(size: usize, cx: f64, cy: f64, radius: f64) -> OwnedImage<f64> {
        let mut data = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let r = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
                data.push(if r <= radius { 1.0 } else { 0.0 });
            }
        }
        OwnedImage::new(data, size, size).unwrap()
    }

    #[test]
    fn flat_kernel_moves_integer_center_to_origin() {
        let probe = disk(16, 9.0, 5.0, 2.0);
        let kernel = build_kernel(probe.view(), &KernelSpec::flat()).unwrap();
        assert!((kernel.sum() - 1.0).abs() < 1e-12);
        let peak = kernel.get(0, 0).unwrap();
        assert!(peak > 0.0);
        assert_eq!(kernel.get(0, 0), kernel.get(15, 0));
        assert_eq!(kernel.get(0, 2), kernel.get(0, 14));
    }

    #[test]
    fn zero_probe_is_degenerate() {
        let probe = OwnedImage::filled(0.0f64, 4, 4).unwrap();
        let err = build_kernel(probe.view(), &KernelSpec::flat()).unwrap_err();
        assert!(matches!(err, ProbeKernelError::DegenerateProbe { .. }));
    }

    #[test]
    fn unknown_mode_comes_from_dispatch() {
        let probe = disk(8, 4.0, 4.0, 1.5);
        let err = build_kernel_from_args(probe.view(), "box", &KernelArgs::new()).unwrap_err();
        assert_eq!(err, ProbeKernelError::UnknownMode { mode: "box".into() });
    }

    #[test]
    fn explicit_center_skips_detection() {
        let probe = disk(12, 6.0, 6.0, 2.0);
        let pinned = build_kernel(probe.view(), &KernelSpec::flat().with_center(6.0, 6.0)).unwrap();
        let detected = build_kernel(probe.view(), &KernelSpec::flat()).unwrap();
        for (a, b) in pinned.data().iter().zip(detected.data()) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
