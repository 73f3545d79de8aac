//! Convenience helpers for loading probes and saving kernels via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::OwnedImage;
use crate::util::{ProbeKernelError, ProbeKernelResult};
use std::path::Path;

type Gray16 = image::ImageBuffer<image::Luma<u16>, Vec<u16>>;

/// Converts a dynamic image to a floating-point intensity image.
///
/// Color inputs are reduced to 16-bit luma first.
pub fn probe_from_dynamic_image(img: &image::DynamicImage) -> ProbeKernelResult<OwnedImage<f64>> {
    let gray = img.to_luma16();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    let data = gray.as_raw().iter().map(|&v| f64::from(v)).collect();
    OwnedImage::new(data, width, height)
}

/// Loads a probe image from disk.
pub fn load_probe_image<P: AsRef<Path>>(path: P) -> ProbeKernelResult<OwnedImage<f64>> {
    let img = image::open(path).map_err(|err| ProbeKernelError::ImageIo {
        reason: err.to_string(),
    })?;
    probe_from_dynamic_image(&img)
}

/// Writes a kernel as a 16-bit grayscale PNG for inspection.
///
/// The kernel range is stretched linearly onto `0..=65535`. A constant kernel
/// is written as all zeros.
pub fn save_kernel_png<P: AsRef<Path>>(kernel: &OwnedImage<f64>, path: P) -> ProbeKernelResult<()> {
    let (lo, hi) = kernel
        .data()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = hi - lo;
    let scale = if span > 0.0 && span.is_finite() {
        f64::from(u16::MAX) / span
    } else {
        0.0
    };
    let pixels: Vec<u16> = kernel
        .data()
        .iter()
        .map(|&v| ((v - lo) * scale).round().clamp(0.0, f64::from(u16::MAX)) as u16)
        .collect();

    let width = u32::try_from(kernel.width()).map_err(|_| ProbeKernelError::InvalidDimensions {
        width: kernel.width(),
        height: kernel.height(),
    })?;
    let height =
        u32::try_from(kernel.height()).map_err(|_| ProbeKernelError::InvalidDimensions {
            width: kernel.width(),
            height: kernel.height(),
        })?;
    let buffer = Gray16::from_raw(width, height, pixels).ok_or(
        ProbeKernelError::BufferLengthMismatch {
            expected: kernel.width() * kernel.height(),
            got: kernel.data().len(),
        },
    )?;
    buffer.save(path).map_err(|err| ProbeKernelError::ImageIo {
        reason: err.to_string(),
    })
}
