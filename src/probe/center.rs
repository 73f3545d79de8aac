//! Probe center estimation.

use crate::image::ImageView;
use crate::util::{ProbeKernelError, ProbeKernelResult};

/// Returns the intensity-weighted center `(x, y)` of `img`.
///
/// `x` is the mean column and `y` the mean row, both in pixel units.
pub fn center_of_mass(img: ImageView<'_, f64>) -> ProbeKernelResult<(f64, f64)> {
    let mut total = 0.0f64;
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    for (y, row) in img.rows().enumerate() {
        let mut row_total = 0.0f64;
        for (x, &value) in row.iter().enumerate() {
            row_total += value;
            sum_x += x as f64 * value;
        }
        total += row_total;
        sum_y += y as f64 * row_total;
    }

    if total == 0.0 || !total.is_finite() {
        return Err(ProbeKernelError::DegenerateProbe {
            reason: "total intensity is zero or not finite",
        });
    }
    Ok((sum_x / total, sum_y / total))
}
