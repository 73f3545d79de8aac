//! Bilinear wraparound shift.

use crate::image::{ImageView, OwnedImage};
use crate::shift::{for_each_row_mut, reduce_shift, wrap_index};

/// Shifts `src` by `(dx, dy)` with wraparound, blending the four integer rolls
/// `floor(d)` and `floor(d) + 1` on each axis.
///
/// The shift preserves the image sum. Non-finite shifts produce an unspecified
/// image; use [`crate::shift::shift_wrapped`] for validated input.
pub fn shift_wrapped_bilinear(src: ImageView<'_, f64>, dx: f64, dy: f64) -> OwnedImage<f64> {
    let width = src.width();
    let height = src.height();

    let dx = reduce_shift(dx, width);
    let dy = reduce_shift(dy, height);
    let x0 = dx.floor();
    let y0 = dy.floor();
    let wx = dx - x0;
    let wy = dy - y0;
    let x0 = x0 as i64;
    let y0 = y0 as i64;

    let mut out = vec![0.0f64; width * height];
    for_each_row_mut(&mut out, width, |y, dst| {
        let top = src.row(wrap_index(y, y0, height)).expect("row within bounds");
        let bottom = src
            .row(wrap_index(y, y0 + 1, height))
            .expect("row within bounds");
        for (x, value) in dst.iter_mut().enumerate() {
            let left = wrap_index(x, x0, width);
            let right = wrap_index(x, x0 + 1, width);
            *value = top[left] * (1.0 - wx) * (1.0 - wy)
                + top[right] * wx * (1.0 - wy)
                + bottom[left] * (1.0 - wx) * wy
                + bottom[right] * wx * wy;
        }
    });

    OwnedImage::new(out, width, height).expect("shift output is contiguous")
}
