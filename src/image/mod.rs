//! Image views and owned image buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. ROI slices are zero-copy
//! views into the same backing slice and retain the original stride.
//!
//! Coordinates follow the usual raster convention: `x` indexes columns and
//! `y` indexes rows.

use crate::util::{ProbeKernelError, ProbeKernelResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::OwnedImage;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> ProbeKernelResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> ProbeKernelResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(ProbeKernelError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over the rows of the view, skipping stride padding.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        // Construction guarantees every row lies inside the buffer.
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> ProbeKernelResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(ProbeKernelError::InvalidDimensions { width, height });
        }

        let out_of_bounds = ProbeKernelError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let fits = matches!(
            (x.checked_add(width), y.checked_add(height)),
            (Some(end_x), Some(end_y)) if end_x <= self.width && end_y <= self.height
        );
        if !fits {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(out_of_bounds)?;
        let data = self
            .data
            .get(start..)
            .ok_or(ProbeKernelError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.stride)
    }
}

impl<T: Copy> ImageView<'_, T> {
    /// Copies the view into a contiguous owned image.
    pub fn to_owned_image(&self) -> OwnedImage<T> {
        OwnedImage::from_view(*self)
    }
}

impl ImageView<'_, f64> {
    /// Sums every pixel of the view.
    pub fn sum(&self) -> f64 {
        self.rows().map(|row| row.iter().sum::<f64>()).sum()
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> ProbeKernelResult<usize> {
    if width == 0 || height == 0 {
        return Err(ProbeKernelError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(ProbeKernelError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(ProbeKernelError::InvalidDimensions { width, height })
}
