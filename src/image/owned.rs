//! Owned contiguous image buffers.

use crate::image::ImageView;
use crate::util::{ProbeKernelError, ProbeKernelResult};

/// Owned contiguous image buffer in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy> OwnedImage<T> {
    /// Wraps a row-major buffer of exactly `width * height` elements.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> ProbeKernelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ProbeKernelError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(ProbeKernelError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(ProbeKernelError::BufferLengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocates an image filled with `value`.
    pub fn filled(value: T, width: usize, height: usize) -> ProbeKernelResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(ProbeKernelError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height)
    }

    /// Copies a possibly strided view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, T>) -> Self {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
        }
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel buffer in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the image and returns its pixel buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl OwnedImage<f64> {
    /// Sums every pixel.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
