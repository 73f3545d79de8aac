//! Low-level building blocks for custom kernel pipelines.
//!
//! Most users should prefer [`crate::Probe`] and [`crate::build_kernel`].

pub use crate::probe::center::center_of_mass;
pub use crate::shift::{roll, shift_wrapped, shift_wrapped_bilinear, shift_wrapped_fourier};
