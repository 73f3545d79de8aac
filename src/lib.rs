//! probekernel builds cross-correlation kernels from electron-microscopy probe
//! images.
//!
//! A [`Probe`] owns a 2D probe image. [`Probe::get_kernel`] turns it into a
//! kernel centered on the origin, optionally surrounded by a negative ring for
//! edge-sensitive template matching, and records how the kernel was made in the
//! probe's metadata. Row passes run in parallel with the `rayon` feature.
//!
//! ```
//! use probekernel::{KernelArgs, OwnedImage, ParamValue, Probe};
//!
//! let mut data = vec![0.0f64; 64];
//! for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
//!     data[y * 8 + x] = 1.0;
//! }
//! let mut probe = Probe::new(OwnedImage::new(data, 8, 8)?);
//!
//! let mut args = KernelArgs::new();
//! args.insert("sigma".into(), ParamValue::Float(2.0));
//! let kernel = probe.get_kernel("gaussian", &args, true)?.expect("returncalc");
//! assert_eq!(probe.kernel(), Some(&kernel));
//! # Ok::<(), probekernel::ProbeKernelError>(())
//! ```

pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod metadata;
pub mod probe;
pub mod shift;
mod trace;
pub mod util;

pub use image::{ImageView, OwnedImage};
pub use kernel::{build_kernel, build_kernel_from_args, KernelMode, KernelShape, KernelSpec};
pub use metadata::{KernelArgs, Metadata, MetadataStore, ParamValue};
pub use probe::{Probe, DEFAULT_MODE, KERNEL_METADATA};
pub use shift::ShiftMethod;
pub use util::{ProbeKernelError, ProbeKernelResult};

#[cfg(feature = "image-io")]
pub use image::io;
