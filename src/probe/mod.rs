//! The probe container and its kernel.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::{build_kernel, build_kernel_from_args, KernelSpec};
use crate::metadata::{KernelArgs, Metadata, MetadataStore};
use crate::trace::{trace_event, trace_span};
use crate::util::ProbeKernelResult;

pub mod center;

/// Mode used when the caller has no preference.
pub const DEFAULT_MODE: &str = "flat";

/// Name of the metadata record describing the current kernel.
pub const KERNEL_METADATA: &str = "kernel";

/// A probe image together with its derived correlation kernel.
///
/// The kernel is absent until [`Probe::get_kernel`] or
/// [`Probe::get_kernel_with`] succeeds. Each success replaces both the kernel
/// and the `"kernel"` metadata record.
#[derive(Clone, Debug)]
pub struct Probe {
    probe: OwnedImage<f64>,
    kernel: Option<OwnedImage<f64>>,
    metadata: MetadataStore,
}

impl Probe {
    pub fn new(probe: OwnedImage<f64>) -> Self {
        Self {
            probe,
            kernel: None,
            metadata: MetadataStore::new(),
        }
    }

    /// Copies the probe image out of a borrowed view.
    pub fn from_view(view: ImageView<'_, f64>) -> Self {
        Self::new(OwnedImage::from_view(view))
    }

    /// Returns the probe image.
    pub fn probe(&self) -> &OwnedImage<f64> {
        &self.probe
    }

    /// Returns the most recently computed kernel.
    pub fn kernel(&self) -> Option<&OwnedImage<f64>> {
        self.kernel.as_ref()
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MetadataStore {
        &mut self.metadata
    }

    /// Returns the record describing how the current kernel was built.
    pub fn kernel_metadata(&self) -> Option<&Metadata> {
        self.metadata.get(KERNEL_METADATA)
    }

    /// Builds a kernel for template matching and attaches it to the probe.
    ///
    /// `mode` is one of `flat`, `gaussian`, `sigmoid`, `sigmoid_log`; `args`
    /// holds the mode's keyword parameters (see [`KernelSpec::from_args`]).
    /// On success the kernel is stored, the `"kernel"` record is replaced by
    /// `mode` plus `args` exactly as passed, and a copy of the kernel is
    /// returned when `returncalc` is set. On failure the probe is unchanged.
    pub fn get_kernel(
        &mut self,
        mode: &str,
        args: &KernelArgs,
        returncalc: bool,
    ) -> ProbeKernelResult<Option<OwnedImage<f64>>> {
        let _span = trace_span!("probe_get_kernel", mode = mode).entered();
        let kernel = build_kernel_from_args(self.probe.view(), mode, args)?;
        Ok(self.attach(kernel, mode, args, returncalc))
    }

    /// Typed variant of [`Probe::get_kernel`].
    ///
    /// The recorded parameters are [`KernelSpec::to_args`], so only options
    /// set on `spec` appear in the metadata.
    pub fn get_kernel_with(
        &mut self,
        spec: &KernelSpec,
        returncalc: bool,
    ) -> ProbeKernelResult<Option<OwnedImage<f64>>> {
        let mode = spec.mode().as_str();
        let _span = trace_span!("probe_get_kernel", mode = mode).entered();
        let kernel = build_kernel(self.probe.view(), spec)?;
        Ok(self.attach(kernel, mode, &spec.to_args(), returncalc))
    }

    fn attach(
        &mut self,
        kernel: OwnedImage<f64>,
        mode: &str,
        args: &KernelArgs,
        returncalc: bool,
    ) -> Option<OwnedImage<f64>> {
        let mut record = Metadata::new(KERNEL_METADATA);
        record.insert("mode", mode);
        for (key, value) in args {
            record.insert(key.as_str(), value.clone());
        }
        trace_event!("kernel_attached", entries = record.len());
        self.metadata.insert(record);

        let returned = returncalc.then(|| kernel.clone());
        self.kernel = Some(kernel);
        returned
    }
}
