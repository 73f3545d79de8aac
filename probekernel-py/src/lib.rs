//! Python bindings for probekernel.
//!
//! Arrays cross the boundary as `float64` numpy arrays of shape
//! `(height, width)`. Centers are `(x, y)` with `x` the column index, i.e.
//! `(array[1] axis, array[0] axis)`. py4DSTEM's `(qx0, qy0)` is row-first,
//! so it is passed here as `center=(qy0, qx0)`.

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyInt};

use probekernel::{
    KernelArgs, OwnedImage, ParamValue, Probe as RustProbe, ProbeKernelError, DEFAULT_MODE,
};

/// Convert a ProbeKernelError to a Python exception.
fn to_py_err(err: ProbeKernelError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn to_numpy<'py>(py: Python<'py>, img: &OwnedImage<f64>) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let array = Array2::from_shape_vec((img.height(), img.width()), img.data().to_vec())
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(array.into_pyarray(py))
}

fn from_numpy(array: &PyReadonlyArray2<'_, f64>) -> PyResult<OwnedImage<f64>> {
    let shape = array.shape();
    let height = shape[0];
    let width = shape[1];
    // Iteration follows logical order, so non-contiguous inputs are fine.
    let data: Vec<f64> = array.as_array().iter().copied().collect();
    OwnedImage::new(data, width, height).map_err(to_py_err)
}

fn to_param(value: &Bound<'_, PyAny>) -> PyResult<ParamValue> {
    // bool is a subclass of int, so it has to be checked first.
    if value.is_instance_of::<PyBool>() {
        return Ok(ParamValue::Bool(value.extract()?));
    }
    if value.is_instance_of::<PyInt>() {
        return Ok(ParamValue::Int(value.extract()?));
    }
    if let Ok(v) = value.extract::<f64>() {
        return Ok(ParamValue::Float(v));
    }
    if let Ok((a, b)) = value.extract::<(f64, f64)>() {
        return Ok(ParamValue::Pair(a, b));
    }
    if let Ok(v) = value.extract::<Vec<f64>>() {
        if let &[a, b] = v.as_slice() {
            return Ok(ParamValue::Pair(a, b));
        }
    }
    if let Ok(v) = value.extract::<String>() {
        return Ok(ParamValue::Str(v));
    }
    Err(PyTypeError::new_err(
        "kernel parameters must be bool, number, 2-tuple of numbers or str",
    ))
}

fn to_args(kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<KernelArgs> {
    let mut args = KernelArgs::new();
    if let Some(kwargs) = kwargs {
        for (key, value) in kwargs.iter() {
            args.insert(key.extract::<String>()?, to_param(&value)?);
        }
    }
    Ok(args)
}

/// A probe image and its cross-correlation kernel.
#[pyclass]
pub struct Probe {
    inner: RustProbe,
}

#[pymethods]
impl Probe {
    /// Create a probe from a 2D float64 numpy array (height x width).
    #[new]
    fn new(probe: PyReadonlyArray2<'_, f64>) -> PyResult<Self> {
        Ok(Self {
            inner: RustProbe::new(from_numpy(&probe)?),
        })
    }

    /// Creates a kernel from the probe for cross-correlative template matching.
    ///
    /// Args:
    ///     mode: "flat", "gaussian", "sigmoid" or "sigmoid_log" (default: "flat")
    ///     returncalc: return the kernel (default: True)
    ///     **kwargs: center and bilinear for every mode; sigma for
    ///         "gaussian"; radii (ri, ro) for the sigmoid modes
    ///
    /// Note:
    ///     center is (column, row), the reverse of numpy indexing. A center
    ///     found as probe[qx0, qy0] is passed as center=(qy0, qx0). The
    ///     metadata records the pair as given.
    ///
    /// Returns:
    ///     The kernel as a 2D array, or None when returncalc is False
    #[pyo3(signature = (mode = DEFAULT_MODE, returncalc = true, **kwargs))]
    fn get_kernel<'py>(
        &mut self,
        py: Python<'py>,
        mode: &str,
        returncalc: bool,
        kwargs: Option<&Bound<'py, PyDict>>,
    ) -> PyResult<Option<Bound<'py, PyArray2<f64>>>> {
        let args = to_args(kwargs)?;
        let kernel = self
            .inner
            .get_kernel(mode, &args, returncalc)
            .map_err(to_py_err)?;
        kernel.map(|k| to_numpy(py, &k)).transpose()
    }

    /// The probe image.
    #[getter]
    fn probe<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        to_numpy(py, self.inner.probe())
    }

    /// The most recent kernel, or None.
    #[getter(kernel)]
    fn kernel_getter<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyArray2<f64>>>> {
        self.inner.kernel().map(|k| to_numpy(py, k)).transpose()
    }

    /// Metadata records as a dict of dicts keyed by record name.
    #[getter]
    fn metadata<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let records = PyDict::new(py);
        for record in self.inner.metadata().iter() {
            let entries = PyDict::new(py);
            for (key, value) in record.iter() {
                match value {
                    ParamValue::Bool(v) => entries.set_item(key, *v)?,
                    ParamValue::Int(v) => entries.set_item(key, *v)?,
                    ParamValue::Float(v) => entries.set_item(key, *v)?,
                    ParamValue::Pair(a, b) => entries.set_item(key, (*a, *b))?,
                    ParamValue::Str(v) => entries.set_item(key, v.as_str())?,
                }
            }
            records.set_item(record.name(), entries)?;
        }
        Ok(records)
    }

    fn __repr__(&self) -> String {
        let probe = self.inner.probe();
        let mode = self
            .inner
            .kernel_metadata()
            .and_then(|md| md.get("mode"))
            .and_then(ParamValue::as_str)
            .unwrap_or("none");
        format!(
            "Probe({}x{}, kernel='{}')",
            probe.width(),
            probe.height(),
            mode
        )
    }
}

/// Load a probe from an image file.
#[pyfunction]
fn load_probe(path: &str) -> PyResult<Probe> {
    let image = probekernel::io::load_probe_image(path).map_err(to_py_err)?;
    Ok(Probe {
        inner: RustProbe::new(image),
    })
}

/// Python module for probe kernels.
#[pymodule]
fn _probekernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Probe>()?;
    m.add_function(wrap_pyfunction!(load_probe, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
