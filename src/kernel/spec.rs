//! Kernel modes and their parameters.

use std::fmt;
use std::str::FromStr;

use crate::metadata::{KernelArgs, ParamValue};
use crate::shift::ShiftMethod;
use crate::util::{ProbeKernelError, ProbeKernelResult};

/// Kernel-shaping strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KernelMode {
    /// Centered, unit-sum probe with no further processing.
    Flat,
    /// Subtracts a Gaussian scaled to the probe's radial spread.
    Gaussian,
    /// Subtracts a disk with a sine-squared edge between two radii.
    Sigmoid,
    /// Subtracts a disk with a logistic edge between two radii.
    SigmoidLog,
}

impl KernelMode {
    /// Every supported mode.
    pub const ALL: [KernelMode; 4] = [
        KernelMode::Flat,
        KernelMode::Gaussian,
        KernelMode::Sigmoid,
        KernelMode::SigmoidLog,
    ];

    /// Returns the selector string for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            KernelMode::Flat => "flat",
            KernelMode::Gaussian => "gaussian",
            KernelMode::Sigmoid => "sigmoid",
            KernelMode::SigmoidLog => "sigmoid_log",
        }
    }

    /// Shift method used when the caller does not pick one.
    ///
    /// Flat kernels keep the probe band-limited; ring-subtracting modes use
    /// bilinear shifts so the ring and the probe share the same support.
    pub fn default_shift(self) -> ShiftMethod {
        match self {
            KernelMode::Flat => ShiftMethod::Fourier,
            _ => ShiftMethod::Bilinear,
        }
    }

    fn accepts(self, key: &str) -> bool {
        match key {
            "center" | "bilinear" => true,
            "sigma" => self == KernelMode::Gaussian,
            "radii" => matches!(self, KernelMode::Sigmoid | KernelMode::SigmoidLog),
            _ => false,
        }
    }
}

impl fmt::Display for KernelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelMode {
    type Err = ProbeKernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KernelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ProbeKernelError::UnknownMode { mode: s.to_owned() })
    }
}

/// Mode together with its shape parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KernelShape {
    Flat,
    /// `sigma` scales the probe's own radial standard deviation.
    Gaussian { sigma: f64 },
    /// Inner and outer radius `(ri, ro)` of the subtracted edge, in pixels.
    Sigmoid { radii: (f64, f64) },
    /// Inner and outer radius `(ri, ro)` of the subtracted edge, in pixels.
    SigmoidLog { radii: (f64, f64) },
}

impl KernelShape {
    pub fn mode(&self) -> KernelMode {
        match self {
            KernelShape::Flat => KernelMode::Flat,
            KernelShape::Gaussian { .. } => KernelMode::Gaussian,
            KernelShape::Sigmoid { .. } => KernelMode::Sigmoid,
            KernelShape::SigmoidLog { .. } => KernelMode::SigmoidLog,
        }
    }
}

/// Full description of a kernel to build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelSpec {
    pub shape: KernelShape,
    /// Probe center `(x, y)`; the center of mass is used when `None`.
    pub center: Option<(f64, f64)>,
    /// Shift method override; see [`KernelMode::default_shift`].
    pub shift: Option<ShiftMethod>,
}

impl KernelSpec {
    pub fn new(shape: KernelShape) -> Self {
        Self {
            shape,
            center: None,
            shift: None,
        }
    }

    pub fn flat() -> Self {
        Self::new(KernelShape::Flat)
    }

    pub fn gaussian(sigma: f64) -> Self {
        Self::new(KernelShape::Gaussian { sigma })
    }

    pub fn sigmoid(ri: f64, ro: f64) -> Self {
        Self::new(KernelShape::Sigmoid { radii: (ri, ro) })
    }

    pub fn sigmoid_log(ri: f64, ro: f64) -> Self {
        Self::new(KernelShape::SigmoidLog { radii: (ri, ro) })
    }

    /// Pins the probe center instead of detecting it.
    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center = Some((x, y));
        self
    }

    pub fn with_shift(mut self, method: ShiftMethod) -> Self {
        self.shift = Some(method);
        self
    }

    pub fn mode(&self) -> KernelMode {
        self.shape.mode()
    }

    /// Shift method in effect after applying the mode default.
    pub fn shift_method(&self) -> ShiftMethod {
        self.shift.unwrap_or_else(|| self.mode().default_shift())
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> ProbeKernelResult<()> {
        if let Some((x, y)) = self.center {
            if !x.is_finite() || !y.is_finite() {
                return Err(ProbeKernelError::InvalidParameter {
                    name: "center",
                    reason: "center must be finite",
                });
            }
        }
        match self.shape {
            KernelShape::Flat => Ok(()),
            KernelShape::Gaussian { sigma } => {
                if sigma.is_finite() && sigma > 0.0 {
                    Ok(())
                } else {
                    Err(ProbeKernelError::InvalidParameter {
                        name: "sigma",
                        reason: "sigma must be finite and positive",
                    })
                }
            }
            KernelShape::Sigmoid { radii: (ri, ro) }
            | KernelShape::SigmoidLog { radii: (ri, ro) } => {
                if !ri.is_finite() || !ro.is_finite() {
                    return Err(ProbeKernelError::InvalidParameter {
                        name: "radii",
                        reason: "radii must be finite",
                    });
                }
                if ri < 0.0 || ri >= ro {
                    return Err(ProbeKernelError::InvalidParameter {
                        name: "radii",
                        reason: "radii must satisfy 0 <= inner < outer",
                    });
                }
                Ok(())
            }
        }
    }

    /// Parses keyword parameters for `mode`.
    ///
    /// Every mode accepts `center` (pair) and `bilinear` (bool). `gaussian`
    /// requires `sigma`; `sigmoid` and `sigmoid_log` require `radii`.
    pub fn from_args(mode: KernelMode, args: &KernelArgs) -> ProbeKernelResult<Self> {
        if let Some(key) = args.keys().find(|key| !mode.accepts(key)) {
            return Err(ProbeKernelError::UnexpectedParameter {
                mode: mode.as_str(),
                name: key.clone(),
            });
        }

        let shape = match mode {
            KernelMode::Flat => KernelShape::Flat,
            KernelMode::Gaussian => KernelShape::Gaussian {
                sigma: required(mode, args, "sigma", number)?,
            },
            KernelMode::Sigmoid => KernelShape::Sigmoid {
                radii: required(mode, args, "radii", pair)?,
            },
            KernelMode::SigmoidLog => KernelShape::SigmoidLog {
                radii: required(mode, args, "radii", pair)?,
            },
        };

        let spec = Self {
            shape,
            center: optional(args, "center", pair)?,
            shift: optional(args, "bilinear", flag)?.map(|bilinear| {
                if bilinear {
                    ShiftMethod::Bilinear
                } else {
                    ShiftMethod::Fourier
                }
            }),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Keyword parameters that reproduce this spec via [`KernelSpec::from_args`].
    ///
    /// Unset options are omitted rather than filled with defaults.
    pub fn to_args(&self) -> KernelArgs {
        let mut args = KernelArgs::new();
        match self.shape {
            KernelShape::Flat => {}
            KernelShape::Gaussian { sigma } => {
                args.insert("sigma".into(), ParamValue::Float(sigma));
            }
            KernelShape::Sigmoid { radii } | KernelShape::SigmoidLog { radii } => {
                args.insert("radii".into(), radii.into());
            }
        }
        if let Some(center) = self.center {
            args.insert("center".into(), center.into());
        }
        if let Some(method) = self.shift {
            args.insert(
                "bilinear".into(),
                ParamValue::Bool(method == ShiftMethod::Bilinear),
            );
        }
        args
    }
}

fn number(value: &ParamValue) -> Option<f64> {
    value.as_f64()
}

fn pair(value: &ParamValue) -> Option<(f64, f64)> {
    value.as_pair()
}

fn flag(value: &ParamValue) -> Option<bool> {
    value.as_bool()
}

fn optional<T>(
    args: &KernelArgs,
    name: &'static str,
    parse: fn(&ParamValue) -> Option<T>,
) -> ProbeKernelResult<Option<T>> {
    match args.get(name) {
        None => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or(ProbeKernelError::InvalidParameter {
                name,
                reason: type_hint(name),
            }),
    }
}

fn required<T>(
    mode: KernelMode,
    args: &KernelArgs,
    name: &'static str,
    parse: fn(&ParamValue) -> Option<T>,
) -> ProbeKernelResult<T> {
    optional(args, name, parse)?.ok_or(ProbeKernelError::MissingParameter {
        mode: mode.as_str(),
        name,
    })
}

fn type_hint(name: &str) -> &'static str {
    match name {
        "sigma" => "expected a number",
        "bilinear" => "expected a boolean",
        _ => "expected a 2-tuple of numbers",
    }
}

#[cfg(test)]
mod tests {
    use super::{KernelMode, KernelShape, KernelSpec};
    use crate::metadata::{KernelArgs, ParamValue};
    use crate::shift::ShiftMethod;
    use crate::util::ProbeKernelError;

    fn args(pairs: &[(&str, ParamValue)]) -> KernelArgs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in KernelMode::ALL {
            assert_eq!(mode.as_str().parse::<KernelMode>().unwrap(), mode);
        }
        assert_eq!(
            "Gaussian".parse::<KernelMode>().unwrap_err(),
            ProbeKernelError::UnknownMode {
                mode: "Gaussian".into()
            }
        );
    }

    #[test]
    fn gaussian_requires_sigma() {
        let err = KernelSpec::from_args(KernelMode::Gaussian, &KernelArgs::new()).unwrap_err();
        assert_eq!(
            err,
            ProbeKernelError::MissingParameter {
                mode: "gaussian",
                name: "sigma"
            }
        );
    }

    #[test]
    fn integer_sigma_is_accepted() {
        let spec =
            KernelSpec::from_args(KernelMode::Gaussian, &args(&[("sigma", ParamValue::Int(2))]))
                .unwrap();
        assert_eq!(spec.shape, KernelShape::Gaussian { sigma: 2.0 });
        assert_eq!(spec.shift_method(), ShiftMethod::Bilinear);
    }

    #[test]
    fn flat_rejects_mode_specific_keys() {
        let err = KernelSpec::from_args(KernelMode::Flat, &args(&[("sigma", 1.0.into())]))
            .unwrap_err();
        assert_eq!(
            err,
            ProbeKernelError::UnexpectedParameter {
                mode: "flat",
                name: "sigma".into()
            }
        );
    }

    #[test]
    fn radii_must_be_a_pair_in_order() {
        let err = KernelSpec::from_args(KernelMode::Sigmoid, &args(&[("radii", 3.0.into())]))
            .unwrap_err();
        assert!(matches!(
            err,
            ProbeKernelError::InvalidParameter { name: "radii", .. }
        ));

        let err = KernelSpec::from_args(
            KernelMode::SigmoidLog,
            &args(&[("radii", (5.0, 2.0).into())]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProbeKernelError::InvalidParameter { name: "radii", .. }
        ));
    }

    #[test]
    fn bilinear_flag_overrides_default_shift() {
        let spec = KernelSpec::from_args(
            KernelMode::Flat,
            &args(&[("bilinear", true.into()), ("center", (1.5, 2.0).into())]),
        )
        .unwrap();
        assert_eq!(spec.shift_method(), ShiftMethod::Bilinear);
        assert_eq!(spec.center, Some((1.5, 2.0)));
    }

    #[test]
    fn to_args_round_trips_explicit_fields_only() {
        let spec = KernelSpec::sigmoid(2.0, 6.0).with_center(10.0, 12.5);
        let recorded = spec.to_args();
        assert_eq!(recorded.len(), 2);
        assert!(!recorded.contains_key("bilinear"));
        assert_eq!(
            KernelSpec::from_args(KernelMode::Sigmoid, &recorded).unwrap(),
            spec
        );
    }
}
