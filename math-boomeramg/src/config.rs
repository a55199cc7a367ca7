//! JSON configuration for BoomerAMG and outer solver parameters
//!
//! ```json
//! {
//!   "amg": {
//!     "variant": "air",
//!     "max_iter": 20,
//!     "overrides": { "coarsen_type": 10, "relaxation_order": ["FFC", "CF"] }
//!   },
//!   "solver": { "kind": "gmres", "max_iter": 200, "tolerance": 1e-8 }
//! }
//! ```
//!
//! Overrides only change parameters that already exist in the loaded default
//! set; a misspelled key is reported as `UnknownKey`.

use crate::backend::{BoomerAmgSetters, HypreInt, HypreReal, KrylovSetters, SolverKind};
use crate::boomeramg::{AmgVariant, BoomerAmgParameters, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
use crate::error::{HypreError, Result};
use crate::krylov::{DEFAULT_SOLVER_MAX_ITER, DEFAULT_SOLVER_TOLERANCE, SolverParameters};
use crate::parameters::{ParamValue, ParameterRegistry, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Complete parameter configuration loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterConfig {
    /// BoomerAMG parameter set
    #[serde(default)]
    pub amg: AmgConfig,
    /// Outer Krylov solver
    #[serde(default)]
    pub solver: SolverConfig,
}

/// BoomerAMG section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmgConfig {
    /// Default set to start from
    #[serde(default)]
    pub variant: AmgVariant,
    /// Iteration limit, replaces the default when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iter: Option<HypreInt>,
    /// Tolerance, replaces the default when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<HypreReal>,
    /// Values for existing parameters, by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, ConfigValue>,
}

/// Outer solver section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Krylov method
    #[serde(default)]
    pub kind: SolverKind,
    /// Iteration limit
    #[serde(default = "default_solver_max_iter")]
    pub max_iter: HypreInt,
    /// Relative tolerance
    #[serde(default = "default_solver_tolerance")]
    pub tolerance: HypreReal,
    /// Values for existing parameters, by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, ConfigValue>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            kind: SolverKind::default(),
            max_iter: DEFAULT_SOLVER_MAX_ITER,
            tolerance: DEFAULT_SOLVER_TOLERANCE,
            overrides: BTreeMap::new(),
        }
    }
}

fn default_solver_max_iter() -> HypreInt {
    DEFAULT_SOLVER_MAX_ITER
}

fn default_solver_tolerance() -> HypreReal {
    DEFAULT_SOLVER_TOLERANCE
}

/// A parameter value as written in JSON.
///
/// JSON has no tuples, so pairs are written as two-element arrays and are
/// matched against the shape of the registered value when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// `3`
    Int(HypreInt),
    /// `0.25`
    Real(HypreReal),
    /// `["A", "FFC"]`
    StringPair(String, String),
    /// `[1, 2, 3]`
    IntArray(Vec<HypreInt>),
    /// `[0.5, 1.0]`
    RealArray(Vec<HypreReal>),
    /// `[[0], [-1, 1]]`
    NestedIntArray(Vec<Vec<HypreInt>>),
}

impl ConfigValue {
    /// Shape this value has on its own, before coercion
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Int(_) => ValueKind::Int,
            ConfigValue::Real(_) => ValueKind::Real,
            ConfigValue::StringPair(_, _) => ValueKind::StringPair,
            ConfigValue::IntArray(_) => ValueKind::IntArray,
            ConfigValue::RealArray(_) => ValueKind::RealArray,
            ConfigValue::NestedIntArray(_) => ValueKind::NestedIntArray,
        }
    }

    /// Convert into a [`ParamValue`] of the given shape.
    ///
    /// Returns `None` if this value cannot represent `kind`.
    pub fn coerce(&self, kind: ValueKind) -> Option<ParamValue> {
        match (self, kind) {
            (ConfigValue::Int(v), ValueKind::Int) => Some(ParamValue::Int(*v)),
            (ConfigValue::Int(v), ValueKind::Real) => Some(ParamValue::Real(*v as HypreReal)),
            (ConfigValue::Real(v), ValueKind::Real) => Some(ParamValue::Real(*v)),
            (ConfigValue::StringPair(a, b), ValueKind::StringPair) => {
                Some(ParamValue::StringPair(a.clone(), b.clone()))
            }
            (ConfigValue::IntArray(v), ValueKind::IntArray) => {
                Some(ParamValue::IntArray(v.clone()))
            }
            (ConfigValue::IntArray(v), ValueKind::RealArray) => Some(ParamValue::RealArray(
                v.iter().map(|&x| x as HypreReal).collect(),
            )),
            (ConfigValue::RealArray(v), ValueKind::RealArray) => {
                Some(ParamValue::RealArray(v.clone()))
            }
            (ConfigValue::IntArray(v), ValueKind::IntPair) => match v.as_slice() {
                &[a, b] => Some(ParamValue::IntPair(a, b)),
                _ => None,
            },
            (ConfigValue::IntArray(v), ValueKind::RealInt) => match v.as_slice() {
                &[w, level] => Some(ParamValue::RealInt(w as HypreReal, level)),
                _ => None,
            },
            (ConfigValue::RealArray(v), ValueKind::RealInt) => match v.as_slice() {
                &[w, level] if level.fract() == 0.0 => {
                    Some(ParamValue::RealInt(w, level as HypreInt))
                }
                _ => None,
            },
            (ConfigValue::NestedIntArray(v), ValueKind::NestedIntArray) => {
                Some(ParamValue::NestedIntArray(v.clone()))
            }
            _ => None,
        }
    }
}

impl ParameterConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Build the BoomerAMG parameter set described by the `amg` section.
    pub fn build_amg<H: BoomerAmgSetters + 'static>(&self) -> Result<BoomerAmgParameters<H>> {
        let amg = &self.amg;
        let mut params = match (amg.max_iter, amg.tolerance) {
            (None, None) => BoomerAmgParameters::new(amg.variant),
            (max_iter, tolerance) => BoomerAmgParameters::with_limits(
                max_iter.unwrap_or(DEFAULT_MAX_ITER),
                tolerance.unwrap_or(DEFAULT_TOLERANCE),
                amg.variant,
            ),
        };
        apply_overrides::<H>(&mut params, &amg.overrides)?;
        Ok(params)
    }

    /// Build the outer solver parameter set described by the `solver` section.
    pub fn build_solver<H: KrylovSetters>(&self) -> Result<SolverParameters<H>> {
        let solver = &self.solver;
        let mut params = SolverParameters::new(solver.max_iter, solver.tolerance, solver.kind)?;
        apply_overrides::<H>(&mut params, &solver.overrides)?;
        Ok(params)
    }
}

/// Set each override on `registry`.
///
/// Fails on the first name that is not registered, or whose value cannot
/// be coerced to the shape of the registered value.
pub fn apply_overrides<H>(
    registry: &mut ParameterRegistry<H>,
    overrides: &BTreeMap<String, ConfigValue>,
) -> Result<()> {
    for (name, value) in overrides {
        let kind = registry
            .value(name)
            .map(ParamValue::kind)
            .ok_or_else(|| HypreError::UnknownKey { name: name.clone() })?;

        let coerced = value.coerce(kind).ok_or_else(|| HypreError::TypeMismatch {
            name: name.clone(),
            expected: kind.name(),
            found: value.kind(),
        })?;

        log::debug!("config override {} = {:?}", name, coerced);
        registry.set(name, coerced)?;
    }
    Ok(())
}
