//! Curated BoomerAMG parameter sets

use super::keys;
use super::options::{AmgVariant, CoarsenType, CycleType, InterpType, RelaxType, Restriction};
use super::relaxation::set_relaxation_order;
use crate::backend::{BoomerAmgSetters, Chooser, HypreInt, HypreReal};
use crate::parameters::{LibrarySetter, ParamValue, Parameter, ParameterRegistry};
use std::ops::{Deref, DerefMut};

/// Default hypre print level
pub const DEFAULT_PRINT_LEVEL: HypreInt = 100;
/// Default maximum number of AMG iterations
pub const DEFAULT_MAX_ITER: HypreInt = 50;
/// Default convergence tolerance
pub const DEFAULT_TOLERANCE: HypreReal = 1e-10;

/// BoomerAMG parameters, pre-populated for one [`AmgVariant`].
///
/// Derefs to the underlying [`ParameterRegistry`], so every default can be
/// changed with `set`, dropped with `remove`, or complemented with `add`:
///
/// ```ignore
/// let mut params = BoomerAmgParameters::<Handle>::new(AmgVariant::Classical);
/// params.set("coarsen_type", CoarsenType::Hmis)?;
/// params.set("max_iter", 200)?;
/// ```
///
/// | key | classical | AIR |
/// |---|---|---|
/// | `print_level` | 100 | 100 |
/// | `coarsen_type` | 6 (Falgout) | 6 (Falgout) |
/// | `relax_type` | 0 (Jacobi) | 3 (hybrid GS forward) |
/// | `num_sweeps` | 1 | 1 |
/// | `max_iter` | 50 | 50 |
/// | `tolerance` | 1e-10 | 1e-10 |
/// | `interp_type` | | 100 (pointwise) |
/// | `restriction` | | 2 (distance-2 LAIR) |
/// | `max_levels` | | 40 |
/// | `cycle_type` | | 1 (V) |
/// | `sabs_flag` | | 1 |
/// | `strength_tol_c` | | 0.25 |
/// | `strength_tol_r` | | 0.01 |
/// | `filter_a_tol` | | 1e-4 |
/// | `post_filter_r` | | 0.0 |
/// | `relaxation_order` | | ("A", "FFC") |
pub struct BoomerAmgParameters<H> {
    registry: ParameterRegistry<H>,
    variant: AmgVariant,
}

impl<H: BoomerAmgSetters + 'static> BoomerAmgParameters<H> {
    /// Load the default set for `variant`.
    ///
    /// The registry targets the preconditioner handle; the solver facades
    /// apply it to whichever handle their role requires.
    pub fn new(variant: AmgVariant) -> Self {
        let mut registry = ParameterRegistry::new(Chooser::Preconditioner);
        match variant {
            AmgVariant::Classical => {
                insert_common(&mut registry, RelaxType::Jacobi);
            }
            AmgVariant::Air => {
                insert_common(&mut registry, RelaxType::HybridForward);
                insert_air(&mut registry);
            }
            AmgVariant::None => {}
        }

        log::debug!(
            "BoomerAMG {:?} defaults: {} parameters",
            variant,
            registry.len()
        );

        Self { registry, variant }
    }

    /// Load the default set for `variant` with the given iteration limit and tolerance.
    ///
    /// With [`AmgVariant::None`] the two parameters are added to the empty set.
    pub fn with_limits(max_iter: HypreInt, tolerance: HypreReal, variant: AmgVariant) -> Self {
        let mut params = Self::new(variant);
        params.registry.insert(
            keys::MAX_ITER,
            Parameter::library(max_iter, LibrarySetter::Int(H::set_max_iter)),
        );
        params.registry.insert(
            keys::TOLERANCE,
            Parameter::library(tolerance, LibrarySetter::Real(H::set_tol)),
        );
        params
    }
}

impl<H> BoomerAmgParameters<H> {
    /// Default set this instance was built from
    pub fn variant(&self) -> AmgVariant {
        self.variant
    }

    pub fn registry(&self) -> &ParameterRegistry<H> {
        &self.registry
    }

    pub fn into_registry(self) -> ParameterRegistry<H> {
        self.registry
    }
}

impl<H> Clone for BoomerAmgParameters<H> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            variant: self.variant,
        }
    }
}

impl<H> std::fmt::Debug for BoomerAmgParameters<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoomerAmgParameters")
            .field("variant", &self.variant)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<H> Deref for BoomerAmgParameters<H> {
    type Target = ParameterRegistry<H>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl<H> DerefMut for BoomerAmgParameters<H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}

fn insert_common<H: BoomerAmgSetters>(registry: &mut ParameterRegistry<H>, relax: RelaxType) {
    let defaults: [(&str, ParamValue, LibrarySetter<H>); 6] = [
        (
            keys::PRINT_LEVEL,
            DEFAULT_PRINT_LEVEL.into(),
            LibrarySetter::Int(H::set_print_level),
        ),
        (
            keys::COARSEN_TYPE,
            CoarsenType::Falgout.into(),
            LibrarySetter::Int(H::set_coarsen_type),
        ),
        (keys::RELAX_TYPE, relax.into(), LibrarySetter::Int(H::set_relax_type)),
        (keys::NUM_SWEEPS, 1.into(), LibrarySetter::Int(H::set_num_sweeps)),
        (
            keys::MAX_ITER,
            DEFAULT_MAX_ITER.into(),
            LibrarySetter::Int(H::set_max_iter),
        ),
        (
            keys::TOLERANCE,
            DEFAULT_TOLERANCE.into(),
            LibrarySetter::Real(H::set_tol),
        ),
    ];
    insert_all(registry, defaults);
}

fn insert_air<H: BoomerAmgSetters + 'static>(registry: &mut ParameterRegistry<H>) {
    let defaults: [(&str, ParamValue, LibrarySetter<H>); 9] = [
        (
            keys::INTERP_TYPE,
            InterpType::Pointwise.into(),
            LibrarySetter::Int(H::set_interp_type),
        ),
        (
            keys::RESTRICTION,
            Restriction::AirDistance2.into(),
            LibrarySetter::Int(H::set_restriction),
        ),
        (keys::MAX_LEVELS, 40.into(), LibrarySetter::Int(H::set_max_levels)),
        (
            keys::CYCLE_TYPE,
            CycleType::VCycle.into(),
            LibrarySetter::Int(H::set_cycle_type),
        ),
        (keys::SABS_FLAG, 1.into(), LibrarySetter::Int(H::set_sabs)),
        (
            keys::STRENGTH_TOL_C,
            0.25.into(),
            LibrarySetter::Real(H::set_strong_threshold),
        ),
        (
            keys::STRENGTH_TOL_R,
            0.01.into(),
            LibrarySetter::Real(H::set_strong_threshold_r),
        ),
        (
            keys::FILTER_A_TOL,
            1e-4.into(),
            LibrarySetter::Real(H::set_a_drop_tol),
        ),
        (
            keys::POST_FILTER_R,
            0.0.into(),
            LibrarySetter::Real(H::set_filter_threshold_r),
        ),
    ];
    insert_all(registry, defaults);

    registry.insert(
        keys::RELAXATION_ORDER,
        Parameter::custom(("A", "FFC"), set_relaxation_order::<H>),
    );
}

fn insert_all<H, const N: usize>(
    registry: &mut ParameterRegistry<H>,
    defaults: [(&str, ParamValue, LibrarySetter<H>); N],
) {
    for (name, value, setter) in defaults {
        registry.insert(name, Parameter::library(value, setter));
    }
}
