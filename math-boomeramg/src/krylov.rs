//! Outer Krylov solver parameters
//!
//! When BoomerAMG is used as a preconditioner, the outer hypre solver (PCG,
//! GMRES, ...) needs its own iteration limit and tolerance. Each solver has
//! its own hypre setters, so [`SolverParameters`] binds the two parameters to
//! the entry points of the selected [`SolverKind`].

use crate::backend::{Chooser, HypreInt, HypreReal, KrylovSetters, SolverKind};
use crate::error::{HypreError, Result};
use crate::parameters::{LibrarySetter, Parameter, ParameterRegistry};
use std::ops::{Deref, DerefMut};

/// Default iteration limit of the outer solver
pub const DEFAULT_SOLVER_MAX_ITER: HypreInt = 1000;
/// Default relative tolerance of the outer solver
pub const DEFAULT_SOLVER_TOLERANCE: HypreReal = 1e-8;

/// Parameter set of a hypre Krylov solver.
pub struct SolverParameters<H> {
    registry: ParameterRegistry<H>,
    kind: SolverKind,
}

impl<H: KrylovSetters> SolverParameters<H> {
    /// Parameters for `kind` with the given iteration limit and tolerance.
    ///
    /// Fails with `UnsupportedSolver` for [`SolverKind::BoomerAmg`]; use
    /// `BoomerAmgParameters` for that.
    pub fn new(max_iter: HypreInt, tolerance: HypreReal, kind: SolverKind) -> Result<Self> {
        let (set_max_iter, set_tol): (
            fn(&mut H, HypreInt) -> HypreInt,
            fn(&mut H, HypreReal) -> HypreInt,
        ) = match kind {
            SolverKind::Pcg => (H::pcg_set_max_iter, H::pcg_set_tol),
            SolverKind::Gmres => (H::gmres_set_max_iter, H::gmres_set_tol),
            SolverKind::FlexGmres => (H::flex_gmres_set_max_iter, H::flex_gmres_set_tol),
            SolverKind::Lgmres => (H::lgmres_set_max_iter, H::lgmres_set_tol),
            SolverKind::BiCgStab => (H::bicgstab_set_max_iter, H::bicgstab_set_tol),
            SolverKind::BoomerAmg => {
                return Err(HypreError::UnsupportedSolver {
                    kind,
                    role: "an outer Krylov solver",
                });
            }
        };

        Ok(Self {
            registry: Self::bound(max_iter, tolerance, set_max_iter, set_tol),
            kind,
        })
    }

    /// PCG with the default limit and tolerance
    pub fn pcg() -> Self {
        Self {
            registry: Self::bound(
                DEFAULT_SOLVER_MAX_ITER,
                DEFAULT_SOLVER_TOLERANCE,
                H::pcg_set_max_iter,
                H::pcg_set_tol,
            ),
            kind: SolverKind::Pcg,
        }
    }

    fn bound(
        max_iter: HypreInt,
        tolerance: HypreReal,
        set_max_iter: fn(&mut H, HypreInt) -> HypreInt,
        set_tol: fn(&mut H, HypreReal) -> HypreInt,
    ) -> ParameterRegistry<H> {
        let mut registry = ParameterRegistry::new(Chooser::Solver);
        registry.insert(
            keys::MAX_ITER,
            Parameter::library(max_iter, LibrarySetter::Int(set_max_iter)),
        );
        registry.insert(
            keys::TOLERANCE,
            Parameter::library(tolerance, LibrarySetter::Real(set_tol)),
        );
        registry
    }
}

impl<H> SolverParameters<H> {
    /// The Krylov method these parameters belong to
    pub fn solver_kind(&self) -> SolverKind {
        self.kind
    }

    pub fn registry(&self) -> &ParameterRegistry<H> {
        &self.registry
    }
}

impl<H> Clone for SolverParameters<H> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            kind: self.kind,
        }
    }
}

impl<H> std::fmt::Debug for SolverParameters<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverParameters")
            .field("kind", &self.kind)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<H> Deref for SolverParameters<H> {
    type Target = ParameterRegistry<H>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl<H> DerefMut for SolverParameters<H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.registry
    }
}

/// Parameter names of the outer solver
pub mod keys {
    pub const MAX_ITER: &str = "max_iter";
    pub const TOLERANCE: &str = "tolerance";
}
