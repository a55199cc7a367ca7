//! Interface to the external hypre library
//!
//! This module defines the seam between the parameter layer and hypre:
//! - [`BoomerAmgSetters`] / [`KrylovSetters`]: the hypre setter entry points,
//!   expressed as methods on the solver handle type
//! - [`ParameterTarget`]: forwards a setter call to the solver or preconditioner handle
//! - [`SolveContext`]: owns the handles, selects solvers and runs the solve
//!
//! Nothing here implements multigrid or Krylov numerics. Matrix, vector and
//! solve are whatever the implementing wrapper provides.

use crate::error::{HypreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// hypre integer type (`HYPRE_Int`)
pub type HypreInt = i32;

/// hypre real type (`HYPRE_Real`)
pub type HypreReal = f64;

/// Selects which handle of a solve context a call is made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chooser {
    /// The outer solver handle
    Solver,
    /// The preconditioner handle
    Preconditioner,
}

impl fmt::Display for Chooser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chooser::Solver => f.write_str("solver"),
            Chooser::Preconditioner => f.write_str("preconditioner"),
        }
    }
}

/// hypre solvers that a solve context can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// BoomerAMG, as solver or preconditioner
    BoomerAmg,
    /// Preconditioned conjugate gradient (SPD systems)
    #[default]
    Pcg,
    /// Restarted GMRES
    Gmres,
    /// Flexible GMRES (for variable preconditioners)
    FlexGmres,
    /// LGMRES
    Lgmres,
    /// BiCGSTAB
    BiCgStab,
}

impl SolverKind {
    /// Returns `true` for the Krylov methods usable as an outer solver.
    pub fn is_krylov(&self) -> bool {
        !matches!(self, SolverKind::BoomerAmg)
    }
}

/// Map a hypre return code to a `Result`.
#[inline]
pub fn check_code(code: HypreInt, chooser: Chooser) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(HypreError::Backend { chooser, code })
    }
}

/// BoomerAMG setter entry points (`HYPRE_BoomerAMGSet*`).
///
/// Each method maps one-to-one onto a hypre function and returns its error
/// code. Because they take `&mut self` first, `H::set_max_iter` coerces to
/// the function pointer stored in a [`LibrarySetter`](crate::parameters::LibrarySetter).
pub trait BoomerAmgSetters {
    /// `HYPRE_BoomerAMGSetPrintLevel`
    fn set_print_level(&mut self, level: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetCoarsenType`
    fn set_coarsen_type(&mut self, coarsen_type: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetRelaxType`
    fn set_relax_type(&mut self, relax_type: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetNumSweeps`
    fn set_num_sweeps(&mut self, num_sweeps: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetMaxIter`
    fn set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetTol`
    fn set_tol(&mut self, tol: HypreReal) -> HypreInt;

    /// `HYPRE_BoomerAMGSetInterpType`
    fn set_interp_type(&mut self, interp_type: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetMaxLevels`
    fn set_max_levels(&mut self, max_levels: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetCycleType`
    fn set_cycle_type(&mut self, cycle_type: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetSabs`
    fn set_sabs(&mut self, sabs: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetRestriction`
    fn set_restriction(&mut self, restr_par: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetStrongThreshold`
    fn set_strong_threshold(&mut self, threshold: HypreReal) -> HypreInt;

    /// `HYPRE_BoomerAMGSetStrongThresholdR`
    fn set_strong_threshold_r(&mut self, threshold: HypreReal) -> HypreInt;

    /// `HYPRE_BoomerAMGSetADropTol`
    fn set_a_drop_tol(&mut self, tol: HypreReal) -> HypreInt;

    /// `HYPRE_BoomerAMGSetFilterThresholdR`
    fn set_filter_threshold_r(&mut self, threshold: HypreReal) -> HypreInt;

    /// `HYPRE_BoomerAMGSetCycleNumSweeps`; `k` is 1 (down), 2 (up) or 3 (coarsest)
    fn set_cycle_num_sweeps(&mut self, num_sweeps: HypreInt, k: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetCycleRelaxType`
    fn set_cycle_relax_type(&mut self, relax_type: HypreInt, k: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetLevelRelaxWt`
    fn set_level_relax_wt(&mut self, weight: HypreReal, level: HypreInt) -> HypreInt;

    /// `HYPRE_BoomerAMGSetDofFunc`
    fn set_dof_func(&mut self, dof_func: &[HypreInt]) -> HypreInt;

    /// `HYPRE_BoomerAMGSetRelaxWeight`
    fn set_relax_weight(&mut self, weights: &[HypreReal]) -> HypreInt;

    /// `HYPRE_BoomerAMGSetGridRelaxPoints`
    fn set_grid_relax_points(&mut self, points: &[Vec<HypreInt>]) -> HypreInt;
}

/// Setter entry points of the hypre ParCSR Krylov solvers.
pub trait KrylovSetters {
    /// `HYPRE_ParCSRPCGSetMaxIter`
    fn pcg_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt;
    /// `HYPRE_ParCSRPCGSetTol`
    fn pcg_set_tol(&mut self, tol: HypreReal) -> HypreInt;

    /// `HYPRE_ParCSRGMRESSetMaxIter`
    fn gmres_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt;
    /// `HYPRE_ParCSRGMRESSetTol`
    fn gmres_set_tol(&mut self, tol: HypreReal) -> HypreInt;
    /// `HYPRE_ParCSRGMRESSetKDim`
    fn gmres_set_k_dim(&mut self, k_dim: HypreInt) -> HypreInt;

    /// `HYPRE_ParCSRFlexGMRESSetMaxIter`
    fn flex_gmres_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt;
    /// `HYPRE_ParCSRFlexGMRESSetTol`
    fn flex_gmres_set_tol(&mut self, tol: HypreReal) -> HypreInt;

    /// `HYPRE_ParCSRLGMRESSetMaxIter`
    fn lgmres_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt;
    /// `HYPRE_ParCSRLGMRESSetTol`
    fn lgmres_set_tol(&mut self, tol: HypreReal) -> HypreInt;

    /// `HYPRE_ParCSRBiCGSTABSetMaxIter`
    fn bicgstab_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt;
    /// `HYPRE_ParCSRBiCGSTABSetTol`
    fn bicgstab_set_tol(&mut self, tol: HypreReal) -> HypreInt;
}

/// Something that can forward a setter call to a solver or preconditioner handle.
///
/// The setter closure receives the selected handle and returns the hypre
/// error code, which implementors turn into a `Result` (see [`check_code`]).
pub trait ParameterTarget<H> {
    /// Invoke `setter` on the handle selected by `chooser`.
    fn set_parameter(
        &mut self,
        chooser: Chooser,
        setter: &mut dyn FnMut(&mut H) -> HypreInt,
    ) -> Result<()>;
}

/// A hypre solve context wrapping one solver and one preconditioner handle.
///
/// The matrix and vector types are the linear-algebra wrapper's distributed
/// types and stay opaque to this crate.
pub trait SolveContext<H>: ParameterTarget<H> {
    /// System matrix type
    type Matrix;
    /// Solution / right-hand side vector type
    type Vector;
    /// Whatever the solve reports back (iteration counts, residuals, ...)
    type Output;

    /// Create the hypre object of the given kind on the selected handle.
    fn select_solver(&mut self, chooser: Chooser, kind: SolverKind) -> Result<()>;

    /// Enable or disable use of the preconditioner handle in the solve.
    fn use_preconditioner(&mut self, enabled: bool) -> Result<()>;

    /// Solve `A x = b`.
    fn solve(
        &mut self,
        a: &Self::Matrix,
        x: &mut Self::Vector,
        b: &Self::Vector,
    ) -> Result<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_code() {
        assert!(check_code(0, Chooser::Solver).is_ok());

        let err = check_code(3, Chooser::Preconditioner).unwrap_err();
        match err {
            HypreError::Backend { chooser, code } => {
                assert_eq!(chooser, Chooser::Preconditioner);
                assert_eq!(code, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_solver_kind() {
        assert_eq!(SolverKind::default(), SolverKind::Pcg);
        assert!(SolverKind::Gmres.is_krylov());
        assert!(!SolverKind::BoomerAmg.is_krylov());
    }

    #[test]
    fn test_solver_kind_names() {
        let kind: SolverKind = serde_json::from_str("\"bicgstab\"").unwrap();
        assert_eq!(kind, SolverKind::BiCgStab);
        assert_eq!(
            serde_json::to_string(&SolverKind::FlexGmres).unwrap(),
            "\"flexgmres\""
        );
    }

    #[test]
    fn test_chooser_display() {
        assert_eq!(Chooser::Solver.to_string(), "solver");
        assert_eq!(Chooser::Preconditioner.to_string(), "preconditioner");
    }
}
