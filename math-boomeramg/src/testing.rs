//! Recording doubles for the hypre interface
//!
//! [`RecordingHandle`] implements every setter trait by logging a
//! [`SetterCall`] instead of configuring a real solver. [`RecordingContext`]
//! wraps two of them and plays the role of a solve context with dense
//! `ndarray` matrix and vectors. Both are used by this crate's tests and are
//! handy for downstream crates that want to check a parameter setup without
//! linking hypre.

use crate::backend::{
    BoomerAmgSetters, Chooser, HypreInt, HypreReal, KrylovSetters, ParameterTarget, SolveContext,
    SolverKind, check_code,
};
use crate::error::{HypreError, Result};
use ndarray::{Array1, Array2};

/// One recorded hypre setter call.
#[derive(Debug, Clone, PartialEq)]
pub enum SetterCall {
    PrintLevel(HypreInt),
    CoarsenType(HypreInt),
    RelaxType(HypreInt),
    NumSweeps(HypreInt),
    MaxIter(HypreInt),
    Tol(HypreReal),
    InterpType(HypreInt),
    MaxLevels(HypreInt),
    CycleType(HypreInt),
    Sabs(HypreInt),
    Restriction(HypreInt),
    StrongThreshold(HypreReal),
    StrongThresholdR(HypreReal),
    ADropTol(HypreReal),
    FilterThresholdR(HypreReal),
    CycleNumSweeps { sweeps: HypreInt, k: HypreInt },
    CycleRelaxType { relax_type: HypreInt, k: HypreInt },
    LevelRelaxWt { weight: HypreReal, level: HypreInt },
    DofFunc(Vec<HypreInt>),
    RelaxWeight(Vec<HypreReal>),
    GridRelaxPoints(Vec<Vec<HypreInt>>),
    Krylov {
        solver: SolverKind,
        call: KrylovCall,
    },
}

/// Setter calls shared by the Krylov solvers.
#[derive(Debug, Clone, PartialEq)]
pub enum KrylovCall {
    MaxIter(HypreInt),
    Tol(HypreReal),
    KDim(HypreInt),
}

/// Solver handle that records every setter call.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandle {
    /// Calls in the order they were made
    pub calls: Vec<SetterCall>,
    /// When set, every call is still recorded but returns this error code
    pub fail_with: Option<HypreInt>,
}

impl RecordingHandle {
    fn record(&mut self, call: SetterCall) -> HypreInt {
        self.calls.push(call);
        self.fail_with.unwrap_or(0)
    }

    fn krylov(&mut self, solver: SolverKind, call: KrylovCall) -> HypreInt {
        self.record(SetterCall::Krylov { solver, call })
    }
}

impl BoomerAmgSetters for RecordingHandle {
    fn set_print_level(&mut self, level: HypreInt) -> HypreInt {
        self.record(SetterCall::PrintLevel(level))
    }

    fn set_coarsen_type(&mut self, coarsen_type: HypreInt) -> HypreInt {
        self.record(SetterCall::CoarsenType(coarsen_type))
    }

    fn set_relax_type(&mut self, relax_type: HypreInt) -> HypreInt {
        self.record(SetterCall::RelaxType(relax_type))
    }

    fn set_num_sweeps(&mut self, num_sweeps: HypreInt) -> HypreInt {
        self.record(SetterCall::NumSweeps(num_sweeps))
    }

    fn set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt {
        self.record(SetterCall::MaxIter(max_iter))
    }

    fn set_tol(&mut self, tol: HypreReal) -> HypreInt {
        self.record(SetterCall::Tol(tol))
    }

    fn set_interp_type(&mut self, interp_type: HypreInt) -> HypreInt {
        self.record(SetterCall::InterpType(interp_type))
    }

    fn set_max_levels(&mut self, max_levels: HypreInt) -> HypreInt {
        self.record(SetterCall::MaxLevels(max_levels))
    }

    fn set_cycle_type(&mut self, cycle_type: HypreInt) -> HypreInt {
        self.record(SetterCall::CycleType(cycle_type))
    }

    fn set_sabs(&mut self, sabs: HypreInt) -> HypreInt {
        self.record(SetterCall::Sabs(sabs))
    }

    fn set_restriction(&mut self, restr_par: HypreInt) -> HypreInt {
        self.record(SetterCall::Restriction(restr_par))
    }

    fn set_strong_threshold(&mut self, threshold: HypreReal) -> HypreInt {
        self.record(SetterCall::StrongThreshold(threshold))
    }

    fn set_strong_threshold_r(&mut self, threshold: HypreReal) -> HypreInt {
        self.record(SetterCall::StrongThresholdR(threshold))
    }

    fn set_a_drop_tol(&mut self, tol: HypreReal) -> HypreInt {
        self.record(SetterCall::ADropTol(tol))
    }

    fn set_filter_threshold_r(&mut self, threshold: HypreReal) -> HypreInt {
        self.record(SetterCall::FilterThresholdR(threshold))
    }

    fn set_cycle_num_sweeps(&mut self, num_sweeps: HypreInt, k: HypreInt) -> HypreInt {
        self.record(SetterCall::CycleNumSweeps {
            sweeps: num_sweeps,
            k,
        })
    }

    fn set_cycle_relax_type(&mut self, relax_type: HypreInt, k: HypreInt) -> HypreInt {
        self.record(SetterCall::CycleRelaxType { relax_type, k })
    }

    fn set_level_relax_wt(&mut self, weight: HypreReal, level: HypreInt) -> HypreInt {
        self.record(SetterCall::LevelRelaxWt { weight, level })
    }

    fn set_dof_func(&mut self, dof_func: &[HypreInt]) -> HypreInt {
        self.record(SetterCall::DofFunc(dof_func.to_vec()))
    }

    fn set_relax_weight(&mut self, weights: &[HypreReal]) -> HypreInt {
        self.record(SetterCall::RelaxWeight(weights.to_vec()))
    }

    fn set_grid_relax_points(&mut self, points: &[Vec<HypreInt>]) -> HypreInt {
        self.record(SetterCall::GridRelaxPoints(points.to_vec()))
    }
}

impl KrylovSetters for RecordingHandle {
    fn pcg_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt {
        self.krylov(SolverKind::Pcg, KrylovCall::MaxIter(max_iter))
    }

    fn pcg_set_tol(&mut self, tol: HypreReal) -> HypreInt {
        self.krylov(SolverKind::Pcg, KrylovCall::Tol(tol))
    }

    fn gmres_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt {
        self.krylov(SolverKind::Gmres, KrylovCall::MaxIter(max_iter))
    }

    fn gmres_set_tol(&mut self, tol: HypreReal) -> HypreInt {
        self.krylov(SolverKind::Gmres, KrylovCall::Tol(tol))
    }

    fn gmres_set_k_dim(&mut self, k_dim: HypreInt) -> HypreInt {
        self.krylov(SolverKind::Gmres, KrylovCall::KDim(k_dim))
    }

    fn flex_gmres_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt {
        self.krylov(SolverKind::FlexGmres, KrylovCall::MaxIter(max_iter))
    }

    fn flex_gmres_set_tol(&mut self, tol: HypreReal) -> HypreInt {
        self.krylov(SolverKind::FlexGmres, KrylovCall::Tol(tol))
    }

    fn lgmres_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt {
        self.krylov(SolverKind::Lgmres, KrylovCall::MaxIter(max_iter))
    }

    fn lgmres_set_tol(&mut self, tol: HypreReal) -> HypreInt {
        self.krylov(SolverKind::Lgmres, KrylovCall::Tol(tol))
    }

    fn bicgstab_set_max_iter(&mut self, max_iter: HypreInt) -> HypreInt {
        self.krylov(SolverKind::BiCgStab, KrylovCall::MaxIter(max_iter))
    }

    fn bicgstab_set_tol(&mut self, tol: HypreReal) -> HypreInt {
        self.krylov(SolverKind::BiCgStab, KrylovCall::Tol(tol))
    }
}

/// A solver and a preconditioner handle, without any solve capability.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    pub solver: RecordingHandle,
    pub preconditioner: RecordingHandle,
}

impl RecordingTarget {
    pub fn handle(&self, chooser: Chooser) -> &RecordingHandle {
        match chooser {
            Chooser::Solver => &self.solver,
            Chooser::Preconditioner => &self.preconditioner,
        }
    }

    fn handle_mut(&mut self, chooser: Chooser) -> &mut RecordingHandle {
        match chooser {
            Chooser::Solver => &mut self.solver,
            Chooser::Preconditioner => &mut self.preconditioner,
        }
    }
}

impl ParameterTarget<RecordingHandle> for RecordingTarget {
    fn set_parameter(
        &mut self,
        chooser: Chooser,
        setter: &mut dyn FnMut(&mut RecordingHandle) -> HypreInt,
    ) -> Result<()> {
        check_code(setter(self.handle_mut(chooser)), chooser)
    }
}

/// Observable steps of a [`RecordingContext`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextEvent {
    SelectSolver(Chooser, SolverKind),
    UsePreconditioner(bool),
    SetParameter(Chooser, SetterCall),
    Solve { rows: usize },
}

/// What a recording solve reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub solver: Option<SolverKind>,
    pub preconditioner: Option<SolverKind>,
    pub preconditioned: bool,
    pub rows: usize,
}

/// Solve context that records everything and solves nothing.
///
/// `solve` checks the dimensions of `A`, `x` and `b` and leaves `x`
/// untouched. Set `solve_error` to make it fail with a backend error.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    pub target: RecordingTarget,
    pub events: Vec<ContextEvent>,
    pub solver: Option<SolverKind>,
    pub preconditioner: Option<SolverKind>,
    pub preconditioned: bool,
    pub solve_error: Option<HypreInt>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setter calls made on one handle, in order
    pub fn calls(&self, chooser: Chooser) -> &[SetterCall] {
        &self.target.handle(chooser).calls
    }
}

impl ParameterTarget<RecordingHandle> for RecordingContext {
    fn set_parameter(
        &mut self,
        chooser: Chooser,
        setter: &mut dyn FnMut(&mut RecordingHandle) -> HypreInt,
    ) -> Result<()> {
        let before = self.target.handle(chooser).calls.len();
        let result = self.target.set_parameter(chooser, setter);
        for call in &self.target.handle(chooser).calls[before..] {
            self.events.push(ContextEvent::SetParameter(chooser, call.clone()));
        }
        result
    }
}

impl SolveContext<RecordingHandle> for RecordingContext {
    type Matrix = Array2<f64>;
    type Vector = Array1<f64>;
    type Output = SolveReport;

    fn select_solver(&mut self, chooser: Chooser, kind: SolverKind) -> Result<()> {
        self.events.push(ContextEvent::SelectSolver(chooser, kind));
        match chooser {
            Chooser::Solver => self.solver = Some(kind),
            Chooser::Preconditioner => self.preconditioner = Some(kind),
        }
        Ok(())
    }

    fn use_preconditioner(&mut self, enabled: bool) -> Result<()> {
        self.events.push(ContextEvent::UsePreconditioner(enabled));
        self.preconditioned = enabled;
        Ok(())
    }

    fn solve(
        &mut self,
        a: &Array2<f64>,
        x: &mut Array1<f64>,
        b: &Array1<f64>,
    ) -> Result<SolveReport> {
        let rows = a.nrows();
        if a.ncols() != rows {
            return Err(HypreError::DimensionMismatch {
                expected: rows,
                got: a.ncols(),
            });
        }
        for len in [x.len(), b.len()] {
            if len != rows {
                return Err(HypreError::DimensionMismatch {
                    expected: rows,
                    got: len,
                });
            }
        }

        self.events.push(ContextEvent::Solve { rows });
        if let Some(code) = self.solve_error {
            return Err(HypreError::Backend {
                chooser: Chooser::Solver,
                code,
            });
        }

        Ok(SolveReport {
            solver: self.solver,
            preconditioner: self.preconditioner,
            preconditioned: self.preconditioned,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_handle_fail_with() {
        let mut handle = RecordingHandle {
            fail_with: Some(2),
            ..Default::default()
        };
        assert_eq!(handle.set_max_levels(10), 2);
        assert_eq!(handle.calls, vec![SetterCall::MaxLevels(10)]);
    }

    #[test]
    fn test_context_routes_by_chooser() {
        let mut ctx = RecordingContext::new();
        ctx.set_parameter(Chooser::Preconditioner, &mut |h| h.set_sabs(1))
            .unwrap();
        ctx.set_parameter(Chooser::Solver, &mut |h| h.gmres_set_k_dim(30))
            .unwrap();

        assert_eq!(ctx.calls(Chooser::Preconditioner), &[SetterCall::Sabs(1)]);
        assert_eq!(
            ctx.calls(Chooser::Solver),
            &[SetterCall::Krylov {
                solver: SolverKind::Gmres,
                call: KrylovCall::KDim(30)
            }]
        );
        assert_eq!(ctx.events.len(), 2);
    }

    #[test]
    fn test_solve_checks_dimensions() {
        let mut ctx = RecordingContext::new();
        let a = Array2::<f64>::eye(3);
        let mut x = Array1::<f64>::zeros(3);
        let b = Array1::<f64>::ones(2);

        let err = ctx.solve(&a, &mut x, &b).unwrap_err();
        assert!(matches!(
            err,
            HypreError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        ));
        assert!(ctx.events.is_empty());
    }
}
