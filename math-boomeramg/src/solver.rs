//! Solve facades
//!
//! Each facade borrows its parameter sets, pushes them into a [`SolveContext`]
//! and hands the system to hypre:
//! - [`SolverBoomerAmg`]: BoomerAMG as a standalone solver
//! - [`BoomerAmgPreconditionedSolver`]: Krylov solver preconditioned by BoomerAMG
//! - [`KrylovSolver`]: Krylov solver without preconditioner
//!
//! Whatever the context's `solve` returns is passed through unchanged.

use crate::backend::{Chooser, SolveContext, SolverKind};
use crate::boomeramg::BoomerAmgParameters;
use crate::error::Result;
use crate::krylov::SolverParameters;

/// BoomerAMG used as the solver.
#[derive(Debug, Clone, Copy)]
pub struct SolverBoomerAmg<'a, H> {
    parameters: &'a BoomerAmgParameters<H>,
}

impl<'a, H> SolverBoomerAmg<'a, H> {
    pub fn new(parameters: &'a BoomerAmgParameters<H>) -> Self {
        Self { parameters }
    }

    /// Solve `A x = b` with BoomerAMG.
    pub fn solve<C: SolveContext<H>>(
        &self,
        context: &mut C,
        a: &C::Matrix,
        x: &mut C::Vector,
        b: &C::Vector,
    ) -> Result<C::Output> {
        context.select_solver(Chooser::Solver, SolverKind::BoomerAmg)?;
        context.use_preconditioner(false)?;
        self.parameters.apply_to(Chooser::Solver, context)?;

        log::info!(
            "BoomerAMG solve ({:?}, {} parameters)",
            self.parameters.variant(),
            self.parameters.len()
        );
        context.solve(a, x, b)
    }
}

/// Krylov solver preconditioned by BoomerAMG.
#[derive(Debug, Clone, Copy)]
pub struct BoomerAmgPreconditionedSolver<'a, H> {
    preconditioner: &'a BoomerAmgParameters<H>,
    solver: &'a SolverParameters<H>,
}

impl<'a, H> BoomerAmgPreconditionedSolver<'a, H> {
    pub fn new(
        preconditioner: &'a BoomerAmgParameters<H>,
        solver: &'a SolverParameters<H>,
    ) -> Self {
        Self {
            preconditioner,
            solver,
        }
    }

    /// Solve `A x = b` with the outer solver, preconditioned by BoomerAMG.
    pub fn solve<C: SolveContext<H>>(
        &self,
        context: &mut C,
        a: &C::Matrix,
        x: &mut C::Vector,
        b: &C::Vector,
    ) -> Result<C::Output> {
        let kind = self.solver.solver_kind();
        context.select_solver(Chooser::Solver, kind)?;
        context.select_solver(Chooser::Preconditioner, SolverKind::BoomerAmg)?;
        context.use_preconditioner(true)?;

        self.solver.apply_to(Chooser::Solver, context)?;
        self.preconditioner.apply_to(Chooser::Preconditioner, context)?;

        log::info!(
            "{:?} solve with BoomerAMG ({:?}) preconditioner",
            kind,
            self.preconditioner.variant()
        );
        context.solve(a, x, b)
    }
}

/// Krylov solver without preconditioner.
#[derive(Debug, Clone, Copy)]
pub struct KrylovSolver<'a, H> {
    solver: &'a SolverParameters<H>,
}

impl<'a, H> KrylovSolver<'a, H> {
    pub fn new(solver: &'a SolverParameters<H>) -> Self {
        Self { solver }
    }

    /// Solve `A x = b` with the configured Krylov method.
    pub fn solve<C: SolveContext<H>>(
        &self,
        context: &mut C,
        a: &C::Matrix,
        x: &mut C::Vector,
        b: &C::Vector,
    ) -> Result<C::Output> {
        let kind = self.solver.solver_kind();
        context.select_solver(Chooser::Solver, kind)?;
        context.use_preconditioner(false)?;
        self.solver.apply_to(Chooser::Solver, context)?;

        log::info!("{:?} solve without preconditioner", kind);
        context.solve(a, x, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boomeramg::AmgVariant;
    use crate::testing::{ContextEvent, KrylovCall, RecordingContext, RecordingHandle, SetterCall};
    use ndarray::{Array1, Array2};

    fn system(n: usize) -> (Array2<f64>, Array1<f64>, Array1<f64>) {
        (Array2::eye(n), Array1::zeros(n), Array1::ones(n))
    }

    #[test]
    fn test_standalone_boomeramg() {
        let params = BoomerAmgParameters::<RecordingHandle>::new(AmgVariant::Classical);
        let (a, mut x, b) = system(4);
        let mut ctx = RecordingContext::new();

        let report = SolverBoomerAmg::new(&params)
            .solve(&mut ctx, &a, &mut x, &b)
            .unwrap();

        assert_eq!(report.solver, Some(SolverKind::BoomerAmg));
        assert!(!report.preconditioned);
        assert_eq!(report.rows, 4);

        assert_eq!(ctx.calls(Chooser::Solver).len(), 6);
        assert!(ctx.calls(Chooser::Preconditioner).is_empty());
        assert_eq!(
            ctx.events.first(),
            Some(&ContextEvent::SelectSolver(
                Chooser::Solver,
                SolverKind::BoomerAmg
            ))
        );
        assert_eq!(ctx.events.last(), Some(&ContextEvent::Solve { rows: 4 }));
    }

    #[test]
    fn test_preconditioned_solver_applies_both_sets() {
        let amg = BoomerAmgParameters::<RecordingHandle>::new(AmgVariant::Classical);
        let pcg = SolverParameters::<RecordingHandle>::new(200, 1e-7, SolverKind::Pcg).unwrap();
        let (a, mut x, b) = system(3);
        let mut ctx = RecordingContext::new();

        let report = BoomerAmgPreconditionedSolver::new(&amg, &pcg)
            .solve(&mut ctx, &a, &mut x, &b)
            .unwrap();

        assert_eq!(report.solver, Some(SolverKind::Pcg));
        assert_eq!(report.preconditioner, Some(SolverKind::BoomerAmg));
        assert!(report.preconditioned);

        assert_eq!(
            ctx.calls(Chooser::Solver),
            &[
                SetterCall::Krylov {
                    solver: SolverKind::Pcg,
                    call: KrylovCall::MaxIter(200)
                },
                SetterCall::Krylov {
                    solver: SolverKind::Pcg,
                    call: KrylovCall::Tol(1e-7)
                },
            ]
        );
        assert_eq!(ctx.calls(Chooser::Preconditioner).len(), 6);
    }

    #[test]
    fn test_parameters_applied_before_solve() {
        let amg = BoomerAmgParameters::<RecordingHandle>::new(AmgVariant::Air);
        let gmres =
            SolverParameters::<RecordingHandle>::new(100, 1e-6, SolverKind::Gmres).unwrap();
        let (a, mut x, b) = system(2);
        let mut ctx = RecordingContext::new();

        BoomerAmgPreconditionedSolver::new(&amg, &gmres)
            .solve(&mut ctx, &a, &mut x, &b)
            .unwrap();

        let solve_at = ctx
            .events
            .iter()
            .position(|e| matches!(e, ContextEvent::Solve { .. }))
            .unwrap();
        assert_eq!(solve_at, ctx.events.len() - 1);
        assert!(
            ctx.events[..solve_at]
                .iter()
                .any(|e| matches!(e, ContextEvent::SetParameter(Chooser::Preconditioner, _)))
        );
    }

    #[test]
    fn test_krylov_solver_without_preconditioner() {
        let bicg =
            SolverParameters::<RecordingHandle>::new(50, 1e-5, SolverKind::BiCgStab).unwrap();
        let (a, mut x, b) = system(5);
        let mut ctx = RecordingContext::new();

        let report = KrylovSolver::new(&bicg)
            .solve(&mut ctx, &a, &mut x, &b)
            .unwrap();

        assert_eq!(report.solver, Some(SolverKind::BiCgStab));
        assert_eq!(report.preconditioner, None);
        assert!(!report.preconditioned);
        assert_eq!(ctx.calls(Chooser::Solver).len(), 2);
    }

    #[test]
    fn test_solve_error_passes_through() {
        let params = BoomerAmgParameters::<RecordingHandle>::new(AmgVariant::Classical);
        let (a, mut x, b) = system(2);
        let mut ctx = RecordingContext {
            solve_error: Some(1),
            ..Default::default()
        };

        let err = SolverBoomerAmg::new(&params)
            .solve(&mut ctx, &a, &mut x, &b)
            .unwrap_err();
        assert!(err.is_backend_error());
    }

    #[test]
    fn test_type_mismatch_stops_before_solve() {
        let mut params = BoomerAmgParameters::<RecordingHandle>::new(AmgVariant::Classical);
        params.set("relax_type", ("F", "C")).unwrap();
        let (a, mut x, b) = system(2);
        let mut ctx = RecordingContext::new();

        let err = SolverBoomerAmg::new(&params)
            .solve(&mut ctx, &a, &mut x, &b)
            .unwrap_err();

        assert!(err.is_type_mismatch());
        assert!(
            !ctx.events
                .iter()
                .any(|e| matches!(e, ContextEvent::Solve { .. }))
        );
    }
}
