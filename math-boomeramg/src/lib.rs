//! Typed parameter registry and solve facades for hypre BoomerAMG
//!
//! This crate configures the hypre BoomerAMG algebraic multigrid solver and
//! the hypre Krylov solvers through a wrapper layer. It does not implement any
//! numerics: matrices, vectors and the solve itself come from the backend.
//!
//! # Features
//!
//! - **Parameter registry**: name → (value, setter) map applied to a solver or
//!   preconditioner handle in key order
//! - **Default sets**: classical AMG and AIR (approximate ideal restriction)
//! - **Relaxation order**: `("A", "FFC")`-style F/C relaxation schedules
//! - **Solve facades**: BoomerAMG standalone, Krylov + BoomerAMG, plain Krylov
//! - **JSON configuration**: variant, limits and per-parameter overrides
//!
//! # Example
//!
//! ```ignore
//! use math_audio_boomeramg::{AmgVariant, BoomerAmgParameters, SolverBoomerAmg};
//!
//! let mut params = BoomerAmgParameters::<Handle>::new(AmgVariant::Air);
//! params.set("max_iter", 100)?;
//! params.set("relaxation_order", ("FFC", "CF"))?;
//!
//! let result = SolverBoomerAmg::new(&params).solve(&mut context, &a, &mut x, &b)?;
//! ```

pub mod backend;
pub mod boomeramg;
pub mod config;
pub mod error;
pub mod krylov;
pub mod parameters;
pub mod solver;
pub mod testing;

// Re-export main types
pub use backend::{
    BoomerAmgSetters, Chooser, HypreInt, HypreReal, KrylovSetters, ParameterTarget, SolveContext,
    SolverKind,
};
pub use error::{HypreError, Result};
pub use parameters::{
    CustomSetter, LibrarySetter, ParamValue, Parameter, ParameterRegistry, Setter, ValueKind,
};

// Re-export default sets and options
pub use boomeramg::{
    AmgVariant, BoomerAmgParameters, CoarsenType, CycleType, InterpType, RelaxType,
    RelaxationOrder, Restriction,
};
pub use krylov::SolverParameters;

// Re-export facades
pub use config::{ConfigValue, ParameterConfig};
pub use solver::{BoomerAmgPreconditionedSolver, KrylovSolver, SolverBoomerAmg};
