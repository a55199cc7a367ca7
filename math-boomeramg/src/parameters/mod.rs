//! Typed hypre parameters
//!
//! A [`ParameterRegistry`] maps parameter names to a [`Parameter`]: a
//! [`ParamValue`] plus the [`Setter`] that pushes it into hypre. Setters are
//! either direct hypre entry points ([`LibrarySetter`]) or custom functions
//! ([`CustomSetter`]) for parameters that need several hypre calls.

mod registry;
mod setter;
mod value;

pub use registry::ParameterRegistry;
pub use setter::{CustomSetter, LibrarySetter, Parameter, Setter};
pub use value::{ParamValue, ValueKind};
