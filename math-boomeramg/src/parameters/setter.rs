//! Setters: how a parameter value reaches the hypre handle

use super::value::ParamValue;
use crate::backend::{Chooser, HypreInt, HypreReal, ParameterTarget};
use crate::error::{HypreError, Result};
use std::fmt;
use std::sync::Arc;

/// Reference to a hypre setter entry point, tagged by its argument signature.
pub enum LibrarySetter<H> {
    /// `(handle, int)`
    Int(fn(&mut H, HypreInt) -> HypreInt),
    /// `(handle, double)`
    Real(fn(&mut H, HypreReal) -> HypreInt),
    /// `(handle, double, int)`
    RealInt(fn(&mut H, HypreReal, HypreInt) -> HypreInt),
    /// `(handle, int, int)`
    IntInt(fn(&mut H, HypreInt, HypreInt) -> HypreInt),
    /// `(handle, int*)`
    IntArray(fn(&mut H, &[HypreInt]) -> HypreInt),
    /// `(handle, double*)`
    RealArray(fn(&mut H, &[HypreReal]) -> HypreInt),
    /// `(handle, int**)`
    NestedIntArray(fn(&mut H, &[Vec<HypreInt>]) -> HypreInt),
}

impl<H> Clone for LibrarySetter<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for LibrarySetter<H> {}

impl<H> fmt::Debug for LibrarySetter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LibrarySetter{}", self.signature())
    }
}

impl<H> LibrarySetter<H> {
    /// Argument signature, used in error messages
    pub fn signature(&self) -> &'static str {
        match self {
            LibrarySetter::Int(_) => "(int)",
            LibrarySetter::Real(_) => "(real)",
            LibrarySetter::RealInt(_) => "(real, int)",
            LibrarySetter::IntInt(_) => "(int, int)",
            LibrarySetter::IntArray(_) => "(int*)",
            LibrarySetter::RealArray(_) => "(real*)",
            LibrarySetter::NestedIntArray(_) => "(int**)",
        }
    }

    /// Call the setter on `handle` with the unpacked `value` and return the
    /// hypre error code.
    ///
    /// Fails with `TypeMismatch` without touching the handle if the value
    /// shape does not match the setter signature. `name` is only used for
    /// error reporting.
    pub fn invoke(&self, name: &str, handle: &mut H, value: &ParamValue) -> Result<HypreInt> {
        let code = match (self, value) {
            (LibrarySetter::Int(f), ParamValue::Int(v)) => f(handle, *v),
            (LibrarySetter::Real(f), ParamValue::Real(v)) => f(handle, *v),
            (LibrarySetter::RealInt(f), ParamValue::RealInt(a, b)) => f(handle, *a, *b),
            (LibrarySetter::IntInt(f), ParamValue::IntPair(a, b)) => f(handle, *a, *b),
            (LibrarySetter::IntArray(f), ParamValue::IntArray(v)) => f(handle, v.as_slice()),
            (LibrarySetter::RealArray(f), ParamValue::RealArray(v)) => f(handle, v.as_slice()),
            (LibrarySetter::NestedIntArray(f), ParamValue::NestedIntArray(v)) => {
                f(handle, v.as_slice())
            }
            // Listed per variant so a new setter signature fails to compile here.
            (
                LibrarySetter::Int(_)
                | LibrarySetter::Real(_)
                | LibrarySetter::RealInt(_)
                | LibrarySetter::IntInt(_)
                | LibrarySetter::IntArray(_)
                | LibrarySetter::RealArray(_)
                | LibrarySetter::NestedIntArray(_),
                _,
            ) => {
                return Err(HypreError::TypeMismatch {
                    name: name.to_string(),
                    expected: self.signature(),
                    found: value.kind(),
                });
            }
        };
        Ok(code)
    }
}

/// Custom setter: receives the handle selection, the parameter, and the
/// target to forward hypre calls to.
pub type CustomSetter<H> = Arc<
    dyn Fn(Chooser, &Parameter<H>, &mut dyn ParameterTarget<H>) -> Result<()> + Send + Sync,
>;

/// Either a direct hypre setter or a custom setter function.
pub enum Setter<H> {
    /// Direct hypre entry point
    Library(LibrarySetter<H>),
    /// Custom function, for parameters that need more than one hypre call
    Custom(CustomSetter<H>),
}

impl<H> Clone for Setter<H> {
    fn clone(&self) -> Self {
        match self {
            Setter::Library(f) => Setter::Library(*f),
            Setter::Custom(f) => Setter::Custom(Arc::clone(f)),
        }
    }
}

impl<H> fmt::Debug for Setter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setter::Library(setter) => setter.fmt(f),
            Setter::Custom(_) => f.write_str("CustomSetter"),
        }
    }
}

impl<H> Setter<H> {
    /// Returns `true` for custom setters
    pub fn is_custom(&self) -> bool {
        matches!(self, Setter::Custom(_))
    }
}

/// A parameter value together with the setter that applies it.
pub struct Parameter<H> {
    /// Current value
    pub value: ParamValue,
    /// How the value is pushed into hypre
    pub setter: Setter<H>,
}

impl<H> Clone for Parameter<H> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            setter: self.setter.clone(),
        }
    }
}

impl<H> fmt::Debug for Parameter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("value", &self.value)
            .field("setter", &self.setter)
            .finish()
    }
}

impl<H> Parameter<H> {
    /// Parameter applied through a hypre setter
    pub fn library(value: impl Into<ParamValue>, setter: LibrarySetter<H>) -> Self {
        Self {
            value: value.into(),
            setter: Setter::Library(setter),
        }
    }

    /// Parameter applied through a custom function
    pub fn custom<F>(value: impl Into<ParamValue>, setter: F) -> Self
    where
        F: Fn(Chooser, &Parameter<H>, &mut dyn ParameterTarget<H>) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            value: value.into(),
            setter: Setter::Custom(Arc::new(setter)),
        }
    }

    /// Push the current value onto the handle selected by `chooser`.
    ///
    /// `name` is only used for error reporting; value errors raised by a
    /// custom setter are reported under it too.
    pub fn apply(
        &self,
        name: &str,
        chooser: Chooser,
        target: &mut dyn ParameterTarget<H>,
    ) -> Result<()> {
        match &self.setter {
            Setter::Custom(custom) => {
                custom(chooser, self, target).map_err(|err| match err {
                    HypreError::TypeMismatch { expected, found, .. } => HypreError::TypeMismatch {
                        name: name.to_string(),
                        expected,
                        found,
                    },
                    HypreError::ValueOutOfRange { value, .. } => HypreError::ValueOutOfRange {
                        name: name.to_string(),
                        value,
                    },
                    other => other,
                })
            }
            Setter::Library(setter) => {
                let mut mismatch = None;
                target.set_parameter(chooser, &mut |handle: &mut H| {
                    match setter.invoke(name, handle, &self.value) {
                        Ok(code) => code,
                        Err(err) => {
                            mismatch = Some(err);
                            0
                        }
                    }
                })?;
                match mismatch {
                    Some(err) => Err(err),
                    None => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::check_code;
    use crate::parameters::ValueKind;

    #[derive(Default)]
    struct Handle {
        ints: Vec<HypreInt>,
        reals: Vec<HypreReal>,
    }

    #[derive(Default)]
    struct Target {
        handle: Handle,
    }

    impl ParameterTarget<Handle> for Target {
        fn set_parameter(
            &mut self,
            chooser: Chooser,
            setter: &mut dyn FnMut(&mut Handle) -> HypreInt,
        ) -> Result<()> {
            check_code(setter(&mut self.handle), chooser)
        }
    }

    fn set_int(h: &mut Handle, v: HypreInt) -> HypreInt {
        h.ints.push(v);
        0
    }

    fn set_pair(h: &mut Handle, a: HypreInt, b: HypreInt) -> HypreInt {
        h.ints.extend([a, b]);
        0
    }

    fn set_weights(h: &mut Handle, w: &[HypreReal]) -> HypreInt {
        h.reals.extend_from_slice(w);
        0
    }

    #[test]
    fn test_invoke_matching_shape() {
        let mut h = Handle::default();

        let setter = LibrarySetter::<Handle>::IntInt(set_pair);
        assert_eq!(
            setter
                .invoke("pair", &mut h, &ParamValue::IntPair(2, 3))
                .unwrap(),
            0
        );

        let setter = LibrarySetter::<Handle>::RealArray(set_weights);
        assert_eq!(
            setter
                .invoke("weights", &mut h, &ParamValue::RealArray(vec![0.5, 1.0]))
                .unwrap(),
            0
        );

        assert_eq!(h.ints, vec![2, 3]);
        assert_eq!(h.reals, vec![0.5, 1.0]);
    }

    #[test]
    fn test_invoke_mismatched_shape() {
        let mut h = Handle::default();
        let setter = LibrarySetter::<Handle>::Int(set_int);

        let err = setter
            .invoke("levels", &mut h, &ParamValue::Real(1.0))
            .unwrap_err();
        assert!(err.is_type_mismatch());

        let err = setter
            .invoke("levels", &mut h, &ParamValue::from(("F", "C")))
            .unwrap_err();
        match err {
            HypreError::TypeMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "levels");
                assert_eq!(expected, "(int)");
                assert_eq!(found, ValueKind::StringPair);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(h.ints.is_empty());
    }

    #[test]
    fn test_signatures() {
        let setter = LibrarySetter::<Handle>::Int(set_int);
        assert_eq!(setter.signature(), "(int)");
        assert_eq!(format!("{setter:?}"), "LibrarySetter(int)");
    }

    #[test]
    fn test_parameter_clone_shares_custom_setter() {
        let param: Parameter<Handle> = Parameter::custom(("A", "F"), |_, _, _| Ok(()));
        let copy = param.clone();

        assert!(copy.setter.is_custom());
        assert_eq!(copy.value, param.value);
    }

    #[test]
    fn test_apply_reports_mismatch_without_calling_setter() {
        let param = Parameter::library(1.5, LibrarySetter::<Handle>::Int(set_int));
        let mut target = Target::default();

        let err = param
            .apply("max_levels", Chooser::Solver, &mut target)
            .unwrap_err();

        match err {
            HypreError::TypeMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "max_levels");
                assert_eq!(expected, "(int)");
                assert_eq!(found, ValueKind::Real);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(target.handle.ints.is_empty());
    }

    #[test]
    fn test_apply_calls_matching_setter() {
        let param = Parameter::library(4, LibrarySetter::<Handle>::Int(set_int));
        let mut target = Target::default();

        param
            .apply("max_levels", Chooser::Preconditioner, &mut target)
            .unwrap();
        assert_eq!(target.handle.ints, vec![4]);
    }

    #[test]
    fn test_custom_mismatch_names_applied_parameter() {
        let param: Parameter<Handle> = Parameter::custom(3, |_, param, _| {
            Err(HypreError::TypeMismatch {
                name: "placeholder".to_string(),
                expected: "(string, string)",
                found: param.value.kind(),
            })
        });
        let mut target = Target::default();

        let err = param
            .apply("sweep_order", Chooser::Solver, &mut target)
            .unwrap_err();
        match err {
            HypreError::TypeMismatch { name, found, .. } => {
                assert_eq!(name, "sweep_order");
                assert_eq!(found, ValueKind::Int);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
