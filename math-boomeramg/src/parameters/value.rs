//! Parameter values

use crate::backend::{HypreInt, HypreReal};
use std::fmt;

/// Value of a single hypre parameter.
///
/// The variants cover every argument shape a [`LibrarySetter`](super::LibrarySetter)
/// can take, plus `StringPair`, which only custom setters understand.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Single integer
    Int(HypreInt),
    /// Single real
    Real(HypreReal),
    /// Integer array (`int*`)
    IntArray(Vec<HypreInt>),
    /// Real array (`double*`)
    RealArray(Vec<HypreReal>),
    /// Array of integer arrays (`int**`)
    NestedIntArray(Vec<Vec<HypreInt>>),
    /// Real followed by an integer, e.g. a weight and a level
    RealInt(HypreReal, HypreInt),
    /// Two integers, e.g. a count and a cycle phase
    IntPair(HypreInt, HypreInt),
    /// Two strings, e.g. pre- and post-relaxation orders
    StringPair(String, String),
}

/// Shape of a [`ParamValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Real,
    IntArray,
    RealArray,
    NestedIntArray,
    RealInt,
    IntPair,
    StringPair,
}

impl ValueKind {
    /// Human readable name, as used in error messages
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Real => "real",
            ValueKind::IntArray => "int array",
            ValueKind::RealArray => "real array",
            ValueKind::NestedIntArray => "nested int array",
            ValueKind::RealInt => "(real, int) pair",
            ValueKind::IntPair => "(int, int) pair",
            ValueKind::StringPair => "string pair",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ParamValue {
    /// Shape of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            ParamValue::Int(_) => ValueKind::Int,
            ParamValue::Real(_) => ValueKind::Real,
            ParamValue::IntArray(_) => ValueKind::IntArray,
            ParamValue::RealArray(_) => ValueKind::RealArray,
            ParamValue::NestedIntArray(_) => ValueKind::NestedIntArray,
            ParamValue::RealInt(_, _) => ValueKind::RealInt,
            ParamValue::IntPair(_, _) => ValueKind::IntPair,
            ParamValue::StringPair(_, _) => ValueKind::StringPair,
        }
    }

    /// The integer payload, if this is an `Int`
    pub fn as_int(&self) -> Option<HypreInt> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The real payload, if this is a `Real`
    pub fn as_real(&self) -> Option<HypreReal> {
        match self {
            ParamValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// The string payload, if this is a `StringPair`
    pub fn as_string_pair(&self) -> Option<(&str, &str)> {
        match self {
            ParamValue::StringPair(a, b) => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }
}

impl From<HypreInt> for ParamValue {
    fn from(v: HypreInt) -> Self {
        ParamValue::Int(v)
    }
}

impl From<HypreReal> for ParamValue {
    fn from(v: HypreReal) -> Self {
        ParamValue::Real(v)
    }
}

impl From<Vec<HypreInt>> for ParamValue {
    fn from(v: Vec<HypreInt>) -> Self {
        ParamValue::IntArray(v)
    }
}

impl From<Vec<HypreReal>> for ParamValue {
    fn from(v: Vec<HypreReal>) -> Self {
        ParamValue::RealArray(v)
    }
}

impl From<Vec<Vec<HypreInt>>> for ParamValue {
    fn from(v: Vec<Vec<HypreInt>>) -> Self {
        ParamValue::NestedIntArray(v)
    }
}

impl From<(HypreReal, HypreInt)> for ParamValue {
    fn from((a, b): (HypreReal, HypreInt)) -> Self {
        ParamValue::RealInt(a, b)
    }
}

impl From<(HypreInt, HypreInt)> for ParamValue {
    fn from((a, b): (HypreInt, HypreInt)) -> Self {
        ParamValue::IntPair(a, b)
    }
}

impl From<(String, String)> for ParamValue {
    fn from((a, b): (String, String)) -> Self {
        ParamValue::StringPair(a, b)
    }
}

impl From<(&str, &str)> for ParamValue {
    fn from((a, b): (&str, &str)) -> Self {
        ParamValue::StringPair(a.to_string(), b.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(ParamValue::from(3), ParamValue::Int(3));
        assert_eq!(ParamValue::from(0.5), ParamValue::Real(0.5));
        assert_eq!(ParamValue::from((0.5, 2)), ParamValue::RealInt(0.5, 2));
        assert_eq!(ParamValue::from((1, 3)), ParamValue::IntPair(1, 3));
        assert_eq!(
            ParamValue::from(("A", "FFC")),
            ParamValue::StringPair("A".to_string(), "FFC".to_string())
        );
        assert_eq!(
            ParamValue::from(vec![vec![0], vec![-1, 1]]).kind(),
            ValueKind::NestedIntArray
        );
    }

    #[test]
    fn test_accessors() {
        let v = ParamValue::Int(7);
        assert_eq!(v.as_int(), Some(7));
        assert_eq!(v.as_real(), None);

        let pair = ParamValue::from(("F", "C"));
        assert_eq!(pair.as_string_pair(), Some(("F", "C")));
        assert_eq!(pair.kind().to_string(), "string pair");
    }
}
