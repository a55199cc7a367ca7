//! Typed BoomerAMG option codes
//!
//! hypre takes these options as plain integers. The enums below name the
//! documented values; `code()` gives the integer hypre expects, and each
//! converts into a [`ParamValue`] so it can be passed straight to
//! `ParameterRegistry::set`.

use crate::backend::HypreInt;
use crate::parameters::ParamValue;
use serde::{Deserialize, Serialize};

/// Which default parameter set to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmgVariant {
    /// Classical (Ruge-Stüben style) AMG
    #[default]
    Classical,

    /// Approximate ideal restriction (AIR), for non-symmetric and advective problems
    Air,

    /// Start from an empty registry
    None,
}

/// Coarsening algorithm (`HYPRE_BoomerAMGSetCoarsenType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum CoarsenType {
    /// CLJP: parallel coarsening using independent sets
    Cljp = 0,

    /// Classical Ruge-Stüben on each processor, plus a third pass adding
    /// coarse points on processor boundaries
    RugeStubenBoundary = 3,

    /// Falgout: Ruge-Stüben first, then CLJP seeded with the interior C-points
    #[default]
    Falgout = 6,

    /// PMIS: lower complexities than CLJP, possibly slower convergence
    Pmis = 8,

    /// HMIS: one-pass Ruge-Stüben per processor, then PMIS
    Hmis = 10,

    /// CGC coarsening (Griebel, Metsch, Schweitzer)
    Cgc = 21,

    /// CGC-E coarsening (Griebel, Metsch, Schweitzer)
    CgcE = 22,
}

/// Smoother (`HYPRE_BoomerAMGSetRelaxType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum RelaxType {
    /// Jacobi
    #[default]
    Jacobi = 0,
    /// Gauss-Seidel, sequential (very slow)
    GaussSeidelSequential = 1,
    /// Gauss-Seidel, interior points in parallel, boundary sequential (slow)
    GaussSeidelInterior = 2,
    /// Hybrid Gauss-Seidel or SOR, forward solve
    HybridForward = 3,
    /// Hybrid Gauss-Seidel or SOR, backward solve
    HybridBackward = 4,
    /// Hybrid chaotic Gauss-Seidel (OpenMP only)
    HybridChaotic = 5,
    /// Hybrid symmetric Gauss-Seidel or SSOR
    HybridSymmetric = 6,
    /// l1-scaled hybrid symmetric Gauss-Seidel
    L1SymmetricGaussSeidel = 8,
    /// Gaussian elimination (coarsest level only)
    GaussianElimination = 9,
    /// l1 Gauss-Seidel, forward solve
    L1GaussSeidelForward = 13,
    /// l1 Gauss-Seidel, backward solve
    L1GaussSeidelBackward = 14,
    /// CG; not a fixed smoother, may require FGMRES
    Cg = 15,
    /// Chebyshev
    Chebyshev = 16,
    /// FCF-Jacobi
    FcfJacobi = 17,
    /// l1-scaled Jacobi
    L1Jacobi = 18,
}

/// Interpolation operator (`HYPRE_BoomerAMGSetInterpType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum InterpType {
    /// Classical modified interpolation
    #[default]
    ClassicalModified = 0,
    /// LS interpolation (for GSMG)
    LeastSquares = 1,
    /// Classical modified interpolation for hyperbolic PDEs
    ClassicalHyperbolic = 2,
    /// Direct interpolation with separation of weights
    Direct = 3,
    /// Multipass interpolation
    Multipass = 4,
    /// Multipass interpolation with separation of weights
    MultipassSeparated = 5,
    /// Extended+i interpolation
    ExtendedPlusI = 7,
    /// Standard interpolation
    Standard = 8,
    /// Standard interpolation with separation of weights
    StandardSeparated = 9,
    /// Classical block interpolation (nodal systems only)
    ClassicalBlock = 10,
    /// Classical block interpolation with diagonalized diagonal blocks (nodal systems only)
    ClassicalBlockDiagonal = 11,
    /// FF interpolation
    Ff = 12,
    /// FF1 interpolation
    Ff1 = 13,
    /// Extended interpolation
    Extended = 14,
    /// Pointwise interpolation, intended for AIR
    Pointwise = 100,
}

/// Multigrid cycle (`HYPRE_BoomerAMGSetCycleType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum CycleType {
    FCycle = 0,
    #[default]
    VCycle = 1,
    WCycle = 2,
}

/// Restriction operator (`HYPRE_BoomerAMGSetRestriction`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum Restriction {
    /// Classical AMG: R = P^T
    #[default]
    Transpose = 0,
    /// AIR with distance-1 LAIR
    AirDistance1 = 1,
    /// AIR with distance-2 LAIR
    AirDistance2 = 2,
    /// AIR with a degree 0 Neumann expansion
    AirNeumann0 = 3,
    /// AIR with a degree 1 Neumann expansion
    AirNeumann1 = 4,
    /// AIR with a degree 2 Neumann expansion
    AirNeumann2 = 5,
}

macro_rules! hypre_code {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Integer code passed to hypre
                pub fn code(self) -> HypreInt {
                    self as HypreInt
                }
            }

            impl From<$ty> for ParamValue {
                fn from(option: $ty) -> Self {
                    ParamValue::Int(option.code())
                }
            }
        )*
    };
}

hypre_code!(CoarsenType, RelaxType, InterpType, CycleType, Restriction);

impl Restriction {
    /// Returns `true` if this restriction selects AIR instead of classical AMG
    pub fn is_air(self) -> bool {
        !matches!(self, Restriction::Transpose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_hypre() {
        assert_eq!(CoarsenType::Falgout.code(), 6);
        assert_eq!(CoarsenType::Hmis.code(), 10);
        assert_eq!(RelaxType::L1Jacobi.code(), 18);
        assert_eq!(InterpType::Pointwise.code(), 100);
        assert_eq!(CycleType::WCycle.code(), 2);
        assert_eq!(Restriction::AirDistance2.code(), 2);
    }

    #[test]
    fn test_into_param_value() {
        assert_eq!(ParamValue::from(CoarsenType::Pmis), ParamValue::Int(8));
        assert_eq!(ParamValue::from(RelaxType::HybridForward), ParamValue::Int(3));
    }

    #[test]
    fn test_restriction_is_air() {
        assert!(!Restriction::Transpose.is_air());
        assert!(Restriction::AirNeumann1.is_air());
    }

    #[test]
    fn test_variant_serde_names() {
        let air: AmgVariant = serde_json::from_str("\"air\"").unwrap();
        assert_eq!(air, AmgVariant::Air);
        assert_eq!(
            serde_json::to_string(&AmgVariant::Classical).unwrap(),
            "\"classical\""
        );
    }
}
