//! BoomerAMG configuration
//!
//! - [`BoomerAmgParameters`]: registry pre-populated with classical or AIR defaults
//! - [`RelaxationOrder`]: decoder behind the `relaxation_order` parameter
//! - typed option codes ([`CoarsenType`], [`RelaxType`], ...) for readable `set` calls

mod defaults;
mod options;
mod relaxation;

pub use defaults::{BoomerAmgParameters, DEFAULT_MAX_ITER, DEFAULT_PRINT_LEVEL, DEFAULT_TOLERANCE};
pub use options::{AmgVariant, CoarsenType, CycleType, InterpType, RelaxType, Restriction};
pub use relaxation::{
    COARSE_SWEEPS, CYCLE_COARSE, CYCLE_DOWN, CYCLE_UP, RelaxPoints, RelaxationOrder,
    set_relaxation_order,
};

/// Parameter names used by the default sets
pub mod keys {
    pub const PRINT_LEVEL: &str = "print_level";
    pub const COARSEN_TYPE: &str = "coarsen_type";
    pub const RELAX_TYPE: &str = "relax_type";
    pub const NUM_SWEEPS: &str = "num_sweeps";
    pub const MAX_ITER: &str = "max_iter";
    pub const TOLERANCE: &str = "tolerance";

    pub const INTERP_TYPE: &str = "interp_type";
    pub const RESTRICTION: &str = "restriction";
    pub const MAX_LEVELS: &str = "max_levels";
    pub const CYCLE_TYPE: &str = "cycle_type";
    pub const SABS_FLAG: &str = "sabs_flag";
    pub const STRENGTH_TOL_C: &str = "strength_tol_c";
    pub const STRENGTH_TOL_R: &str = "strength_tol_r";
    pub const FILTER_A_TOL: &str = "filter_a_tol";
    pub const POST_FILTER_R: &str = "post_filter_r";
    pub const RELAXATION_ORDER: &str = "relaxation_order";
}
