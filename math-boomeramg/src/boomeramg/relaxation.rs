//! Relaxation order for AIR cycles
//!
//! The relaxation order is written as two strings, one for pre-relaxation
//! (down cycle) and one for post-relaxation (up cycle). Each character is one
//! relaxation sweep over a set of points:
//!
//! - `A`: all points
//! - `F`: F-points
//! - `C`: C-points
//!
//! e.g. `("A", "FFC")` relaxes once over all points on the way down, and on
//! the way up does two F-point sweeps followed by a C-point sweep.

use crate::backend::{BoomerAmgSetters, Chooser, HypreInt, ParameterTarget};
use crate::error::{HypreError, Result};
use crate::parameters::Parameter;

/// Cycle phase index for the down cycle (`HYPRE_BoomerAMGSetCycleNumSweeps`)
pub const CYCLE_DOWN: HypreInt = 1;
/// Cycle phase index for the up cycle
pub const CYCLE_UP: HypreInt = 2;
/// Cycle phase index for the coarsest level
pub const CYCLE_COARSE: HypreInt = 3;

/// Number of sweeps on the coarsest level
pub const COARSE_SWEEPS: HypreInt = 1;

/// Point set a single relaxation sweep runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxPoints {
    All,
    Fine,
    Coarse,
}

impl RelaxPoints {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(RelaxPoints::All),
            'F' => Some(RelaxPoints::Fine),
            'C' => Some(RelaxPoints::Coarse),
            _ => None,
        }
    }

    /// hypre grid relax point code
    pub fn code(self) -> HypreInt {
        match self {
            RelaxPoints::All => 0,
            RelaxPoints::Fine => -1,
            RelaxPoints::Coarse => 1,
        }
    }
}

/// Decoded pre- and post-relaxation schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxationOrder {
    /// Point codes for the down cycle, one per sweep
    pub pre: Vec<HypreInt>,
    /// Point codes for the up cycle, one per sweep
    pub post: Vec<HypreInt>,
}

impl RelaxationOrder {
    /// Decode a pair of relaxation strings.
    ///
    /// Every byte yields one entry. Unrecognized symbols are skipped: their
    /// slot keeps 0, so a multi-byte character takes one slot per byte.
    pub fn parse(pre: &str, post: &str) -> Self {
        Self {
            pre: decode_schedule(pre),
            post: decode_schedule(post),
        }
    }

    /// Sweeps on the way down, `None` if the count overflows a hypre integer
    pub fn down_sweeps(&self) -> Option<HypreInt> {
        HypreInt::try_from(self.pre.len()).ok()
    }

    /// Sweeps on the way up, `None` if the count overflows a hypre integer
    pub fn up_sweeps(&self) -> Option<HypreInt> {
        HypreInt::try_from(self.post.len()).ok()
    }

    pub fn coarse_sweeps(&self) -> HypreInt {
        COARSE_SWEEPS
    }
}

fn decode_schedule(order: &str) -> Vec<HypreInt> {
    let mut schedule = vec![0; order.len()];
    for (slot, byte) in schedule.iter_mut().zip(order.bytes()) {
        match RelaxPoints::from_symbol(char::from(byte)) {
            Some(points) => *slot = points.code(),
            None => log::trace!("skipping relaxation symbol {:#04x} in {:?}", byte, order),
        }
    }
    schedule
}

/// Custom setter for the `relaxation_order` parameter.
///
/// Expects a string pair `(pre, post)` and sets the number of sweeps for the
/// coarsest level, the down cycle and the up cycle, in that order.
///
/// Errors name the parameter `relaxation_order`; when applied through a
/// registry they are reported under the registered name instead.
pub fn set_relaxation_order<H: BoomerAmgSetters>(
    chooser: Chooser,
    parameter: &Parameter<H>,
    target: &mut dyn ParameterTarget<H>,
) -> Result<()> {
    let (pre, post) = parameter
        .value
        .as_string_pair()
        .ok_or_else(|| HypreError::TypeMismatch {
            name: super::keys::RELAXATION_ORDER.to_string(),
            expected: "(string, string)",
            found: parameter.value.kind(),
        })?;

    let order = RelaxationOrder::parse(pre, post);
    log::debug!("relaxation order: pre {:?}, post {:?}", order.pre, order.post);

    let too_long = |len: usize| HypreError::ValueOutOfRange {
        name: super::keys::RELAXATION_ORDER.to_string(),
        value: len,
    };
    let down = order.down_sweeps().ok_or_else(|| too_long(order.pre.len()))?;
    let up = order.up_sweeps().ok_or_else(|| too_long(order.post.len()))?;

    let sweeps = [
        (order.coarse_sweeps(), CYCLE_COARSE),
        (down, CYCLE_DOWN),
        (up, CYCLE_UP),
    ];
    for (count, phase) in sweeps {
        target.set_parameter(chooser, &mut |handle: &mut H| {
            handle.set_cycle_num_sweeps(count, phase)
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHandle, RecordingTarget, SetterCall};

    #[test]
    fn test_parse_ffc_cf() {
        let order = RelaxationOrder::parse("FFC", "CF");

        assert_eq!(order.pre, vec![-1, -1, 1]);
        assert_eq!(order.post, vec![1, -1]);
        assert_eq!(order.down_sweeps(), Some(3));
        assert_eq!(order.up_sweeps(), Some(2));
        assert_eq!(order.coarse_sweeps(), 1);
    }

    #[test]
    fn test_parse_all_points() {
        let order = RelaxationOrder::parse("AA", "");
        assert_eq!(order.pre, vec![0, 0]);
        assert!(order.post.is_empty());
        assert_eq!(order.up_sweeps(), Some(0));
    }

    #[test]
    fn test_unknown_symbols_are_skipped() {
        let order = RelaxationOrder::parse("FxC", "?");
        assert_eq!(order.pre, vec![-1, 0, 1]);
        assert_eq!(order.post, vec![0]);
        assert_eq!(order.down_sweeps(), Some(3));
    }

    #[test]
    fn test_non_ascii_symbols_count_per_byte() {
        let order = RelaxationOrder::parse("Fé", "C");
        assert_eq!(order.pre, vec![-1, 0, 0]);
        assert_eq!(order.down_sweeps(), Some(3));
        assert_eq!(order.up_sweeps(), Some(1));
    }

    #[test]
    fn test_setter_forwards_sweep_counts() {
        let param: Parameter<RecordingHandle> =
            Parameter::custom(("FFC", "CF"), set_relaxation_order);
        let mut target = RecordingTarget::default();

        set_relaxation_order(Chooser::Preconditioner, &param, &mut target).unwrap();

        assert_eq!(
            target.preconditioner.calls,
            vec![
                SetterCall::CycleNumSweeps { sweeps: 1, k: 3 },
                SetterCall::CycleNumSweeps { sweeps: 3, k: 1 },
                SetterCall::CycleNumSweeps { sweeps: 2, k: 2 },
            ]
        );
        assert!(target.solver.calls.is_empty());
    }

    #[test]
    fn test_setter_rejects_non_string_value() {
        let param: Parameter<RecordingHandle> = Parameter::custom(3, set_relaxation_order);
        let mut target = RecordingTarget::default();

        let err = set_relaxation_order(Chooser::Solver, &param, &mut target).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(target.solver.calls.is_empty());
    }
}
