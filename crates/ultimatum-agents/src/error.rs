//! Error types for strategy construction and validation.
//!
//! Strategy parameters all live in the unit interval; anything outside
//! it is a configuration mistake and is reported before a tournament
//! starts, never silently clamped into a different experiment than the
//! one the operator asked for.

/// Errors raised when strategy parameters fail validation.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// A parameter fell outside the unit interval.
    #[error("{field} out of range: {value} (expected a value in 0.0..=1.0)")]
    OutOfRange {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A parameter that must be finite was NaN or infinite.
    #[error("{field} is not a finite number: {value}")]
    NotFinite {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Check that `value` is finite and within the unit interval.
pub(crate) fn check_unit(field: &'static str, value: f64) -> Result<(), StrategyError> {
    if !value.is_finite() {
        return Err(StrategyError::NotFinite { field, value });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(StrategyError::OutOfRange { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert!(check_unit("offer", 0.0).is_ok());
        assert!(check_unit("offer", 1.0).is_ok());
        assert!(check_unit("offer", 0.5).is_ok());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(check_unit("offer", -0.01).is_err());
        assert!(check_unit("offer", 1.01).is_err());
    }

    #[test]
    fn non_finite_is_rejected() {
        assert!(check_unit("offer", f64::NAN).is_err());
        assert!(check_unit("offer", f64::INFINITY).is_err());
    }
}
