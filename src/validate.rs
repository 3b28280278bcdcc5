//! Input validation helpers.
//!
//! Standardizes validation across the crate using `!is_finite()` to reject
//! NaN, +Inf, and -Inf uniformly.

use crate::error::ContinuumError;

/// Validate that a value is strictly positive and finite (rejects NaN, Inf, zero, negatives).
pub(crate) fn validate_positive(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ContinuumError::InvalidInput {
            message: format!("{name} must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() {
        return Err(ContinuumError::InvalidInput {
            message: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a sequence is strictly increasing and finite throughout.
pub(crate) fn validate_strictly_increasing(
    values: &[f64],
    name: &str,
) -> crate::error::Result<()> {
    for v in values {
        if !v.is_finite() {
            return Err(ContinuumError::InvalidInput {
                message: format!("{name} must be finite, got {v}"),
            });
        }
    }
    for (i, w) in values.windows(2).enumerate() {
        if w[1] <= w[0] {
            return Err(ContinuumError::InvalidInput {
                message: format!(
                    "{name} must be strictly increasing, but {name}[{}]={} >= {name}[{}]={}",
                    i,
                    w[0],
                    i + 1,
                    w[1]
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_negative_and_nan() {
        assert!(validate_positive(1.0, "x").is_ok());
        assert!(validate_positive(0.0, "x").is_err());
        assert!(validate_positive(-1.0, "x").is_err());
        assert!(validate_positive(f64::NAN, "x").is_err());
        assert!(validate_positive(f64::INFINITY, "x").is_err());
    }

    #[test]
    fn finite_allows_zero_and_negatives() {
        assert!(validate_finite(0.0, "x").is_ok());
        assert!(validate_finite(-3.5, "x").is_ok());
        assert!(validate_finite(f64::NAN, "x").is_err());
        assert!(validate_finite(f64::NEG_INFINITY, "x").is_err());
    }

    #[test]
    fn strictly_increasing_rejects_ties_and_reversals() {
        assert!(validate_strictly_increasing(&[1.0, 2.0, 3.0], "w").is_ok());
        assert!(validate_strictly_increasing(&[1.0, 1.0, 2.0], "w").is_err());
        assert!(validate_strictly_increasing(&[2.0, 1.0], "w").is_err());
        assert!(validate_strictly_increasing(&[1.0, f64::NAN], "w").is_err());
        assert!(validate_strictly_increasing(&[], "w").is_ok());
    }
}
