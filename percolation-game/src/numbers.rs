//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a count or index to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(f64::MAX)
}

/// Truncate a f64 toward zero into a usize, returning 0 for NaN or negative values.
#[must_use]
pub fn trunc_f64_to_usize(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    cast::<f64, usize>(value.trunc()).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_guards_non_finite_and_negative() {
        assert_eq!(trunc_f64_to_usize(f64::NAN), 0);
        assert_eq!(trunc_f64_to_usize(-3.7), 0);
        assert_eq!(trunc_f64_to_usize(1666.99), 1666);
        assert_eq!(trunc_f64_to_usize(f64::INFINITY), usize::MAX);
    }

    #[test]
    fn counts_convert_exactly_in_range() {
        assert!((usize_to_f64(19) - 19.0).abs() < f64::EPSILON);
    }
}
