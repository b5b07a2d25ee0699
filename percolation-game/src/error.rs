//! Error taxonomy shared by every numeric entry point.
use thiserror::Error;

/// Errors raised when an input falls outside the domain of the model.
#[derive(Debug, Error, PartialEq)]
pub enum PercolationError {
    #[error("{field} must be {expected} (got {value})")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("unrecognized lattice topology {0:?} (expected W for the wedge or Z for the full grid)")]
    InvalidTopology(String),
    #[error("degree {degree} polynomial needs more than {degree} points (got {points})")]
    InsufficientData { degree: usize, points: usize },
    #[error("degree {degree} least-squares system is singular")]
    SingularFit { degree: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = PercolationError::InvalidParameter {
            field: "q",
            value: 1.5,
            expected: "strictly between 0 and 1",
        };
        assert_eq!(err.to_string(), "q must be strictly between 0 and 1 (got 1.5)");

        let err = PercolationError::InsufficientData {
            degree: 3,
            points: 2,
        };
        assert!(err.to_string().contains("more than 3 points"));
    }
}
