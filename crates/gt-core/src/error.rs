use thiserror::Error;

pub type GtResult<T> = Result<T, GtError>;

/// Rejected scalar input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GtError {
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be greater than zero, got {value}")]
    NonPositive { what: &'static str, value: f64 },
}
