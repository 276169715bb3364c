//! Configuration errors
//!
//! The simulation core never fails; only loading and validating tuning data can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },

    #[error("unknown variant `{0}` (expected `lanes` or `planar`)")]
    UnknownVariant(String),
}
