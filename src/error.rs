//! Error type for configuration and host setup.
//!
//! Clamping itself never fails: an unready host just skips the computation.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClampError {
    #[error("line budget must be at least 1, got {0}")]
    InvalidLineBudget(u32),

    #[error("char width must be a positive finite number, got {0}")]
    InvalidCharWidth(f64),

    #[error("cannot parse line height {0:?}")]
    InvalidLineHeight(String),

    #[error("terminal i/o: {0}")]
    Io(#[from] io::Error),
}
