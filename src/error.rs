//! Error types for the dielectric response engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DielectricError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid frequency: {0} Hz (must be positive and finite)")]
    InvalidFrequency(f64),

    #[error("shape mismatch: {context} ({left} vs {right} elements)")]
    ShapeMismatch {
        context: &'static str,
        left: usize,
        right: usize,
    },

    #[error("unsupported noise kernel '{name}' (valid kernels: {valid})")]
    UnsupportedKernel { name: String, valid: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid frequency sweep: {0}")]
    InvalidSweep(String),
}

pub type Result<T> = std::result::Result<T, DielectricError>;

/// Fail with [`DielectricError::ShapeMismatch`] unless both lengths agree.
pub(crate) fn ensure_same_len(context: &'static str, left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(DielectricError::ShapeMismatch {
            context,
            left,
            right,
        });
    }
    Ok(())
}
