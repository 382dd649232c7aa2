//! Domain error types.
//!
//! These errors represent validation failures and consistency problems in
//! section chains. They are distinct from lookup and HTTP errors.

use super::InvalidDistance;

/// Errors raised while building or editing a section chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// Distance arithmetic would produce a non-positive or overflowing length
    #[error(transparent)]
    InvalidDistance(#[from] InvalidDistance),

    /// The edit would break the single-path shape of the line
    #[error("invalid section: {0}")]
    InvalidSection(&'static str),

    /// No terminus could be found (chain empty or malformed)
    #[error("station not found in section chain")]
    StationNotFound,

    /// The ordered walk along the chain could not continue
    #[error("section not found in section chain")]
    SectionNotFound,
}

impl SectionError {
    /// Returns true for failures caused by the caller's input, as opposed to
    /// a chain that is already inconsistent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SectionError::InvalidDistance(_) | SectionError::InvalidSection(_)
        )
    }
}
