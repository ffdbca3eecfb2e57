use ark_serialize::SerializationError;
use thiserror::Error;

/// Errors raised by the commitment scheme.
///
/// Every variant except `Serialization` reports a violated argument
/// precondition and is returned before any group arithmetic runs.
/// A proof that simply does not verify is `Ok(false)`, not an error.
#[derive(Error, Debug)]
pub enum PointproofError {
    #[error("vector dimension must be positive")]
    ZeroDimension,
    #[error("message of length {len} exceeds the supported dimension {dim}")]
    MessageTooLong { len: usize, dim: usize },
    #[error("position {pos} is out of range, expected < {bound}")]
    PositionOutOfRange { pos: usize, bound: usize },
    #[error("length mismatch: expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

pub type Result<T> = core::result::Result<T, PointproofError>;

pub(crate) fn check_same_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(PointproofError::LengthMismatch { expected, found });
    }
    Ok(())
}

pub(crate) fn check_positions(positions: &[usize], bound: usize) -> Result<()> {
    match positions.iter().find(|&&pos| pos >= bound) {
        Some(&pos) => Err(PointproofError::PositionOutOfRange { pos, bound }),
        None => Ok(()),
    }
}
