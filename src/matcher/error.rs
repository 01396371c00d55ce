// Sun Jan 18 2026 - Alex

use crate::offset::OffsetError;
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Signature {0} is too short: {1} bytes")]
    MalformedSignature(String, usize),
    #[error("Offset error: {0}")]
    Offset(#[from] OffsetError),
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
}
