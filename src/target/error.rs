// Tue Jan 20 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TargetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File too large to map: {0} bytes")]
    TooLarge(u64),
}
