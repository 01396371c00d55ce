// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OffsetError {
    #[error("Invalid offset spec: {0}")]
    InvalidSpec(String),
    #[error("Invalid number in offset spec: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),
    #[error("File layout required to resolve offset for signature {0}")]
    LayoutUnavailable(String),
    #[error("Binary parse error: {0}")]
    BinaryParse(String),
}
