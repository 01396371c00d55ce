// Sun Jan 18 2026 - Alex

pub mod error;
pub mod hash;
pub mod matcher;
pub mod offset_index;
pub mod pattern;
pub mod scanner;

pub use error::MatchError;
pub use hash::{BM_BLOCK_SIZE, BM_MIN_LENGTH};
pub use matcher::Matcher;
pub use offset_index::OffsetIndex;
pub use pattern::BmPattern;
