// Mon Jan 19 2026 - Alex

pub mod error;
pub mod resolve;
pub mod spec;

pub use error::OffsetError;
pub use resolve::{resolve_anchor, FileLayout, SectionRange};
pub use spec::{OffsetAnchor, OffsetSpec};
