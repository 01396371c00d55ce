// Tue Jan 20 2026 - Alex

#![allow(dead_code)]

pub mod config;
pub mod matcher;
pub mod offset;
pub mod sigdb;
pub mod target;

pub use config::ScanConfig;
pub use matcher::{MatchError, Matcher, OffsetIndex};
pub use offset::{FileLayout, OffsetAnchor, OffsetError, OffsetSpec};
pub use target::{ExeLayout, FlatLayout, MappedFile};
