// Tue Jan 20 2026 - Alex

pub mod error;
pub mod file;
pub mod layout;

pub use error::TargetError;
pub use file::MappedFile;
pub use layout::{ExeLayout, FlatLayout};
