// Tue Jan 20 2026 - Alex

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub database: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    /// Precompute a per-file offset index when any signature carries a
    /// positional constraint.
    pub use_offset_index: bool,
    /// Parse executable structure for relative offset anchors; plain
    /// files fall back to a size-only layout either way.
    pub parse_executables: bool,
    pub enable_verbose_output: bool,
    pub enable_progress_bars: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            database: None,
            report_file: None,
            use_offset_index: true,
            parse_executables: true,
            enable_verbose_output: false,
            enable_progress_bars: true,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, path: PathBuf) -> Self {
        self.database = Some(path);
        self
    }

    pub fn with_report_file(mut self, path: PathBuf) -> Self {
        self.report_file = Some(path);
        self
    }

    pub fn with_offset_index(mut self, enabled: bool) -> Self {
        self.use_offset_index = enabled;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.enable_verbose_output = verbose;
        self
    }

    pub fn with_progress_bars(mut self, enabled: bool) -> Self {
        self.enable_progress_bars = enabled;
        self
    }
}
