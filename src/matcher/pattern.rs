// Sun Jan 18 2026 - Alex

use crate::offset::OffsetSpec;
use std::fmt;

/// One loaded signature, split at insertion time into an optional
/// literal prefix and the indexed core. The suffix index and shift
/// table key off the core's first window; the prefix is only compared
/// once a core match is plausible.
#[derive(Debug, Clone)]
pub struct BmPattern {
    pub(crate) prefix: Vec<u8>,
    pub(crate) core: Vec<u8>,
    /// First byte of the core, the chain sort and prune key.
    pub(crate) first_byte: u8,
    pub(crate) offset: OffsetSpec,
    pub(crate) name: String,
}

impl BmPattern {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> OffsetSpec {
        self.offset
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix.len()
    }

    pub fn core_len(&self) -> usize {
        self.core.len()
    }

    /// Length of the original signature (prefix + core).
    pub fn full_len(&self) -> usize {
        self.prefix.len() + self.core.len()
    }
}

impl fmt::Display for BmPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes @ {})", self.name, self.full_len(), self.offset)
    }
}
