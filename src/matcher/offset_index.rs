// Mon Jan 19 2026 - Alex

use crate::matcher::{MatchError, Matcher};
use crate::offset::{resolve_anchor, FileLayout, OffsetSpec};

/// Per-file skip-ahead index: every buffer position where some
/// offset-constrained pattern's core could legally start, sorted
/// ascending, plus the per-pattern resolved offsets for relative
/// constraints. The cursor only moves forward; scan calls against one
/// file must come in increasing buffer-offset order.
#[derive(Debug, Default)]
pub struct OffsetIndex {
    /// Candidate core-start positions, ascending.
    pub(crate) offtab: Vec<u64>,
    /// Resolved pattern-start offset per pattern slot (arena index),
    /// `None` when the constraint does not apply to this file.
    pub(crate) resolved: Vec<Option<u64>>,
    pub(crate) pos: usize,
}

impl OffsetIndex {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub fn candidate_count(&self) -> usize {
        self.offtab.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.offtab.len()
    }

    /// Releases everything; safe to call more than once.
    pub fn clear(&mut self) {
        self.offtab = Vec::new();
        self.resolved = Vec::new();
        self.pos = 0;
    }
}

impl Matcher {
    /// Resolves every pattern's constraint against one concrete file and
    /// builds the sorted candidate index consumed by `scan_buffer`.
    /// Resolution errors propagate unchanged; nothing is leaked on the
    /// failure path.
    pub fn build_offset_index(&self, layout: &dyn FileLayout) -> Result<OffsetIndex, MatchError> {
        if self.patterns.is_empty() {
            return Ok(OffsetIndex::empty());
        }

        let fsize = layout.file_size();
        let count = self.patterns.len();

        let mut offtab = Vec::new();
        offtab.try_reserve_exact(count)?;
        let mut resolved = Vec::new();
        resolved.try_reserve_exact(count)?;
        resolved.resize(count, None);

        for (slot, patt) in self.patterns.iter().enumerate() {
            match patt.offset {
                OffsetSpec::Any => {}
                OffsetSpec::Absolute { min, .. } => {
                    offtab.push(min + patt.prefix.len() as u64);
                }
                OffsetSpec::Relative { anchor, maxshift } => {
                    let range =
                        resolve_anchor(&anchor, maxshift, layout).map_err(|e| {
                            log::error!(
                                "Can't calculate relative offset in signature for {}",
                                patt.name
                            );
                            MatchError::Offset(e)
                        })?;
                    if let Some((min, _)) = range {
                        resolved[slot] = Some(min);
                        // Only adjacent duplicates are dropped; the sort
                        // below keeps any remaining ones harmless.
                        if min + patt.core.len() as u64 <= fsize
                            && offtab.last().map_or(true, |&last| min != last)
                        {
                            offtab.push(min + patt.prefix.len() as u64);
                        }
                    }
                }
            }
        }

        offtab.sort_unstable();
        Ok(OffsetIndex {
            offtab,
            resolved,
            pos: 0,
        })
    }
}
