// Mon Jan 19 2026 - Alex

use crate::matcher::hash::{window_hash, BM_BLOCK_SIZE, BM_MIN_LENGTH};
use crate::matcher::{MatchError, Matcher, OffsetIndex};
use crate::offset::{resolve_anchor, FileLayout, OffsetError, OffsetSpec};

impl Matcher {
    /// Scans one buffer against every loaded pattern in a single forward
    /// pass. `base_offset` is the buffer's absolute position within the
    /// file. When `offsets` is supplied the scan jumps between candidate
    /// positions only; otherwise `layout` is consulted at match time for
    /// relative constraints. First match wins.
    pub fn scan_buffer<'a>(
        &'a self,
        buffer: &[u8],
        base_offset: u64,
        layout: Option<&dyn FileLayout>,
        mut offsets: Option<&mut OffsetIndex>,
    ) -> Result<Option<&'a str>, MatchError> {
        let length = buffer.len();
        if self.patterns.is_empty() || length < BM_MIN_LENGTH {
            return Ok(None);
        }

        let mut i = BM_MIN_LENGTH - BM_BLOCK_SIZE;
        if let Some(index) = offsets.as_deref_mut() {
            if index.is_exhausted() {
                return Ok(None);
            }
            i += index.offtab[index.pos].saturating_sub(base_offset) as usize;
        }

        while i + BM_BLOCK_SIZE <= length {
            let idx = window_hash(buffer[i], buffer[i + 1], buffer[i + 2]) as usize;
            let mut step = self.shift[idx] as usize;

            if step == 0 {
                // The byte a zero-prefix pattern would start with here.
                let lead = buffer[i - (BM_MIN_LENGTH - BM_BLOCK_SIZE)];
                let chain = &self.chains[idx];

                // A single-member chain whose first byte already differs
                // cannot match at all; skip the walk.
                let walk = chain.len() != 1
                    || self.patterns[chain[0] as usize].first_byte == lead;

                if walk {
                    let mut pchain = false;
                    for &pid in chain {
                        let p = &self.patterns[pid as usize];
                        if p.first_byte != lead {
                            // The chain is sorted by non-increasing first
                            // byte: once a matching run ends it cannot
                            // resume.
                            if pchain {
                                break;
                            }
                            continue;
                        }
                        pchain = true;

                        let off = i - (BM_MIN_LENGTH - BM_BLOCK_SIZE);
                        if off + p.core.len() > length || p.prefix.len() > off {
                            continue;
                        }
                        let abs_start = base_offset + (off - p.prefix.len()) as u64;

                        if let Some(index) = offsets.as_deref() {
                            match p.offset {
                                OffsetSpec::Absolute { min, .. } => {
                                    if min != abs_start {
                                        continue;
                                    }
                                }
                                OffsetSpec::Relative { .. } => {
                                    match index.resolved[pid as usize] {
                                        Some(v) if v == abs_start => {}
                                        _ => continue,
                                    }
                                }
                                OffsetSpec::Any => {}
                            }
                        }

                        // Last and middle byte of the overlapping core
                        // region, before the full compare.
                        let idxchk = p.core.len().min(length - off) - 1;
                        if idxchk > 0
                            && (buffer[off + idxchk] != p.core[idxchk]
                                || buffer[off + idxchk / 2] != p.core[idxchk / 2])
                        {
                            continue;
                        }

                        let start = off - p.prefix.len();
                        if buffer[start..off] != p.prefix[..]
                            || buffer[off..off + p.core.len()] != p.core[..]
                        {
                            continue;
                        }

                        if offsets.is_none() {
                            match p.offset {
                                OffsetSpec::Any => {}
                                OffsetSpec::Absolute { min, max } => {
                                    if abs_start < min || abs_start > max {
                                        continue;
                                    }
                                }
                                OffsetSpec::Relative { anchor, maxshift } => {
                                    let layout = layout.ok_or_else(|| {
                                        OffsetError::LayoutUnavailable(p.name.clone())
                                    })?;
                                    let range = resolve_anchor(&anchor, maxshift, layout)
                                        .map_err(|e| {
                                            log::error!(
                                                "Can't calculate relative offset in signature for {}",
                                                p.name
                                            );
                                            MatchError::Offset(e)
                                        })?;
                                    match range {
                                        Some((min, max))
                                            if abs_start >= min && abs_start <= max => {}
                                        _ => continue,
                                    }
                                }
                            }
                        }

                        return Ok(Some(p.name.as_str()));
                    }
                }
                step = 1;
            }

            match offsets.as_deref_mut() {
                Some(index) => match next_candidate(i, base_offset, index) {
                    Some(next) => i = next,
                    None => return Ok(None),
                },
                None => i += step,
            }
        }

        Ok(None)
    }
}

/// Advances the offset-index cursor past every candidate at or before the
/// current core-start position and returns the buffer cursor for the next
/// one, or `None` when nothing left in this buffer can match.
fn next_candidate(i: usize, base_offset: u64, index: &mut OffsetIndex) -> Option<usize> {
    let off = base_offset + (i - (BM_MIN_LENGTH - BM_BLOCK_SIZE)) as u64;
    while index.pos < index.offtab.len() && off >= index.offtab[index.pos] {
        index.pos += 1;
    }
    if index.pos == index.offtab.len() {
        return None;
    }
    Some(i + (index.offtab[index.pos] - off) as usize)
}
