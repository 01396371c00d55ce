// Sun Jan 18 2026 - Alex

use crate::matcher::hash::{window_hash, BM_BLOCK_SIZE, BM_MIN_LENGTH, DEFAULT_SHIFT, HASH_SIZE};
use crate::matcher::{BmPattern, MatchError};
use crate::offset::OffsetSpec;

/// Multi-pattern exact matcher: a Boyer-Moore-Horspool variant keyed on
/// hashed 3-byte windows. Patterns are inserted once, the structure is
/// immutable afterwards and safe for unsynchronized concurrent scans.
pub struct Matcher {
    /// Minimum safe skip per window hash. Starts at the conservative
    /// default and is only ever lowered, so no true match position can
    /// be skipped over.
    pub(crate) shift: Vec<u8>,
    /// Per window hash, pattern ids ordered by non-increasing
    /// `first_byte`. Chain length replaces the original head-only count.
    pub(crate) chains: Vec<Vec<u32>>,
    /// All patterns in insertion order. The index of a relative-offset
    /// pattern doubles as its slot in a per-file offset index.
    pub(crate) patterns: Vec<BmPattern>,
    absolute_offsets: u32,
    relative_offsets: u32,
}

impl Matcher {
    pub fn new() -> Result<Self, MatchError> {
        let mut shift = Vec::new();
        shift.try_reserve_exact(HASH_SIZE)?;
        shift.resize(HASH_SIZE, DEFAULT_SHIFT);

        let mut chains = Vec::new();
        chains.try_reserve_exact(HASH_SIZE)?;
        chains.resize_with(HASH_SIZE, Vec::new);

        Ok(Self {
            shift,
            chains,
            patterns: Vec::new(),
            absolute_offsets: 0,
            relative_offsets: 0,
        })
    }

    /// Inserts a signature with a textual offset field (`*`, `72`,
    /// `EOF-4`, ...). Parse errors propagate unchanged and leave the
    /// matcher untouched.
    pub fn add_pattern(&mut self, bytes: &[u8], name: &str, offset: &str) -> Result<(), MatchError> {
        if bytes.len() < BM_MIN_LENGTH {
            log::error!("Signature for {} is too short", name);
            return Err(MatchError::MalformedSignature(name.to_string(), bytes.len()));
        }
        let spec: OffsetSpec = offset.parse().map_err(|e| {
            log::error!("Can't parse offset for signature {}: {}", name, offset);
            MatchError::Offset(e)
        })?;
        self.add_pattern_spec(bytes, name, spec)
    }

    pub fn add_pattern_spec(
        &mut self,
        bytes: &[u8],
        name: &str,
        offset: OffsetSpec,
    ) -> Result<(), MatchError> {
        if bytes.len() < BM_MIN_LENGTH {
            log::error!("Signature for {} is too short", name);
            return Err(MatchError::MalformedSignature(name.to_string(), bytes.len()));
        }

        match offset {
            OffsetSpec::Any => {}
            OffsetSpec::Absolute { .. } => self.absolute_offsets += 1,
            OffsetSpec::Relative { .. } => self.relative_offsets += 1,
        }

        // Load-balance the suffix index: index the pattern on the first
        // window whose chain is still empty, demoting everything before
        // it to a prefix checked only after a plausible core match.
        let mut split = 0;
        for i in 0..=bytes.len() - BM_BLOCK_SIZE {
            let idx = window_hash(bytes[i], bytes[i + 1], bytes[i + 2]) as usize;
            if self.chains[idx].is_empty() {
                split = i;
                break;
            }
        }
        let (prefix, core) = bytes.split_at(split);

        // Lower the shift for every window inside the minimum-length
        // region of the core.
        let mut idx = 0usize;
        for i in 0..=BM_MIN_LENGTH - BM_BLOCK_SIZE {
            idx = window_hash(core[i], core[i + 1], core[i + 2]) as usize;
            let skip = (BM_MIN_LENGTH - BM_BLOCK_SIZE - i) as u8;
            self.shift[idx] = self.shift[idx].min(skip);
        }

        let first_byte = core[0];
        let id = self.patterns.len() as u32;
        self.patterns.push(BmPattern {
            prefix: prefix.to_vec(),
            core: core.to_vec(),
            first_byte,
            offset,
            name: name.to_string(),
        });

        // Splice before the first chain member whose first byte is not
        // greater, keeping the chain non-increasing so the scanner can
        // stop once a matching run ends.
        let chain = &mut self.chains[idx];
        let pos = chain
            .iter()
            .position(|&pid| self.patterns[pid as usize].first_byte <= first_byte)
            .unwrap_or(chain.len());
        chain.insert(pos, id);

        Ok(())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn absolute_offset_count(&self) -> u32 {
        self.absolute_offsets
    }

    pub fn relative_offset_count(&self) -> u32 {
        self.relative_offsets
    }

    /// True when some pattern carries a positional constraint and a
    /// per-file offset index would prune the scan.
    pub fn wants_offset_index(&self) -> bool {
        self.absolute_offsets > 0 || self.relative_offsets > 0
    }

    pub fn patterns(&self) -> &[BmPattern] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_pattern_rejected() {
        let mut m = Matcher::new().unwrap();
        let err = m.add_pattern(b"ab", "Short.Sig", "*").unwrap_err();
        assert!(matches!(err, MatchError::MalformedSignature(_, 2)));
        assert_eq!(m.pattern_count(), 0);
        assert!(m.chains.iter().all(|c| c.is_empty()));
        assert!(m.shift.iter().all(|&s| s == DEFAULT_SHIFT));
    }

    #[test]
    fn test_bad_offset_rejected() {
        let mut m = Matcher::new().unwrap();
        assert!(m.add_pattern(b"abcdef", "Bad.Off", "EOF+4").is_err());
        assert_eq!(m.pattern_count(), 0);
    }

    #[test]
    fn test_shift_lowered_for_core_window() {
        let mut m = Matcher::new().unwrap();
        m.add_pattern(b"abcdef", "Test.Sig", "*").unwrap();
        let idx = window_hash(b'a', b'b', b'c') as usize;
        assert_eq!(m.shift[idx], 0);
        let other = window_hash(b'x', b'y', b'z') as usize;
        assert_eq!(m.shift[other], DEFAULT_SHIFT);
    }

    #[test]
    fn test_prefix_split_on_occupied_first_window() {
        let mut m = Matcher::new().unwrap();
        m.add_pattern(b"abcdef", "First.Sig", "*").unwrap();
        // Same leading window as First.Sig, so the second pattern is
        // re-indexed on the first window with an empty chain ("bcx").
        m.add_pattern(b"abcxyz", "Second.Sig", "*").unwrap();

        let p = &m.patterns[1];
        assert_eq!(p.prefix, b"a");
        assert_eq!(p.core, b"bcxyz");
        assert_eq!(p.first_byte, b'b');

        let idx = window_hash(b'b', b'c', b'x') as usize;
        assert_eq!(m.chains[idx], vec![1]);
    }

    #[test]
    fn test_no_split_when_first_chain_empty() {
        let mut m = Matcher::new().unwrap();
        m.add_pattern(b"abcdef", "Solo.Sig", "*").unwrap();
        let p = &m.patterns[0];
        assert!(p.prefix.is_empty());
        assert_eq!(p.core, b"abcdef");
        assert_eq!(p.first_byte, b'a');
    }

    #[test]
    fn test_chain_ordered_by_descending_first_byte() {
        let mut m = Matcher::new().unwrap();
        // Colliding slot, different first bytes: 211*1 == 37*5 + 26.
        // The second pattern is minimum-length so the split heuristic
        // cannot move it to another chain.
        m.add_pattern(&[1, 0, 0, 8, 8, 8], "High.Sig", "*").unwrap();
        m.add_pattern(&[0, 5, 26], "Low.Sig", "*").unwrap();

        let idx = window_hash(1, 0, 0) as usize;
        assert_eq!(m.chains[idx].len(), 2);
        let bytes: Vec<u8> = m.chains[idx]
            .iter()
            .map(|&pid| m.patterns[pid as usize].first_byte)
            .collect();
        assert_eq!(bytes, vec![1, 0]);
    }

    #[test]
    fn test_offset_counters() {
        let mut m = Matcher::new().unwrap();
        m.add_pattern(b"aaa111", "A.Sig", "*").unwrap();
        m.add_pattern(b"bbb222", "B.Sig", "10").unwrap();
        m.add_pattern(b"ccc333", "C.Sig", "EOF-6").unwrap();
        assert_eq!(m.absolute_offset_count(), 1);
        assert_eq!(m.relative_offset_count(), 1);
        assert!(m.wants_offset_index());
        assert_eq!(m.pattern_count(), 3);
    }
}
