// Mon Jan 19 2026 - Alex

use crate::offset::{OffsetAnchor, OffsetError};

/// File-level facts needed to turn a relative offset anchor into a
/// concrete file position. Implemented per scanned file; the matcher
/// core never looks inside the file structure itself.
pub trait FileLayout {
    fn file_size(&self) -> u64;
    /// Entry point as a file offset, if the file has one.
    fn entry_point(&self) -> Result<Option<u64>, OffsetError>;
    /// File range of section `index`, if it exists.
    fn section(&self, index: usize) -> Result<Option<SectionRange>, OffsetError>;
    fn section_count(&self) -> Result<usize, OffsetError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRange {
    pub start: u64,
    pub size: u64,
}

/// Resolves an anchor against one file, yielding the legal `[min, max]`
/// range for the pattern start, or `None` when the anchor does not apply
/// to this file (no entry point, section missing, EOF displacement larger
/// than the file).
pub fn resolve_anchor(
    anchor: &OffsetAnchor,
    maxshift: u64,
    layout: &dyn FileLayout,
) -> Result<Option<(u64, u64)>, OffsetError> {
    let base = match anchor {
        OffsetAnchor::EndOfFile { back } => {
            let fsize = layout.file_size();
            if *back > fsize {
                return Ok(None);
            }
            Some(fsize - back)
        }
        OffsetAnchor::EntryPoint { delta } => match layout.entry_point()? {
            Some(ep) => {
                let pos = ep as i128 + *delta as i128;
                if pos < 0 {
                    return Ok(None);
                }
                Some(pos as u64)
            }
            None => None,
        },
        OffsetAnchor::SectionStart { index, delta } => layout
            .section(*index)?
            .map(|sect| sect.start + delta),
        OffsetAnchor::SectionEntire { index } => {
            return Ok(layout
                .section(*index)?
                .map(|sect| (sect.start, sect.start + sect.size)));
        }
        OffsetAnchor::LastSection { delta } => {
            let count = layout.section_count()?;
            if count == 0 {
                None
            } else {
                layout.section(count - 1)?.map(|sect| sect.start + delta)
            }
        }
    };

    Ok(base.map(|min| (min, min + maxshift)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestLayout {
        size: u64,
        entry: Option<u64>,
        sections: Vec<SectionRange>,
    }

    impl FileLayout for TestLayout {
        fn file_size(&self) -> u64 {
            self.size
        }

        fn entry_point(&self) -> Result<Option<u64>, OffsetError> {
            Ok(self.entry)
        }

        fn section(&self, index: usize) -> Result<Option<SectionRange>, OffsetError> {
            Ok(self.sections.get(index).copied())
        }

        fn section_count(&self) -> Result<usize, OffsetError> {
            Ok(self.sections.len())
        }
    }

    fn layout() -> TestLayout {
        TestLayout {
            size: 1000,
            entry: Some(0x80),
            sections: vec![
                SectionRange { start: 0x40, size: 0x100 },
                SectionRange { start: 0x140, size: 0x200 },
            ],
        }
    }

    #[test]
    fn test_end_of_file() {
        let l = layout();
        let anchor = OffsetAnchor::EndOfFile { back: 4 };
        assert_eq!(resolve_anchor(&anchor, 0, &l).unwrap(), Some((996, 996)));

        let too_far = OffsetAnchor::EndOfFile { back: 2000 };
        assert_eq!(resolve_anchor(&too_far, 0, &l).unwrap(), None);
    }

    #[test]
    fn test_entry_point() {
        let l = layout();
        let anchor = OffsetAnchor::EntryPoint { delta: 16 };
        assert_eq!(resolve_anchor(&anchor, 4, &l).unwrap(), Some((0x90, 0x94)));

        let negative = OffsetAnchor::EntryPoint { delta: -0x100 };
        assert_eq!(resolve_anchor(&negative, 0, &l).unwrap(), None);

        let no_entry = TestLayout { entry: None, ..layout() };
        assert_eq!(resolve_anchor(&anchor, 0, &no_entry).unwrap(), None);
    }

    #[test]
    fn test_sections() {
        let l = layout();
        let start = OffsetAnchor::SectionStart { index: 1, delta: 8 };
        assert_eq!(resolve_anchor(&start, 0, &l).unwrap(), Some((0x148, 0x148)));

        let missing = OffsetAnchor::SectionStart { index: 9, delta: 0 };
        assert_eq!(resolve_anchor(&missing, 0, &l).unwrap(), None);

        let entire = OffsetAnchor::SectionEntire { index: 0 };
        assert_eq!(resolve_anchor(&entire, 0, &l).unwrap(), Some((0x40, 0x140)));

        let last = OffsetAnchor::LastSection { delta: 2 };
        assert_eq!(resolve_anchor(&last, 0, &l).unwrap(), Some((0x142, 0x142)));
    }

    #[test]
    fn test_no_sections() {
        let l = TestLayout { sections: Vec::new(), ..layout() };
        let last = OffsetAnchor::LastSection { delta: 0 };
        assert_eq!(resolve_anchor(&last, 0, &l).unwrap(), None);
    }
}
