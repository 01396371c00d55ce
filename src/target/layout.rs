// Tue Jan 20 2026 - Alex

use crate::offset::{FileLayout, OffsetError, SectionRange};
use goblin::Object;

/// Layout for files with no executable structure: size only, no entry
/// point, no sections. Relative anchors other than EOF never apply.
#[derive(Debug, Clone, Copy)]
pub struct FlatLayout {
    size: u64,
}

impl FlatLayout {
    pub fn new(size: u64) -> Self {
        Self { size }
    }
}

impl FileLayout for FlatLayout {
    fn file_size(&self) -> u64 {
        self.size
    }

    fn entry_point(&self) -> Result<Option<u64>, OffsetError> {
        Ok(None)
    }

    fn section(&self, _index: usize) -> Result<Option<SectionRange>, OffsetError> {
        Ok(None)
    }

    fn section_count(&self) -> Result<usize, OffsetError> {
        Ok(0)
    }
}

/// Executable layout extracted once per file with goblin: entry point
/// and section ranges as *file* offsets, which is what offset anchors
/// are expressed in. Files goblin cannot parse degrade to a flat layout.
#[derive(Debug, Clone)]
pub struct ExeLayout {
    size: u64,
    entry: Option<u64>,
    sections: Vec<SectionRange>,
}

impl ExeLayout {
    pub fn parse(data: &[u8]) -> Self {
        let size = data.len() as u64;
        match Object::parse(data) {
            Ok(Object::Elf(elf)) => Self::from_elf(size, &elf),
            Ok(Object::PE(pe)) => Self::from_pe(size, &pe),
            Ok(Object::Mach(goblin::mach::Mach::Binary(macho))) => Self::from_macho(size, &macho),
            _ => Self {
                size,
                entry: None,
                sections: Vec::new(),
            },
        }
    }

    fn from_elf(size: u64, elf: &goblin::elf::Elf) -> Self {
        // Entry point is a virtual address; translate through the
        // containing loadable segment to get a file offset.
        let entry = elf.program_headers.iter().find_map(|ph| {
            if ph.p_type == goblin::elf::program_header::PT_LOAD
                && elf.entry >= ph.p_vaddr
                && elf.entry < ph.p_vaddr + ph.p_filesz
            {
                Some(elf.entry - ph.p_vaddr + ph.p_offset)
            } else {
                None
            }
        });

        let sections = elf
            .section_headers
            .iter()
            .filter(|sh| sh.sh_size > 0 && sh.sh_type != goblin::elf::section_header::SHT_NOBITS)
            .map(|sh| SectionRange {
                start: sh.sh_offset,
                size: sh.sh_size,
            })
            .collect();

        Self {
            size,
            entry,
            sections,
        }
    }

    fn from_pe(size: u64, pe: &goblin::pe::PE) -> Self {
        let rva = pe.entry as u64;
        let entry = pe.sections.iter().find_map(|sect| {
            let va = sect.virtual_address as u64;
            let vsize = sect.virtual_size as u64;
            if rva >= va && rva < va + vsize {
                Some(rva - va + sect.pointer_to_raw_data as u64)
            } else {
                None
            }
        });

        let sections = pe
            .sections
            .iter()
            .map(|sect| SectionRange {
                start: sect.pointer_to_raw_data as u64,
                size: sect.size_of_raw_data as u64,
            })
            .collect();

        Self {
            size,
            entry,
            sections,
        }
    }

    fn from_macho(size: u64, macho: &goblin::mach::MachO) -> Self {
        let sections = macho
            .segments
            .iter()
            .filter(|seg| seg.filesize > 0)
            .map(|seg| SectionRange {
                start: seg.fileoff,
                size: seg.filesize,
            })
            .collect();

        Self {
            size,
            // LC_MAIN gives the entry as a file offset already.
            entry: (macho.entry != 0).then_some(macho.entry),
            sections,
        }
    }
}

impl FileLayout for ExeLayout {
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
