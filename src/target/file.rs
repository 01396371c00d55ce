// Tue Jan 20 2026 - Alex

use crate::target::TargetError;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Read-only memory-mapped view of one target file.
pub struct MappedFile {
    mmap: Mmap,
    path: PathBuf,
}

impl MappedFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TargetError> {
        let path_buf = path.as_ref().to_path_buf();
        let file = File::open(path.as_ref())?;
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(Self {
            mmap,
            path: path_buf,
        })
    }

    pub fn data(&self) -> &[u8] {
        self.mmap.as_ref()
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
