// Tue Jan 20 2026 - Alex

use std::fs;
use std::path::Path;
use thiserror::Error;

/// One parsed signature line: `Name:Offset:HexBytes`.
#[derive(Debug, Clone)]
pub struct SignatureEntry {
    pub name: String,
    pub offset: String,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum SigDbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed signature at line {0}: expected Name:Offset:HexBytes")]
    Malformed(usize),
    #[error("Invalid hex at line {0}: {1}")]
    InvalidHex(usize, hex::FromHexError),
}

/// Loads a signature database file. Blank lines and `#` comments are
/// skipped; any malformed line fails the whole load with its position.
pub fn load_signatures<P: AsRef<Path>>(path: P) -> Result<Vec<SignatureEntry>, SigDbError> {
    let text = fs::read_to_string(path)?;
    parse_signatures(&text)
}

pub fn parse_signatures(text: &str) -> Result<Vec<SignatureEntry>, SigDbError> {
    let mut entries = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.splitn(3, ':');
        let name = fields.next().filter(|f| !f.is_empty());
        let offset = fields.next();
        let hex_sig = fields.next().filter(|f| !f.is_empty());

        let (name, offset, hex_sig) = match (name, offset, hex_sig) {
            (Some(n), Some(o), Some(h)) => (n, o, h),
            _ => return Err(SigDbError::Malformed(lineno + 1)),
        };

        let bytes = hex::decode(hex_sig).map_err(|e| SigDbError::InvalidHex(lineno + 1, e))?;

        entries.push(SignatureEntry {
            name: name.to_string(),
            offset: offset.to_string(),
            bytes,
        });
    }

    Ok(entries)
}
