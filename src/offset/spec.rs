// Mon Jan 19 2026 - Alex

use crate::offset::OffsetError;
use std::fmt;
use std::str::FromStr;

/// Positional constraint attached to a signature.
///
/// Parsed from the textual offset field of a signature line:
/// `*`, `n`, `n,maxshift`, `EOF-n`, `EP+n`, `EP-n`, `Sx+n`, `SEx`, `SL+n`.
/// Relative forms also accept a `,maxshift` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetSpec {
    Any,
    Absolute { min: u64, max: u64 },
    Relative { anchor: OffsetAnchor, maxshift: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetAnchor {
    /// `EOF-n`: n bytes back from the end of the file.
    EndOfFile { back: u64 },
    /// `EP+n` / `EP-n`: relative to the executable entry point.
    EntryPoint { delta: i64 },
    /// `Sx+n`: n bytes into section x.
    SectionStart { index: usize, delta: u64 },
    /// `SEx`: anywhere inside section x.
    SectionEntire { index: usize },
    /// `SL+n`: n bytes into the last section.
    LastSection { delta: u64 },
}

impl OffsetSpec {
    pub fn is_any(&self) -> bool {
        matches!(self, OffsetSpec::Any)
    }
}

impl FromStr for OffsetSpec {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" || s.is_empty() {
            return Ok(OffsetSpec::Any);
        }

        let (base, maxshift) = match s.split_once(',') {
            Some((b, shift)) => (b, shift.parse::<u64>()?),
            None => (s, 0),
        };

        if let Some(rest) = base.strip_prefix("EOF-") {
            let back = rest.parse::<u64>()?;
            return Ok(OffsetSpec::Relative {
                anchor: OffsetAnchor::EndOfFile { back },
                maxshift,
            });
        }

        if let Some(rest) = base.strip_prefix("EP+") {
            let delta = rest.parse::<i64>()?;
            return Ok(OffsetSpec::Relative {
                anchor: OffsetAnchor::EntryPoint { delta },
                maxshift,
            });
        }

        if let Some(rest) = base.strip_prefix("EP-") {
            let delta = rest.parse::<i64>()?;
            return Ok(OffsetSpec::Relative {
                anchor: OffsetAnchor::EntryPoint { delta: -delta },
                maxshift,
            });
        }

        if let Some(rest) = base.strip_prefix("SL+") {
            let delta = rest.parse::<u64>()?;
            return Ok(OffsetSpec::Relative {
                anchor: OffsetAnchor::LastSection { delta },
                maxshift,
            });
        }

        if let Some(rest) = base.strip_prefix("SE") {
            let index = rest.parse::<usize>()?;
            return Ok(OffsetSpec::Relative {
                anchor: OffsetAnchor::SectionEntire { index },
                maxshift,
            });
        }

        if let Some(rest) = base.strip_prefix('S') {
            let (index, delta) = rest
                .split_once('+')
                .ok_or_else(|| OffsetError::InvalidSpec(s.to_string()))?;
            return Ok(OffsetSpec::Relative {
                anchor: OffsetAnchor::SectionStart {
                    index: index.parse::<usize>()?,
                    delta: delta.parse::<u64>()?,
                },
                maxshift,
            });
        }

        if base.bytes().all(|b| b.is_ascii_digit()) {
            let min = base.parse::<u64>()?;
            return Ok(OffsetSpec::Absolute {
                min,
                max: min + maxshift,
            });
        }

        Err(OffsetError::InvalidSpec(s.to_string()))
    }
}

impl fmt::Display for OffsetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetSpec::Any => write!(f, "*"),
            OffsetSpec::Absolute { min, max } if min == max => write!(f, "{}", min),
            OffsetSpec::Absolute { min, max } => write!(f, "{},{}", min, max - min),
            OffsetSpec::Relative { anchor, maxshift } => {
                match anchor {
                    OffsetAnchor::EndOfFile { back } => write!(f, "EOF-{}", back)?,
                    OffsetAnchor::EntryPoint { delta } if *delta < 0 => {
                        write!(f, "EP-{}", -delta)?
                    }
                    OffsetAnchor::EntryPoint { delta } => write!(f, "EP+{}", delta)?,
                    OffsetAnchor::SectionStart { index, delta } => {
                        write!(f, "S{}+{}", index, delta)?
                    }
                    OffsetAnchor::SectionEntire { index } => write!(f, "SE{}", index)?,
                    OffsetAnchor::LastSection { delta } => write!(f, "SL+{}", delta)?,
                }
                if *maxshift != 0 {
                    write!(f, ",{}", maxshift)?;
                }
                Ok(())
            }
        }
    }
}
