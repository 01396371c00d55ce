// Sun Jan 18 2026 - Alex

/// Shortest pattern the matcher accepts.
pub const BM_MIN_LENGTH: usize = 3;
/// Bytes hashed per scan window.
pub const BM_BLOCK_SIZE: usize = 3;

/// Size of the shift table and suffix index: the largest window hash
/// plus one. The hash is intentionally lossy; distinct windows may
/// collide, the chain walk sorts that out.
pub const HASH_SIZE: usize = 211 * 255 + 37 * 255 + 255 + 1;

/// Default shift for windows no pattern core starts with.
pub const DEFAULT_SHIFT: u8 = (BM_MIN_LENGTH - BM_BLOCK_SIZE + 1) as u8;

#[inline]
pub fn window_hash(a: u8, b: u8, c: u8) -> u16 {
    211 * a as u16 + 37 * b as u16 + c as u16
}
