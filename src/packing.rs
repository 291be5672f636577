//! Coordinate packing for the sparse strategies.
//!
//! A coordinate pair of signed 16-bit values is folded into one `u32`:
//! x occupies the low half, y the high half. Inputs outside
//! `i16::MIN..=i16::MAX` wrap modulo 2^16 and alias another coordinate;
//! this is a domain limit of the sparse strategies, not a checked error.

/// Packed coordinate key.
pub type PackedKey = u32;

/// Moore-neighborhood offsets, row by row.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

#[inline(always)]
pub const fn pack(x: i32, y: i32) -> PackedKey {
    (x as u32 & 0xFFFF) | ((y as u32) << 16)
}

#[inline(always)]
pub const fn unpack(key: PackedKey) -> (i32, i32) {
    let x = key as u16 as i16 as i32;
    let y = (key as i32) >> 16;
    (x, y)
}

/// The 8 neighbor keys of `key`, wrapping at the 16-bit edges.
#[inline(always)]
pub fn neighbor_keys(key: PackedKey) -> [PackedKey; 8] {
    let (x, y) = unpack(key);
    NEIGHBOR_OFFSETS.map(|(dx, dy)| pack(x + dx, y + dy))
}
