//! Transition table for B3/S23.

/// Next state indexed by `[alive as usize][neighbors]`.
const TRANSITIONS: [[bool; 9]; 2] = build_transitions();

const fn build_transitions() -> [[bool; 9]; 2] {
    let mut table = [[false; 9]; 2];
    let mut n = 0;
    while n < 9 {
        table[0][n] = n == 3;
        table[1][n] = n == 2 || n == 3;
        n += 1;
    }
    table
}

/// Whether a cell is alive in the next generation.
///
/// `neighbors` is the live Moore-neighbor count and must be at most 8.
#[inline(always)]
pub fn next_alive(alive: bool, neighbors: u8) -> bool {
    TRANSITIONS[alive as usize][neighbors as usize]
}
