//! Grid representation helpers.

/// 4×4 byte grid indexed `[row][col]`.
pub type Grid = [[u8; 4]; 4];

/// Builds a grid from `bytes`, filling each column top to bottom before moving
/// to the next one. Cells past the end of `bytes` stay zero and bytes past the
/// sixteenth are ignored.
pub fn from_column_major(bytes: &[u8]) -> Grid {
    let mut grid = [[0u8; 4]; 4];
    for (k, &byte) in bytes.iter().take(16).enumerate() {
        grid[k % 4][k / 4] = byte;
    }
    grid
}

/// Reads the grid back in the same column-major order used by
/// [`from_column_major`].
pub fn to_column_major(grid: &Grid) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (k, byte) in out.iter_mut().enumerate() {
        *byte = grid[k % 4][k / 4];
    }
    out
}

/// XORs two grids cell by cell, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Grid, rhs: &Grid) {
    for (d_row, r_row) in dst.iter_mut().zip(rhs.iter()) {
        for (d, r) in d_row.iter_mut().zip(r_row.iter()) {
            *d ^= *r;
        }
    }
}
