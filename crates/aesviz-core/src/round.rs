//! Simplified round transformations.
//!
//! These mirror the shape of the AES round steps but replace the S-box and the
//! GF(2^8) column multiply with cheap byte operations that are easy to follow
//! on screen.

use crate::grid::{xor_in_place, Grid};

/// Substitution applied to a single byte: `(b << 1) ^ (b >> 7) ^ 0x63`.
#[inline]
pub const fn sub_byte(byte: u8) -> u8 {
    (byte << 1) ^ (byte >> 7) ^ 0x63
}

/// Applies SubBytes to the grid in place.
#[inline]
pub fn sub_bytes(state: &mut Grid) {
    for byte in state.iter_mut().flatten() {
        *byte = sub_byte(*byte);
    }
}

/// Rotates `row` left by `shift` positions.
#[inline]
pub fn shift_row(state: &mut Grid, row: usize, shift: usize) {
    state[row].rotate_left(shift % 4);
}

/// Performs ShiftRows in place: row `r` rotates left by `r`.
#[inline]
pub fn shift_rows(state: &mut Grid) {
    for row in 1..4 {
        shift_row(state, row, row);
    }
}

fn mix_single_column(col: &mut [u8; 4]) {
    let [a, b, c, d] = *col;
    col[0] = a ^ b;
    col[1] = b ^ c;
    col[2] = c ^ d;
    col[3] = d ^ a;
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Grid) {
    for col in 0..4 {
        let mut column = [state[0][col], state[1][col], state[2][col], state[3][col]];
        mix_single_column(&mut column);
        for (row, byte) in column.into_iter().enumerate() {
            state[row][col] = byte;
        }
    }
}

/// Adds (XORs) the key grid into the state.
#[inline]
pub fn add_round_key(state: &mut Grid, key: &Grid) {
    xor_in_place(state, key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn random_grid(rng: &mut impl Rng) -> Grid {
        let mut grid = [[0u8; 4]; 4];
        for byte in grid.iter_mut().flatten() {
            *byte = rng.gen();
        }
        grid
    }

    #[test]
    fn sub_byte_known_values() {
        assert_eq!(sub_byte(0x00), 0x63);
        assert_eq!(sub_byte(0x41), 0xe1);
        assert_eq!(sub_byte(0x80), 0x62);
        assert_eq!(sub_byte(0xff), 0x9c);
    }

    #[test]
    fn sub_bytes_is_per_byte() {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        let grid = random_grid(&mut rng);
        let mut out = grid;
        sub_bytes(&mut out);
        for (row, out_row) in grid.iter().zip(out.iter()) {
            for (&b, &s) in row.iter().zip(out_row.iter()) {
                assert_eq!(s, sub_byte(b));
            }
        }
    }

    #[test]
    fn shift_rows_rotates_each_row_by_index() {
        let mut state = [
            [0x00, 0x01, 0x02, 0x03],
            [0x10, 0x11, 0x12, 0x13],
            [0x20, 0x21, 0x22, 0x23],
            [0x30, 0x31, 0x32, 0x33],
        ];
        shift_rows(&mut state);
        assert_eq!(
            state,
            [
                [0x00, 0x01, 0x02, 0x03],
                [0x11, 0x12, 0x13, 0x10],
                [0x22, 0x23, 0x20, 0x21],
                [0x33, 0x30, 0x31, 0x32],
            ]
        );
    }

    #[test]
    fn shift_rows_has_period_four() {
        let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
        for _ in 0..32 {
            let grid = random_grid(&mut rng);
            let mut state = grid;
            for _ in 0..4 {
                shift_rows(&mut state);
            }
            assert_eq!(state, grid);
        }
    }

    #[test]
    fn mix_columns_reads_before_writing() {
        let mut state = [
            [0x01, 0x00, 0x00, 0x00],
            [0x02, 0x00, 0x00, 0x00],
            [0x04, 0x00, 0x00, 0x00],
            [0x08, 0x00, 0x00, 0x00],
        ];
        mix_columns(&mut state);
        let column: Vec<u8> = state.iter().map(|row| row[0]).collect();
        assert_eq!(column, vec![0x03, 0x06, 0x0c, 0x09]);
    }

    #[test]
    fn mix_columns_is_not_an_involution() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        let grid = random_grid(&mut rng);
        let mut state = grid;
        mix_columns(&mut state);
        mix_columns(&mut state);
        assert_ne!(state, grid);
    }

    #[test]
    fn mix_columns_output_columns_cancel() {
        // Every output column XORs to zero, so the map loses information.
        let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
        let mut state = random_grid(&mut rng);
        mix_columns(&mut state);
        for col in 0..4 {
            assert_eq!(state.iter().fold(0u8, |acc, row| acc ^ row[col]), 0);
        }
    }

    #[test]
    fn add_round_key_is_self_inverse() {
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        for _ in 0..32 {
            let grid = random_grid(&mut rng);
            let key = random_grid(&mut rng);
            let mut state = grid;
            add_round_key(&mut state, &key);
            add_round_key(&mut state, &key);
            assert_eq!(state, grid);
        }
    }
}
