//! Step engine for a simplified AES-style round, built for visualization.
//!
//! This crate provides:
//! - A 4×4 data grid and key grid derived from arbitrary text.
//! - The four round steps (SubBytes, ShiftRows, MixColumns, AddRoundKey),
//!   applied one at a time by name.
//! - A hex rendering of the data grid.
//!
//! The steps only resemble AES. The substitution and column mixing are cheap
//! stand-ins chosen to be readable on screen; nothing here is a cipher and it
//! should not be used to protect data.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod grid;
pub mod round;
mod state;
mod step;

pub use crate::grid::{from_column_major, to_column_major, Grid};
pub use crate::state::{apply_step, init_state, State};
pub use crate::step::{Stage, Step, INITIAL};
