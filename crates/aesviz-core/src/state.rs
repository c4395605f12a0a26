//! The visualized state and its step engine.

use core::fmt::{self, Write};

use crate::grid::{from_column_major, Grid};
use crate::round::{add_round_key, mix_columns, shift_rows, sub_bytes};
use crate::step::{Stage, Step};

/// Data grid, key grid and step metadata threaded through the visualization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    /// Working block.
    pub data: Grid,
    /// Key grid. No key schedule is modeled, so this never changes.
    pub key: Grid,
    /// Last applied step.
    pub current_step: Stage,
    /// Round counter carried for the caller. No step touches it.
    pub current_round: i64,
}

impl State {
    /// Builds the initial state from `text` and `key`.
    ///
    /// Both strings are laid out column-major over their UTF-8 bytes; cells
    /// past the input stay zero and bytes past the sixteenth are ignored.
    pub fn new(text: &str, key: &str) -> Self {
        Self {
            data: from_column_major(text.as_bytes()),
            key: from_column_major(key.as_bytes()),
            current_step: Stage::Initial,
            current_round: 0,
        }
    }

    /// Applies `step` in place and records it as the current step.
    pub fn apply(&mut self, step: Step) {
        match &step {
            Step::SubBytes => sub_bytes(&mut self.data),
            Step::ShiftRows => shift_rows(&mut self.data),
            Step::MixColumns => mix_columns(&mut self.data),
            Step::AddRoundKey => add_round_key(&mut self.data, &self.key),
            Step::Unknown(name) => log::debug!("recording unrecognized step {name:?}"),
        }
        log::trace!("applied {step}, round {}", self.current_round);
        self.current_step = Stage::Step(step);
    }

    /// Applies the step called `name`. See [`Step::from_name`].
    pub fn apply_named(&mut self, name: &str) {
        self.apply(Step::from_name(name));
    }

    /// Renders the data grid as four lines of hex bytes, each byte followed by
    /// a space. Line `i` lists `data[0][i]..data[3][i]`.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(4 * 13);
        for i in 0..4 {
            for j in 0..4 {
                // Writing to a String cannot fail.
                let _ = write!(out, "{:02x} ", self.data[j][i]);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Creates the initial state for `text` and `key`.
pub fn init_state(text: &str, key: &str) -> State {
    State::new(text, key)
}

/// Applies the step called `name` to `state` and returns it.
pub fn apply_step(mut state: State, name: &str) -> State {
    state.apply_named(name);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::to_column_major;
    use crate::round::sub_byte;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const TEXT: &str = "ABCDEFGHIJKLMNOP";
    const KEY: &str = "0123456789ABCDEF";

    #[test]
    fn init_lays_out_columns() {
        let state = init_state(TEXT, KEY);
        assert_eq!(state.current_step, Stage::Initial);
        assert_eq!(state.current_step.name(), "Initial");
        assert_eq!(state.current_round, 0);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(state.data[j][i], TEXT.as_bytes()[i * 4 + j]);
                assert_eq!(state.key[j][i], KEY.as_bytes()[i * 4 + j]);
            }
        }
    }

    #[test]
    fn init_short_text_and_empty_key() {
        let state = init_state("Hi", "");
        assert_eq!(to_column_major(&state.data)[..3], [b'H', b'i', 0]);
        assert_eq!(state.data.iter().flatten().filter(|&&b| b != 0).count(), 2);
        assert_eq!(state.key, [[0u8; 4]; 4]);
    }

    #[test]
    fn init_key_does_not_depend_on_text_length() {
        let a = init_state("", KEY);
        let b = init_state("a much longer text than sixteen bytes", KEY);
        assert_eq!(a.key, b.key);
    }

    #[test]
    fn render_initial_scenario() {
        let state = init_state(TEXT, KEY);
        assert_eq!(
            state.to_hex(),
            "41 42 43 44 \n45 46 47 48 \n49 4a 4b 4c \n4d 4e 4f 50 \n"
        );
        assert_eq!(state.to_string(), state.to_hex());
    }

    #[test]
    fn sub_bytes_scenario() {
        let state = apply_step(init_state(TEXT, KEY), "SubBytes");
        assert_eq!(state.current_step.name(), "SubBytes");
        assert_eq!(state.data[0][0], 0xe1);
        assert!(state.to_hex().starts_with("e1 "));
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(state.data[j][i], sub_byte(TEXT.as_bytes()[i * 4 + j]));
            }
        }
    }

    #[test]
    fn unknown_step_only_changes_name() {
        let before = init_state(TEXT, KEY);
        let after = apply_step(before.clone(), "Foo");
        assert_eq!(after.data, before.data);
        assert_eq!(after.key, before.key);
        assert_eq!(after.current_step.name(), "Foo");
    }

    #[test]
    fn add_round_key_twice_restores_data() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..16 {
            let text: String = (0..16).map(|_| rng.gen_range(b' '..=b'~') as char).collect();
            let key: String = (0..16).map(|_| rng.gen_range(b' '..=b'~') as char).collect();
            let start = init_state(&text, &key);
            let mut state = start.clone();
            state.apply(Step::AddRoundKey);
            assert_ne!(state.data, start.data);
            state.apply(Step::AddRoundKey);
            assert_eq!(state.data, start.data);
            assert_eq!(state.current_step, Stage::Step(Step::AddRoundKey));
        }
    }

    #[test]
    fn shift_rows_four_times_restores_data() {
        let mut state = init_state(TEXT, KEY);
        let start = state.data;
        for _ in 0..4 {
            state.apply_named("ShiftRows");
        }
        assert_eq!(state.data, start);
    }

    #[test]
    fn steps_never_touch_round_or_key() {
        let mut state = init_state(TEXT, KEY);
        state.current_round = 3;
        for step in Step::ROUND {
            state.apply(step);
            assert_eq!(state.current_round, 3);
            assert_eq!(state.key, init_state(TEXT, KEY).key);
        }
        assert_eq!(state.current_step.name(), "AddRoundKey");
    }
}
