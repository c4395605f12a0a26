//! Step names and dispatch targets.

use core::fmt;

/// Name recorded before any step has been applied.
pub const INITIAL: &str = "Initial";

/// A single round step selectable by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Per-byte substitution.
    SubBytes,
    /// Cyclic row rotation.
    ShiftRows,
    /// Column diffusion.
    MixColumns,
    /// XOR with the key grid.
    AddRoundKey,
    /// Any other name. Applying it leaves the grids untouched but the name is
    /// still recorded as the current step.
    Unknown(String),
}

impl Step {
    /// The four recognized steps in their usual round order.
    pub const ROUND: [Step; 4] = [
        Step::SubBytes,
        Step::ShiftRows,
        Step::MixColumns,
        Step::AddRoundKey,
    ];

    /// Maps a caller-supplied name to a step. Matching is exact and
    /// case-sensitive.
    pub fn from_name(name: &str) -> Self {
        match name {
            "SubBytes" => Step::SubBytes,
            "ShiftRows" => Step::ShiftRows,
            "MixColumns" => Step::MixColumns,
            "AddRoundKey" => Step::AddRoundKey,
            other => Step::Unknown(other.to_owned()),
        }
    }

    /// The step's name as accepted by [`Step::from_name`].
    pub fn name(&self) -> &str {
        match self {
            Step::SubBytes => "SubBytes",
            Step::ShiftRows => "ShiftRows",
            Step::MixColumns => "MixColumns",
            Step::AddRoundKey => "AddRoundKey",
            Step::Unknown(name) => name,
        }
    }

    /// Returns `true` for the four steps that actually transform the grid.
    pub fn is_known(&self) -> bool {
        !matches!(self, Step::Unknown(_))
    }
}

impl From<&str> for Step {
    fn from(value: &str) -> Self {
        Self::from_name(value)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The most recently applied step of a state, or `Initial`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// No step applied yet.
    #[default]
    Initial,
    /// The last step applied.
    Step(Step),
}

impl Stage {
    /// Parses a recorded stage name. `"Initial"` maps to [`Stage::Initial`],
    /// everything else goes through [`Step::from_name`].
    pub fn from_name(name: &str) -> Self {
        if name == INITIAL {
            Stage::Initial
        } else {
            Stage::Step(Step::from_name(name))
        }
    }

    /// The stage's name.
    pub fn name(&self) -> &str {
        match self {
            Stage::Initial => INITIAL,
            Stage::Step(step) => step.name(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
