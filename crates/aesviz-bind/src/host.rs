//! Wire shape shared with the host page and the value coercions used to read it.

use aesviz_core::{Grid, Stage, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BindError;

/// State as exchanged with the host: `{data, key, step, round}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostState {
    /// Data grid, `data[row][col]`.
    pub data: Grid,
    /// Key grid, `key[row][col]`.
    pub key: Grid,
    /// Name of the last applied step, or `"Initial"`.
    pub step: String,
    /// Caller-managed round counter.
    pub round: i64,
}

impl From<State> for HostState {
    fn from(state: State) -> Self {
        Self {
            data: state.data,
            key: state.key,
            step: state.current_step.name().to_owned(),
            round: state.current_round,
        }
    }
}

impl From<HostState> for State {
    fn from(host: HostState) -> Self {
        Self {
            data: host.data,
            key: host.key,
            current_step: Stage::from_name(&host.step),
            current_round: host.round,
        }
    }
}

/// Reads an argument as text. JSON strings are taken as-is, anything else is
/// rendered as its JSON text.
pub fn string_arg(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads an integer, truncating fractional numbers toward zero.
pub fn int_arg(value: &Value, field: &str) -> Result<i64, BindError> {
    let number = match value {
        Value::Number(n) => n,
        _ => {
            return Err(BindError::NotANumber {
                field: field.to_owned(),
            })
        }
    };
    if let Some(i) = number.as_i64() {
        Ok(i)
    } else if let Some(u) = number.as_u64() {
        Ok(u as i64)
    } else {
        Ok(number.as_f64().map_or(0, |f| f as i64))
    }
}

/// Reads a 4×4 grid of numbers. Each cell keeps only its low byte.
pub fn grid_arg(value: &Value, field: &str) -> Result<Grid, BindError> {
    let rows = value.as_array().ok_or_else(|| BindError::NotAnArray {
        field: field.to_owned(),
    })?;
    if rows.len() != 4 {
        return Err(BindError::GridShape {
            field: field.to_owned(),
            len: rows.len(),
        });
    }

    let mut grid = [[0u8; 4]; 4];
    for (i, row) in rows.iter().enumerate() {
        let row_field = format!("{field}[{i}]");
        let cells = row.as_array().ok_or_else(|| BindError::NotAnArray {
            field: row_field.clone(),
        })?;
        if cells.len() != 4 {
            return Err(BindError::GridShape {
                field: row_field,
                len: cells.len(),
            });
        }
        for (j, cell) in cells.iter().enumerate() {
            grid[i][j] = int_arg(cell, &format!("{row_field}[{j}]"))? as u8;
        }
    }
    Ok(grid)
}
