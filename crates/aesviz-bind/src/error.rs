/// Reasons a host call cannot be served.
#[derive(thiserror::Error, Debug)]
pub enum BindError {
    /// Wrong number of arguments. The message is kept verbatim since hosts
    /// match on it.
    #[error("Invalid number of arguments")]
    Arity {
        /// Arguments the function takes.
        expected: usize,
        /// Arguments received.
        got: usize,
    },

    /// A grid or grid row is not an array.
    #[error("{field} must be an array")]
    NotAnArray {
        /// Path of the offending value, e.g. `data[2]`.
        field: String,
    },

    /// A grid or grid row does not have exactly four entries.
    #[error("{field} must hold 4 values, found {len}")]
    GridShape {
        /// Path of the offending value.
        field: String,
        /// Entries found.
        len: usize,
    },

    /// A grid cell or the round is not a number.
    #[error("{field} is not a number")]
    NotANumber {
        /// Path of the offending value.
        field: String,
    },

    /// The argument list is not valid JSON.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
