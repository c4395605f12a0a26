//! Host boundary for the aesviz step engine.
//!
//! Host pages call two functions with loosely typed argument lists:
//! `initAESState(text, key)` and
//! `performAESStep(data, key, currentStep, currentRound, stepName)`.
//! Both return `{data, key, step, round}`, or a plain error string when the
//! arguments cannot be used. This crate does the marshaling over
//! [`serde_json::Value`] so the engine itself stays free of any host runtime.
//! With the `wasm` feature the same functions are exported to JavaScript.

#![deny(missing_docs)]

mod error;
mod host;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod wasm;

use serde_json::Value;

pub use crate::error::BindError;
pub use crate::host::{grid_arg, int_arg, string_arg, HostState};

/// Arguments taken by [`init_state`].
pub const INIT_ARITY: usize = 2;
/// Arguments taken by [`perform_step`].
pub const STEP_ARITY: usize = 5;

/// Builds the initial state from `[text, key]`.
pub fn try_init_state(args: &[Value]) -> Result<HostState, BindError> {
    check_arity(args, INIT_ARITY)?;
    let text = string_arg(&args[0]);
    let key = string_arg(&args[1]);
    Ok(aesviz_core::init_state(&text, &key).into())
}

/// Applies a step to `[data, key, currentStep, currentRound, stepName]`.
pub fn try_perform_step(args: &[Value]) -> Result<HostState, BindError> {
    check_arity(args, STEP_ARITY)?;
    let host = HostState {
        data: grid_arg(&args[0], "data")?,
        key: grid_arg(&args[1], "key")?,
        step: string_arg(&args[2]),
        round: int_arg(&args[3], "round")?,
    };
    let step = string_arg(&args[4]);
    Ok(aesviz_core::apply_step(host.into(), &step).into())
}

/// [`try_init_state`] with errors folded into a string value.
pub fn init_state(args: &[Value]) -> Value {
    respond(try_init_state(args))
}

/// [`try_perform_step`] with errors folded into a string value.
pub fn perform_step(args: &[Value]) -> Value {
    respond(try_perform_step(args))
}

/// [`init_state`] over JSON text: `args_json` is a JSON array of arguments.
pub fn init_state_json(args_json: &str) -> String {
    call_json(args_json, init_state)
}

/// [`perform_step`] over JSON text: `args_json` is a JSON array of arguments.
pub fn perform_step_json(args_json: &str) -> String {
    call_json(args_json, perform_step)
}

fn check_arity(args: &[Value], expected: usize) -> Result<(), BindError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(BindError::Arity {
            expected,
            got: args.len(),
        })
    }
}

fn respond(result: Result<HostState, BindError>) -> Value {
    match result.and_then(|state| serde_json::to_value(state).map_err(BindError::from)) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("rejecting host call: {err:?}");
            Value::String(err.to_string())
        }
    }
}

fn call_json(args_json: &str, f: fn(&[Value]) -> Value) -> String {
    let value = match serde_json::from_str::<Vec<Value>>(args_json) {
        Ok(args) => f(&args),
        Err(err) => {
            log::warn!("unparsable host arguments: {err}");
            Value::String(BindError::from(err).to_string())
        }
    };
    value.to_string()
}
