//! JavaScript exports. Arguments cross the boundary as a JSON array and
//! results come back as JSON text.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init from a reloaded module is harmless.
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("aesviz wasm module ready");
}

/// `initAESState(JSON.stringify([text, key]))`
#[wasm_bindgen(js_name = initAESState)]
pub fn init_aes_state(args_json: &str) -> String {
    crate::init_state_json(args_json)
}

/// `performAESStep(JSON.stringify([data, key, currentStep, currentRound, stepName]))`
#[wasm_bindgen(js_name = performAESStep)]
pub fn perform_aes_step(args_json: &str) -> String {
    crate::perform_step_json(args_json)
}
