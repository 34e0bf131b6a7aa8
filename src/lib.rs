use wasm_bindgen::prelude::*;

mod exercises;
pub mod matching;
pub mod notes;
mod pitch;

use matching::types::{Pattern, Tempo};

fn to_js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Match one recorded performance against a pattern.
///
/// `samples` is the full mono capture; `recording_start_time` and
/// `marker_time` are in the capture clock's time base, with the performer
/// expected one beat after the marker. Returns the serialized MatchResult;
/// pass `with_diagnostics` to include per-slice data for the debug panel.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn match_performance(
    pattern_js: JsValue,
    bpm: u32,
    samples: &[f32],
    sample_rate: f64,
    recording_start_time: f64,
    marker_time: f64,
    tolerance: f64,
    with_diagnostics: bool,
) -> Result<JsValue, JsValue> {
    let pattern: Pattern = serde_wasm_bindgen::from_value(pattern_js).map_err(to_js_err)?;
    let result = matching::engine::match_performance(
        &pattern,
        Tempo::new(bpm),
        samples,
        sample_rate,
        recording_start_time,
        marker_time,
        tolerance,
        with_diagnostics,
    )
    .map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&result).map_err(to_js_err)
}

/// Expand a pattern into its per-slice reference frequencies (Hz).
#[wasm_bindgen]
pub fn generate_reference(pattern_js: JsValue, bpm: u32) -> Result<Vec<f64>, JsValue> {
    let pattern: Pattern = serde_wasm_bindgen::from_value(pattern_js).map_err(to_js_err)?;
    matching::reference::generate_reference(&pattern, Tempo::new(bpm)).map_err(to_js_err)
}

/// Autocorrelation pitch detection on a single window. Returns the serialized
/// SliceDetection (frequency-or-none, rms, correlation, reason).
#[wasm_bindgen]
pub fn detect_pitch(samples: &[f32], sample_rate: f64) -> Result<JsValue, JsValue> {
    let detection = pitch::autocorrelate::detect_pitch(samples, sample_rate);
    serde_wasm_bindgen::to_value(&detection).map_err(to_js_err)
}

/// Pick a random pattern from the built-in bank for a category and level.
#[wasm_bindgen]
pub fn random_pattern(category: &str, level: u8) -> Result<JsValue, JsValue> {
    let pattern =
        exercises::catalog::pick(category, level, js_sys::Math::random()).map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&pattern).map_err(to_js_err)
}

/// List the built-in pattern categories and their levels.
#[wasm_bindgen]
pub fn pattern_catalog() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&exercises::catalog::listing()).map_err(to_js_err)
}
