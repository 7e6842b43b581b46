#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `gcodesim` WASM module: G-code motion interpretation into renderable segments.

pub mod config;
pub mod error;
pub mod gcode;
pub mod toolpath;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::config::InterpreterConfig;
use crate::toolpath::{MachineState, Toolpath, ToolpathMeta};

thread_local! {
    static LAST_TOOLPATH: RefCell<Option<Toolpath>> = const { RefCell::new(None) };
}

fn store_toolpath(path: Toolpath) {
    LAST_TOOLPATH.with(|p| {
        *p.borrow_mut() = Some(path);
    });
}

#[cfg(target_arch = "wasm32")]
fn report_warnings(warnings: &[String]) {
    for warning in warnings {
        web_sys::console::warn_1(&JsValue::from_str(warning));
    }
}

#[cfg(not(target_arch = "wasm32"))]
const fn report_warnings(_warnings: &[String]) {}

/// Initialize the WASM module. Sets up the panic hook for debugging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Interpret a G-code program and store the resulting toolpath.
///
/// Returns `ToolpathMeta` as a `JsValue` via `serde-wasm-bindgen`.
/// Segment buffers are stored internally; retrieve with
/// [`get_segment_positions`], [`get_segment_kinds`] and [`get_segments`].
///
/// # Errors
///
/// Returns a descriptive error string naming the failing line.
#[wasm_bindgen]
pub fn interpret_program(source: &str) -> Result<JsValue, JsValue> {
    let meta = interpret_program_internal(source, InterpreterConfig::default())
        .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&meta).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Like [`interpret_program`], with an `InterpreterConfig`-shaped JS object.
///
/// Missing fields fall back to their defaults.
///
/// # Errors
///
/// Returns a descriptive error string if the config cannot be read or the
/// program fails to interpret.
#[wasm_bindgen]
pub fn interpret_program_with_config(source: &str, config: JsValue) -> Result<JsValue, JsValue> {
    let config: InterpreterConfig = if config.is_undefined() || config.is_null() {
        InterpreterConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let meta = interpret_program_internal(source, config).map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&meta).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal interpretation logic shared between the wasm exports and native tests.
#[doc(hidden)]
pub fn interpret_program_internal(
    source: &str,
    config: InterpreterConfig,
) -> Result<ToolpathMeta, String> {
    let path = toolpath::interpret(source.lines(), MachineState::default(), &config)
        .map_err(|e| e.to_string())?;

    report_warnings(&path.warnings);
    let meta = path.meta();
    store_toolpath(path);

    Ok(meta)
}

/// Retrieve segment endpoints for the last interpreted program.
///
/// Returns interleaved `[x0, y0, x1, y1, ...]`, two vertices per segment.
/// Returns an empty array if nothing has been interpreted yet.
#[wasm_bindgen]
pub fn get_segment_positions() -> Vec<f32> {
    LAST_TOOLPATH.with(|p| {
        p.borrow()
            .as_ref()
            .map_or_else(Vec::new, Toolpath::positions)
    })
}

/// Retrieve one kind code per segment for the last interpreted program.
///
/// Codes equal the G number: 0 rapid, 1 linear, 2 clockwise, 3 counter-clockwise.
#[wasm_bindgen]
pub fn get_segment_kinds() -> Vec<u8> {
    LAST_TOOLPATH.with(|p| {
        p.borrow()
            .as_ref()
            .map_or_else(Vec::new, Toolpath::kind_codes)
    })
}

/// Retrieve the full segment list of the last interpreted program.
///
/// # Errors
///
/// Returns an error string if serialization fails.
#[wasm_bindgen]
pub fn get_segments() -> Result<JsValue, JsValue> {
    LAST_TOOLPATH.with(|p| {
        let borrowed = p.borrow();
        let segments = borrowed
            .as_ref()
            .map_or(&[][..], |path| path.segments.as_slice());
        serde_wasm_bindgen::to_value(segments).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}
