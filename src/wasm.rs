//! Expose the `realtime_ot` crate's functionality to WebAssembly. Operations
//! and documents cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::Operation;

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

#[derive(Serialize)]
struct TransformedPair {
    server: Operation,
    client: Operation,
}

/// WASM wrapper around `crate::transform`. Takes a server and a client
/// operation as JSON and returns `{"server": .., "client": ..}` holding the
/// transformed operations.
///
/// # Errors
///
/// If either operation cannot be parsed or if the operations cannot be
/// transformed against each other.
#[wasm_bindgen(js_name = transform)]
pub fn transform(server: &str, client: &str) -> Result<String, JsError> {
    set_panic_hook();

    let server: Operation = serde_json::from_str(server)?;
    let client: Operation = serde_json::from_str(client)?;
    let (server, client) = crate::transform(server, client)?;

    Ok(serde_json::to_string(&TransformedPair { server, client })?)
}

/// WASM wrapper around `crate::apply`. Takes a document and an operation as
/// JSON and returns the updated document.
///
/// # Errors
///
/// If the inputs cannot be parsed or the operation doesn't fit the
/// document.
#[wasm_bindgen(js_name = applyOperation)]
pub fn apply_operation(document: &str, operation: &str) -> Result<String, JsError> {
    set_panic_hook();

    let mut document: serde_json::Value = serde_json::from_str(document)?;
    let operation: Operation = serde_json::from_str(operation)?;
    crate::apply(&mut document, &operation)?;

    Ok(serde_json::to_string(&document)?)
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
