//! WebAssembly bindings.
//!
//! Accepts and returns plain JS objects shaped like the FFI JSON
//! (`{ stops: [{ x, y, priority }], config }`).

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::exact::SearchStats;
use crate::models::{Point, RouteResult};
use crate::optimizer::{OptimizerConfig, RouteOptimizer};
use crate::report::RoutePlot;
use crate::stratification::stratify_labeled;

#[derive(Deserialize)]
struct WasmStop {
    x: f64,
    y: f64,
    #[serde(default)]
    priority: String,
}

#[derive(Deserialize)]
struct WasmRequest {
    stops: Vec<WasmStop>,
    #[serde(default)]
    config: OptimizerConfig,
}

#[derive(Serialize)]
struct WasmResponse {
    result: RouteResult,
    stats: SearchStats,
    plot: RoutePlot,
}

/// Optimizes a delivery route.
///
/// Throws a JS `Error` on malformed input, unrecognized priority labels,
/// or an aborted search.
#[wasm_bindgen(js_name = optimizeRoute)]
pub fn optimize_route(request: JsValue) -> Result<JsValue, JsValue> {
    let request: WasmRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| js_sys::Error::new(&format!("invalid request: {e}")))?;
    let raw: Vec<(Point, &str)> = request
        .stops
        .iter()
        .map(|s| (Point::new(s.x, s.y), s.priority.as_str()))
        .collect();

    let (result, stats) = stratify_labeled(&raw)
        .and_then(|list| RouteOptimizer::new(request.config).solve(&list))
        .map_err(|e| js_sys::Error::new(&e.to_string()))?;
    let plot = RoutePlot::from_result(&result);

    serde_wasm_bindgen::to_value(&WasmResponse { result, stats, plot })
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

/// Library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
