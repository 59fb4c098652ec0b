//! C FFI interface.
//!
//! Requests and responses are JSON strings.
//!
//! ## Request
//!
//! ```json
//! {
//!   "stops": [
//!     { "x": 0, "y": 0 },
//!     { "x": 1, "y": 0, "priority": "high" },
//!     { "x": 0, "y": 1, "priority": "low" }
//!   ],
//!   "config": { "parallel": false, "limits": { "max_tours": 1000000 } }
//! }
//! ```
//!
//! The first stop is the depot; its priority is ignored.
//!
//! ## Error Codes
//!
//! | Code | Constant | Meaning |
//! |------|----------|---------|
//! | 0 | `UDELIVERY_OK` | Success |
//! | -1 | `UDELIVERY_ERR_NULL_PTR` | Null pointer passed |
//! | -2 | `UDELIVERY_ERR_INVALID_JSON` | Invalid JSON input |
//! | -3 | `UDELIVERY_ERR_SOLVE_FAILED` | Invalid stops or search aborted |
//! | -99 | `UDELIVERY_ERR_UNKNOWN` | Unknown error |

use std::ffi::{CStr, CString};

use libc::c_char;
use serde::{Deserialize, Serialize};

use crate::exact::SearchStats;
use crate::models::{Point, RouteResult};
use crate::optimizer::{OptimizerConfig, RouteOptimizer};

/// Error codes.
pub const UDELIVERY_OK: i32 = 0;
pub const UDELIVERY_ERR_NULL_PTR: i32 = -1;
pub const UDELIVERY_ERR_INVALID_JSON: i32 = -2;
pub const UDELIVERY_ERR_SOLVE_FAILED: i32 = -3;
pub const UDELIVERY_ERR_UNKNOWN: i32 = -99;

/// One stop in a request.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRequest {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub priority: String,
}

/// A routing request.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub stops: Vec<StopRequest>,
    #[serde(default)]
    pub config: OptimizerConfig,
}

/// A routing response.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RouteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            stats: None,
            error: Some(message.into()),
        }
    }
}

/// Parses a JSON request and runs the optimizer.
pub fn optimize_json(request_json: &str) -> RouteResponse {
    match serde_json::from_str(request_json) {
        Ok(request) => optimize_request(request),
        Err(e) => RouteResponse::failure(format!("invalid request: {e}")),
    }
}

/// Runs the optimizer on a parsed request.
pub fn optimize_request(request: RouteRequest) -> RouteResponse {
    let raw: Vec<(Point, &str)> = request
        .stops
        .iter()
        .map(|s| (Point::new(s.x, s.y), s.priority.as_str()))
        .collect();

    let optimizer = RouteOptimizer::new(request.config);
    let outcome = crate::stratification::stratify_labeled(&raw)
        .and_then(|list| optimizer.solve(&list));
    match outcome {
        Ok((result, stats)) => RouteResponse {
            success: true,
            result: Some(result),
            stats: Some(stats),
            error: None,
        },
        Err(e) => RouteResponse::failure(e.to_string()),
    }
}

/// Optimizes a delivery route from a JSON request.
///
/// # Safety
/// - `request_json` must be a valid null-terminated UTF-8 string
/// - `result_ptr` must be a valid pointer to a `*mut c_char`
/// - The caller must free the result string using `udelivery_free_string`
#[no_mangle]
pub unsafe extern "C" fn udelivery_optimize(
    request_json: *const c_char,
    result_ptr: *mut *mut c_char,
) -> i32 {
    if request_json.is_null() || result_ptr.is_null() {
        return UDELIVERY_ERR_NULL_PTR;
    }

    let json_str = match CStr::from_ptr(request_json).to_str() {
        Ok(s) => s,
        Err(_) => return UDELIVERY_ERR_INVALID_JSON,
    };
    let request: RouteRequest = match serde_json::from_str(json_str) {
        Ok(r) => r,
        Err(_) => return UDELIVERY_ERR_INVALID_JSON,
    };

    let response = optimize_request(request);
    let response_json = match serde_json::to_string(&response) {
        Ok(s) => s,
        Err(_) => return UDELIVERY_ERR_UNKNOWN,
    };

    match CString::new(response_json) {
        Ok(cstr) => {
            *result_ptr = cstr.into_raw();
            if response.success {
                UDELIVERY_OK
            } else {
                UDELIVERY_ERR_SOLVE_FAILED
            }
        }
        Err(_) => UDELIVERY_ERR_UNKNOWN,
    }
}

/// Frees a string returned by [`udelivery_optimize`].
///
/// # Safety
/// `ptr` must come from this library and must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn udelivery_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Returns the library version as a static null-terminated string.
#[no_mangle]
pub extern "C" fn udelivery_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
