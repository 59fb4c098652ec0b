//! # u-delivery
//!
//! Priority-stratified delivery routing. Stops are grouped by priority
//! class (high, medium, low) with the depot fixed first, then an exact
//! search finds the shortest closed tour from the depot through every stop
//! and back.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Point, PriorityClass, Stop, StratifiedStopList, Route, RouteResult)
//! - [`distance`] — Euclidean metric and distance matrix
//! - [`stratification`] — Stable grouping of stops by priority class
//! - [`exact`] — Exhaustive permutation search with deterministic tie-breaking
//! - [`optimizer`] — Stratify-then-search pipeline and its configuration
//! - [`input`] — Interactive stop entry with re-prompting
//! - [`report`] — Text summary and drawing primitives for a route
//! - [`error`] — Error type
//!
//! ## Example
//!
//! ```
//! use u_delivery::models::{Point, PriorityClass, Stop};
//! use u_delivery::optimizer::optimize_route;
//! use u_delivery::report::Summary;
//!
//! let stops = vec![
//!     Stop::depot(Point::new(0.0, 0.0)),
//!     Stop::delivery(Point::new(1.0, 0.0), PriorityClass::High),
//!     Stop::delivery(Point::new(0.0, 1.0), PriorityClass::Low),
//!     Stop::delivery(Point::new(1.0, 1.0), PriorityClass::Medium),
//! ];
//! let result = optimize_route(&stops).unwrap();
//! assert!(Summary(&result).to_string().ends_with("Total Distance: 4.00 units"));
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: multi-threaded search via rayon (same result as sequential)
//! - `ffi`: C ABI with JSON requests and responses
//! - `wasm`: wasm-bindgen export
//! - `cli`: the `route-planner` interactive binary

pub mod distance;
pub mod error;
pub mod exact;
pub mod input;
pub mod models;
pub mod optimizer;
pub mod report;
pub mod stratification;

#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
