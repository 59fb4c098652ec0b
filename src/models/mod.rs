//! Domain model types for delivery routing.
//!
//! Provides planar points, priority classes, stops (the depot or a
//! prioritized delivery), the stratified stop list the search runs over,
//! and the closed tour it returns.

mod point;
mod priority;
mod route;
mod stop;

pub use point::Point;
pub use priority::{PriorityClass, StopKind};
pub use route::{Route, RouteResult};
pub use stop::{Stop, StratifiedStopList};
