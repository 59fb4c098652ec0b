//! Priority stratification.
//!
//! Groups delivery stops by [`PriorityClass`](crate::models::PriorityClass)
//! ahead of the exact search, so the stop list handed to the solver is
//! ordered high, medium, low with the depot pinned at position 0.

mod stratify;

pub use stratify::{class_counts, stratify, stratify_labeled};
