//! Workout metric derivation and validation.
//!
//! Pure and synchronous: nothing in here touches the database or the request.

pub mod coerce;
pub mod derive;
pub mod input;
pub mod merge;
pub mod validation;

pub use derive::{compute_derived, DerivedWorkout, WorkoutMetrics};
pub use input::WorkoutInput;
pub use merge::{apply_patch, merge};
pub use validation::{normalize, ValidationErrors};
