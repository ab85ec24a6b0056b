//! Partial updates against a persisted workout.
//!
//! The patch is laid over every stored value before anything is recomputed,
//! so a patch that only touches `reps` still sees the stored tempo phases.

use super::coerce::{to_int, to_units};
use super::validation::normalize;
use super::{ValidationErrors, WorkoutInput, WorkoutMetrics};

/// Seed a full input from the stored record and overlay the patch on top.
pub fn merge(current: &WorkoutMetrics, patch: &WorkoutInput) -> WorkoutInput {
    WorkoutInput::from(current).overlay(patch)
}

/// Produce the next stored state for `current` after applying `patch`.
///
/// Patches that name a metric input are merged and fully revalidated. Other
/// patches leave the derived metrics as stored and only validate the plain
/// fields they carry.
pub fn apply_patch(
    current: &WorkoutMetrics,
    patch: &WorkoutInput,
) -> Result<WorkoutMetrics, ValidationErrors> {
    if patch.touches_metrics() {
        return normalize(&merge(current, patch));
    }

    let mut errors = ValidationErrors::new();
    let mut next = current.clone();

    if patch.units.is_some() {
        if let Some(units) = to_units(patch.units.as_ref(), &mut errors) {
            next.units = units;
        }
    }
    if patch.repetitions.is_some() {
        if let Some(repetitions) = to_int(patch.repetitions.as_ref(), "repetitions", &mut errors) {
            next.repetitions = repetitions;
        }
    }

    errors.into_result(next)
}
