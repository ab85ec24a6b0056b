//! Derived training metrics.
//!
//! Order matters: `total_tempo` feeds `tut`, and `tut` plus `total_rest`
//! feed `density`. When an input is missing the derived value falls back to
//! whatever the caller supplied (or 0) without adding an error of its own;
//! the missing input has already been reported by the coercion step. When
//! every input resolved but the arithmetic overflows, an out-of-range error
//! is recorded instead so the record is rejected.

use serde::Serialize;

use super::coerce::{is_blank, lenient_int, parse_int, to_float, to_int, to_units};
use super::{ValidationErrors, WorkoutInput};

/// Fully validated workout numbers, in the shape they are stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutMetrics {
    pub units: String,
    pub rm: i64,
    pub rm_percentage: i64,
    pub max_repetitions: i64,
    pub rir_repetitions: i64,
    pub cc_tempo: i64,
    pub iso_tempo_one: i64,
    pub ecc_tempo: i64,
    pub iso_tempo_two: i64,
    pub reps: i64,
    pub sets: i64,
    pub exercise_time: i64,
    pub rom: i64,
    pub weight: f64,
    pub repetitions: i64,
    pub total_tempo: i64,
    pub tut: i64,
    pub total_rest: i64,
    pub density: f64,
}

/// Result of [`compute_derived`]. Atomic inputs that failed coercion are
/// `None`; derived values are always populated.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedWorkout {
    pub units: Option<String>,
    pub rm: Option<i64>,
    pub rm_percentage: Option<i64>,
    pub max_repetitions: Option<i64>,
    pub rir_repetitions: Option<i64>,
    pub cc_tempo: Option<i64>,
    pub iso_tempo_one: Option<i64>,
    pub ecc_tempo: Option<i64>,
    pub iso_tempo_two: Option<i64>,
    pub reps: Option<i64>,
    pub sets: Option<i64>,
    pub exercise_time: Option<i64>,
    pub rom: Option<i64>,
    pub weight: Option<f64>,
    pub total_tempo: i64,
    pub tut: i64,
    pub total_rest: i64,
    pub density: f64,
}

impl DerivedWorkout {
    pub fn into_metrics(self, repetitions: Option<i64>) -> Option<WorkoutMetrics> {
        Some(WorkoutMetrics {
            units: self.units?,
            rm: self.rm?,
            rm_percentage: self.rm_percentage?,
            max_repetitions: self.max_repetitions?,
            rir_repetitions: self.rir_repetitions?,
            cc_tempo: self.cc_tempo?,
            iso_tempo_one: self.iso_tempo_one?,
            ecc_tempo: self.ecc_tempo?,
            iso_tempo_two: self.iso_tempo_two?,
            reps: self.reps?,
            sets: self.sets?,
            exercise_time: self.exercise_time?,
            rom: self.rom?,
            weight: self.weight?,
            repetitions: repetitions?,
            total_tempo: self.total_tempo,
            tut: self.tut,
            total_rest: self.total_rest,
            density: self.density,
        })
    }
}

/// Coerce every input field and compute the derived metrics.
///
/// All fields are attempted even after a failure, so `errors` ends up with one
/// entry per bad field. Nothing here panics on bad input.
pub fn compute_derived(
    input: &WorkoutInput,
    mut errors: ValidationErrors,
) -> (DerivedWorkout, ValidationErrors) {
    let cc_tempo = to_int(input.cc_tempo.as_ref(), "cc_tempo", &mut errors);
    let iso_tempo_one = to_int(input.iso_tempo_one.as_ref(), "iso_tempo_one", &mut errors);
    let ecc_tempo = to_int(input.ecc_tempo.as_ref(), "ecc_tempo", &mut errors);
    let iso_tempo_two = to_int(input.iso_tempo_two.as_ref(), "iso_tempo_two", &mut errors);
    let reps = to_int(input.reps.as_ref(), "reps", &mut errors);
    let sets = to_int(input.sets.as_ref(), "sets", &mut errors);
    let weight = to_float(input.weight.as_ref(), "weight", &mut errors);

    let rm = to_int(input.rm.as_ref(), "rm", &mut errors);
    let rm_percentage = to_int(input.rm_percentage.as_ref(), "rm_percentage", &mut errors);
    let max_repetitions = to_int(input.max_repetitions.as_ref(), "max_repetitions", &mut errors);
    let rir_repetitions = to_int(input.rir_repetitions.as_ref(), "rir_repetitions", &mut errors);
    let exercise_time = match input.exercise_time.as_ref() {
        None => Some(0),
        raw => to_int(raw, "exercise_time", &mut errors),
    };
    let rom = to_int(input.rom.as_ref(), "rom", &mut errors);

    let units = to_units(input.units.as_ref(), &mut errors);

    let tempo_resolved = [cc_tempo, iso_tempo_one, ecc_tempo, iso_tempo_two]
        .iter()
        .all(Option::is_some);
    let total_tempo = match total_tempo(cc_tempo, iso_tempo_one, ecc_tempo, iso_tempo_two) {
        Some(sum) => sum,
        None if tempo_resolved => {
            errors.push("total_tempo is out of range");
            0
        }
        None => lenient_int(input.total_tempo.as_ref()).unwrap_or(0),
    };

    let tut = match time_under_tension(total_tempo, reps, sets) {
        Some(product) => product,
        None if tempo_resolved && reps.is_some() && sets.is_some() => {
            errors.push("tut is out of range");
            0
        }
        None => lenient_int(input.tut.as_ref()).unwrap_or(0),
    };

    let total_rest = total_rest(input, sets, &mut errors);

    let density = density(weight, reps, sets, tut, total_rest).unwrap_or_else(|| {
        errors.push("density is out of range");
        0.0
    });

    let derived = DerivedWorkout {
        units,
        rm,
        rm_percentage,
        max_repetitions,
        rir_repetitions,
        cc_tempo,
        iso_tempo_one,
        ecc_tempo,
        iso_tempo_two,
        reps,
        sets,
        exercise_time,
        rom,
        weight,
        total_tempo,
        tut,
        total_rest,
        density,
    };

    (derived, errors)
}

/// Sum of the four tempo phases, or `None` if any phase is unresolved.
pub fn total_tempo(
    cc_tempo: Option<i64>,
    iso_tempo_one: Option<i64>,
    ecc_tempo: Option<i64>,
    iso_tempo_two: Option<i64>,
) -> Option<i64> {
    cc_tempo?
        .checked_add(iso_tempo_one?)?
        .checked_add(ecc_tempo?)?
        .checked_add(iso_tempo_two?)
}

pub fn time_under_tension(total_tempo: i64, reps: Option<i64>, sets: Option<i64>) -> Option<i64> {
    total_tempo.checked_mul(reps?)?.checked_mul(sets?)
}

/// Rest between sets: there is no rest after the last set. `None` on
/// overflow.
pub fn rest_from_per_set(sets: Option<i64>, rest_per_set: i64) -> Option<i64> {
    let intervals = sets.unwrap_or(0).saturating_sub(1).max(0);
    intervals.checked_mul(rest_per_set)
}

fn total_rest(input: &WorkoutInput, sets: Option<i64>, errors: &mut ValidationErrors) -> i64 {
    if !is_blank(input.rest_per_set.as_ref()) {
        return match input.rest_per_set.as_ref().and_then(parse_int) {
            Some(per_set) => rest_from_per_set(sets, per_set).unwrap_or_else(|| {
                errors.push("total_rest is out of range");
                0
            }),
            None => {
                errors.push("rest_per_set must be an integer if provided");
                0
            }
        };
    }

    match input.total_rest.as_ref() {
        None => 0,
        Some(raw) => parse_int(raw).unwrap_or_else(|| {
            errors.push("total_rest must be an integer");
            0
        }),
    }
}

/// Work per unit of time, rounded to two decimals. A non-positive
/// denominator yields `0.0`; `None` when the result is not a finite number.
pub fn density(
    weight: Option<f64>,
    reps: Option<i64>,
    sets: Option<i64>,
    tut: i64,
    total_rest: i64,
) -> Option<f64> {
    let denominator = tut as f64 + total_rest as f64;
    if denominator <= 0.0 {
        return Some(0.0);
    }

    let work = weight.unwrap_or(0.0) * reps.unwrap_or(0) as f64 * sets.unwrap_or(0) as f64;
    let density = round2(work / denominator);
    density.is_finite().then_some(density)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
