use std::fmt;

use serde::Serialize;

use super::coerce::to_int;
use super::derive::compute_derived;
use super::{WorkoutInput, WorkoutMetrics};

/// Every field-level problem found while processing one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// `Ok(value)` only when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a full set of workout fields and compute the derived metrics.
///
/// Either every field is valid and the persisted shape is returned, or the
/// complete list of problems is.
pub fn normalize(input: &WorkoutInput) -> Result<WorkoutMetrics, ValidationErrors> {
    let (derived, mut errors) = compute_derived(input, ValidationErrors::new());
    let repetitions = to_int(input.repetitions.as_ref(), "repetitions", &mut errors);

    match derived.into_metrics(repetitions) {
        Some(metrics) if errors.is_empty() => Ok(metrics),
        _ => Err(errors),
    }
}
