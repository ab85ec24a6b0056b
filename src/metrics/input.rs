use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use super::WorkoutMetrics;

/// Keep a key that was sent as `null` distinguishable from one that was never
/// sent: the former becomes `Some(Value::Null)`, the latter stays `None`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Raw workout fields as received at the boundary.
///
/// Only whitelisted keys are captured; anything else in the request body is
/// ignored. Values are kept untyped until they go through [`super::coerce`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkoutInput {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub client_id: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub exercise_id: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub units: Option<Value>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub rm: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub rm_percentage: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub max_repetitions: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub rir_repetitions: Option<Value>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub cc_tempo: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub iso_tempo_one: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub ecc_tempo: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub iso_tempo_two: Option<Value>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub reps: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub sets: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub exercise_time: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub rom: Option<Value>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub weight: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub repetitions: Option<Value>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub total_tempo: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub tut: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub total_rest: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub density: Option<Value>,

    /// Convenience input: when present, `total_rest` is derived from it.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub rest_per_set: Option<Value>,
}

impl WorkoutInput {
    /// Whether the payload names any field that feeds the derived metrics.
    pub fn touches_metrics(&self) -> bool {
        [
            &self.cc_tempo,
            &self.iso_tempo_one,
            &self.ecc_tempo,
            &self.iso_tempo_two,
            &self.reps,
            &self.sets,
            &self.weight,
            &self.total_rest,
            &self.tut,
            &self.total_tempo,
            &self.rm,
            &self.rm_percentage,
            &self.max_repetitions,
            &self.rir_repetitions,
            &self.exercise_time,
            &self.rom,
            &self.rest_per_set,
        ]
        .iter()
        .any(|field| field.is_some())
    }

    /// Field-by-field overlay: every key present in `patch` wins, including an
    /// explicit `null`.
    pub fn overlay(self, patch: &WorkoutInput) -> WorkoutInput {
        fn pick(patch: &Option<Value>, base: Option<Value>) -> Option<Value> {
            patch.clone().or(base)
        }

        WorkoutInput {
            client_id: pick(&patch.client_id, self.client_id),
            exercise_id: pick(&patch.exercise_id, self.exercise_id),
            units: pick(&patch.units, self.units),
            rm: pick(&patch.rm, self.rm),
            rm_percentage: pick(&patch.rm_percentage, self.rm_percentage),
            max_repetitions: pick(&patch.max_repetitions, self.max_repetitions),
            rir_repetitions: pick(&patch.rir_repetitions, self.rir_repetitions),
            cc_tempo: pick(&patch.cc_tempo, self.cc_tempo),
            iso_tempo_one: pick(&patch.iso_tempo_one, self.iso_tempo_one),
            ecc_tempo: pick(&patch.ecc_tempo, self.ecc_tempo),
            iso_tempo_two: pick(&patch.iso_tempo_two, self.iso_tempo_two),
            reps: pick(&patch.reps, self.reps),
            sets: pick(&patch.sets, self.sets),
            exercise_time: pick(&patch.exercise_time, self.exercise_time),
            rom: pick(&patch.rom, self.rom),
            weight: pick(&patch.weight, self.weight),
            repetitions: pick(&patch.repetitions, self.repetitions),
            total_tempo: pick(&patch.total_tempo, self.total_tempo),
            tut: pick(&patch.tut, self.tut),
            total_rest: pick(&patch.total_rest, self.total_rest),
            density: pick(&patch.density, self.density),
            rest_per_set: pick(&patch.rest_per_set, self.rest_per_set),
        }
    }
}

impl From<&WorkoutMetrics> for WorkoutInput {
    fn from(metrics: &WorkoutMetrics) -> Self {
        WorkoutInput {
            client_id: None,
            exercise_id: None,
            units: Some(json!(metrics.units)),
            rm: Some(json!(metrics.rm)),
            rm_percentage: Some(json!(metrics.rm_percentage)),
            max_repetitions: Some(json!(metrics.max_repetitions)),
            rir_repetitions: Some(json!(metrics.rir_repetitions)),
            cc_tempo: Some(json!(metrics.cc_tempo)),
            iso_tempo_one: Some(json!(metrics.iso_tempo_one)),
            ecc_tempo: Some(json!(metrics.ecc_tempo)),
            iso_tempo_two: Some(json!(metrics.iso_tempo_two)),
            reps: Some(json!(metrics.reps)),
            sets: Some(json!(metrics.sets)),
            exercise_time: Some(json!(metrics.exercise_time)),
            rom: Some(json!(metrics.rom)),
            weight: Some(json!(metrics.weight)),
            repetitions: Some(json!(metrics.repetitions)),
            total_tempo: Some(json!(metrics.total_tempo)),
            tut: Some(json!(metrics.tut)),
            total_rest: Some(json!(metrics.total_rest)),
            density: Some(json!(metrics.density)),
            rest_per_set: None,
        }
    }
}
