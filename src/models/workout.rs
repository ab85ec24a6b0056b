use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::metrics::WorkoutMetrics;

#[derive(Debug, Clone, Serialize)]
pub struct Workout {
    pub id: String,
    pub exercise_id: i64,
    pub exercise_name: Option<String>,
    pub client_id: String,
    #[serde(flatten)]
    pub metrics: WorkoutMetrics,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            exercise_id: row.get("exercise_id")?,
            exercise_name: row.get("exercise_name")?,
            client_id: row.get("client_id")?,
            metrics: WorkoutMetrics::from_row(row)?,
            created_at: row.get("created_at")?,
        })
    }
}

impl FromSqliteRow for WorkoutMetrics {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            units: row.get("units")?,
            rm: row.get("rm")?,
            rm_percentage: row.get("rm_percentage")?,
            max_repetitions: row.get("max_repetitions")?,
            rir_repetitions: row.get("rir_repetitions")?,
            cc_tempo: row.get("cc_tempo")?,
            iso_tempo_one: row.get("iso_tempo_one")?,
            ecc_tempo: row.get("ecc_tempo")?,
            iso_tempo_two: row.get("iso_tempo_two")?,
            reps: row.get("reps")?,
            sets: row.get("sets")?,
            exercise_time: row.get("exercise_time")?,
            rom: row.get("rom")?,
            weight: row.get("weight")?,
            repetitions: row.get("repetitions")?,
            total_tempo: row.get("total_tempo")?,
            tut: row.get("tut")?,
            total_rest: row.get("total_rest")?,
            density: row.get("density")?,
        })
    }
}

/// Listing filter; `limit` is clamped to 1..=200.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutFilter {
    pub client_id: Option<String>,
    pub exercise_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl WorkoutFilter {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 200;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
