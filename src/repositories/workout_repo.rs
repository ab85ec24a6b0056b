use chrono::Utc;
use rusqlite::{named_params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::metrics::WorkoutMetrics;
use crate::models::{FromSqliteRow, Workout, WorkoutFilter};

const SELECT_WORKOUT: &str = "SELECT w.*, e.name AS exercise_name
     FROM workouts w
     LEFT JOIN exercises e ON e.id = w.exercise_id";

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

fn fetch_one(conn: &Connection, id: &str) -> rusqlite::Result<Option<Workout>> {
    let sql = format!("{} WHERE w.id = ?", SELECT_WORKOUT);
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([id], Workout::from_row).optional()
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            Ok(fetch_one(&conn, &id)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Newest first.
    pub async fn list(&self, filter: &WorkoutFilter) -> Result<Vec<Workout>> {
        let pool = self.pool.clone();
        let filter = filter.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sql = format!(
                "{} WHERE (?1 IS NULL OR w.client_id = ?1)
                   AND (?2 IS NULL OR w.exercise_id = ?2)
                 ORDER BY w.rowid DESC
                 LIMIT ?3 OFFSET ?4",
                SELECT_WORKOUT
            );
            let mut stmt = conn.prepare(&sql)?;
            let workouts = stmt
                .query_map(
                    rusqlite::params![
                        filter.client_id,
                        filter.exercise_id,
                        filter.limit(),
                        filter.offset()
                    ],
                    Workout::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_client(&self, client_id: &str) -> Result<Vec<Workout>> {
        let pool = self.pool.clone();
        let client_id = client_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sql = format!(
                "{} WHERE w.client_id = ? ORDER BY w.rowid DESC",
                SELECT_WORKOUT
            );
            let mut stmt = conn.prepare(&sql)?;
            let workouts = stmt
                .query_map([&client_id], Workout::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(
        &self,
        client_id: &str,
        exercise_id: i64,
        metrics: &WorkoutMetrics,
    ) -> Result<Workout> {
        let pool = self.pool.clone();
        let id = Uuid::new_v4().to_string();
        let client_id = client_id.to_string();
        let metrics = metrics.clone();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workouts (
                    id, exercise_id, client_id, units, rm, rm_percentage,
                    max_repetitions, rir_repetitions, cc_tempo, iso_tempo_one,
                    ecc_tempo, iso_tempo_two, reps, sets, exercise_time, rom,
                    weight, repetitions, total_tempo, tut, total_rest, density,
                    created_at
                 ) VALUES (
                    :id, :exercise_id, :client_id, :units, :rm, :rm_percentage,
                    :max_repetitions, :rir_repetitions, :cc_tempo, :iso_tempo_one,
                    :ecc_tempo, :iso_tempo_two, :reps, :sets, :exercise_time, :rom,
                    :weight, :repetitions, :total_tempo, :tut, :total_rest, :density,
                    :created_at
                 )",
                named_params! {
                    ":id": id,
                    ":exercise_id": exercise_id,
                    ":client_id": client_id,
                    ":units": metrics.units,
                    ":rm": metrics.rm,
                    ":rm_percentage": metrics.rm_percentage,
                    ":max_repetitions": metrics.max_repetitions,
                    ":rir_repetitions": metrics.rir_repetitions,
                    ":cc_tempo": metrics.cc_tempo,
                    ":iso_tempo_one": metrics.iso_tempo_one,
                    ":ecc_tempo": metrics.ecc_tempo,
                    ":iso_tempo_two": metrics.iso_tempo_two,
                    ":reps": metrics.reps,
                    ":sets": metrics.sets,
                    ":exercise_time": metrics.exercise_time,
                    ":rom": metrics.rom,
                    ":weight": metrics.weight,
                    ":repetitions": metrics.repetitions,
                    ":total_tempo": metrics.total_tempo,
                    ":tut": metrics.tut,
                    ":total_rest": metrics.total_rest,
                    ":density": metrics.density,
                    ":created_at": now,
                },
            )?;

            fetch_one(&conn, &id)?
                .ok_or_else(|| AppError::Internal(format!("workout {} vanished after insert", id)))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Overwrites every stored column. Returns `None` when the row is gone.
    pub async fn update(
        &self,
        id: &str,
        client_id: &str,
        exercise_id: i64,
        metrics: &WorkoutMetrics,
    ) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let client_id = client_id.to_string();
        let metrics = metrics.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE workouts SET
                    exercise_id = :exercise_id, client_id = :client_id,
                    units = :units, rm = :rm, rm_percentage = :rm_percentage,
                    max_repetitions = :max_repetitions, rir_repetitions = :rir_repetitions,
                    cc_tempo = :cc_tempo, iso_tempo_one = :iso_tempo_one,
                    ecc_tempo = :ecc_tempo, iso_tempo_two = :iso_tempo_two,
                    reps = :reps, sets = :sets, exercise_time = :exercise_time,
                    rom = :rom, weight = :weight, repetitions = :repetitions,
                    total_tempo = :total_tempo, tut = :tut, total_rest = :total_rest,
                    density = :density
                 WHERE id = :id",
                named_params! {
                    ":id": id,
                    ":exercise_id": exercise_id,
                    ":client_id": client_id,
                    ":units": metrics.units,
                    ":rm": metrics.rm,
                    ":rm_percentage": metrics.rm_percentage,
                    ":max_repetitions": metrics.max_repetitions,
                    ":rir_repetitions": metrics.rir_repetitions,
                    ":cc_tempo": metrics.cc_tempo,
                    ":iso_tempo_one": metrics.iso_tempo_one,
                    ":ecc_tempo": metrics.ecc_tempo,
                    ":iso_tempo_two": metrics.iso_tempo_two,
                    ":reps": metrics.reps,
                    ":sets": metrics.sets,
                    ":exercise_time": metrics.exercise_time,
                    ":rom": metrics.rom,
                    ":weight": metrics.weight,
                    ":repetitions": metrics.repetitions,
                    ":total_tempo": metrics.total_tempo,
                    ":tut": metrics.tut,
                    ":total_rest": metrics.total_rest,
                    ":density": metrics.density,
                },
            )?;

            if rows == 0 {
                return Ok(None);
            }
            Ok(fetch_one(&conn, &id)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM workouts WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
