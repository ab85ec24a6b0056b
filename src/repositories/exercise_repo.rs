use rusqlite::{Connection, OptionalExtension};

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Exercise, ExerciseSummary, FromSqliteRow, LoadWeight, NamedRef, WeightUnit};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

fn named_refs(conn: &Connection, sql: &str, exercise_id: i64) -> rusqlite::Result<Vec<NamedRef>> {
    let mut stmt = conn.prepare(sql)?;
    let refs = stmt
        .query_map([exercise_id], NamedRef::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(refs)
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?)",
                [id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Full detail, including muscles and equipment.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT e.*, lt.name AS load_type
                 FROM exercises e
                 LEFT JOIN load_types lt ON lt.id = e.load_type_id
                 WHERE e.id = ?",
            )?;
            let Some(mut exercise) = stmt.query_row([id], Exercise::from_row).optional()? else {
                return Ok(None);
            };

            exercise.primary_muscles = named_refs(
                &conn,
                "SELECT m.id, m.name FROM exercise_primary_muscles pm
                 JOIN muscles m ON m.id = pm.muscle_id
                 WHERE pm.exercise_id = ? ORDER BY m.name",
                id,
            )?;
            exercise.secondary_muscles = named_refs(
                &conn,
                "SELECT m.id, m.name FROM exercise_secondary_muscles sm
                 JOIN muscles m ON m.id = sm.muscle_id
                 WHERE sm.exercise_id = ? ORDER BY m.name",
                id,
            )?;
            exercise.equipments = named_refs(
                &conn,
                "SELECT eq.id, eq.name FROM exercise_equipments ee
                 JOIN equipments eq ON eq.id = ee.equipment_id
                 WHERE ee.exercise_id = ? ORDER BY eq.name",
                id,
            )?;

            Ok(Some(exercise))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<ExerciseSummary>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT id, name, load_type_id FROM exercises ORDER BY id")?;
            let exercises = stmt
                .query_map([], ExerciseSummary::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Catalog weights in `unit`, ascending by value. `None` matches every load type.
    pub async fn find_weights(
        &self,
        load_type_id: Option<i64>,
        unit: WeightUnit,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LoadWeight>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT id, value, unit, load_type_id FROM load_weights
                 WHERE unit = ?1 AND (?2 IS NULL OR load_type_id = ?2)
                 ORDER BY load_type_id, value
                 LIMIT ?3 OFFSET ?4",
            )?;
            let weights = stmt
                .query_map(
                    rusqlite::params![unit.as_str(), load_type_id, limit, offset],
                    LoadWeight::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(weights)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
