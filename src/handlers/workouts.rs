use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::JsonObject;
use crate::error::{AppError, Result};
use crate::metrics::coerce::{is_blank, parse_int};
use crate::metrics::{apply_patch, normalize, WorkoutInput};
use crate::models::{Workout, WorkoutFilter};
use crate::repositories::{ClientRepository, ExerciseRepository, WorkoutRepository};

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
    pub client_repo: ClientRepository,
    pub exercise_repo: ExerciseRepository,
}

impl WorkoutsState {
    async fn find(&self, id: &str) -> Result<Workout> {
        self.workout_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))
    }

    /// Resolves `client_id` to a stored client's id.
    async fn resolve_client(&self, value: Option<&Value>) -> Result<String> {
        if is_blank(value) {
            return Err(AppError::BadRequest("client_id is required".to_string()));
        }
        let client_id = match value {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        if self.client_repo.exists(&client_id).await? {
            Ok(client_id)
        } else {
            Err(AppError::NotFound(format!("Client {} not found", client_id)))
        }
    }

    /// Resolves `exercise_id` to a catalog exercise id.
    async fn resolve_exercise(&self, value: Option<&Value>) -> Result<i64> {
        if is_blank(value) {
            return Err(AppError::BadRequest("exercise_id is required".to_string()));
        }
        let exercise_id = value
            .and_then(parse_int)
            .ok_or_else(|| AppError::BadRequest("exercise_id must be an integer".to_string()))?;

        if self.exercise_repo.exists(exercise_id).await? {
            Ok(exercise_id)
        } else {
            Err(AppError::NotFound(format!(
                "Exercise {} not found",
                exercise_id
            )))
        }
    }
}

pub async fn create(
    State(state): State<WorkoutsState>,
    JsonObject(input): JsonObject<WorkoutInput>,
) -> Result<(StatusCode, Json<Workout>)> {
    let client_id = state.resolve_client(input.client_id.as_ref()).await?;
    let exercise_id = state.resolve_exercise(input.exercise_id.as_ref()).await?;

    let metrics = normalize(&input).inspect_err(|errors| {
        tracing::debug!(%client_id, errors = %errors, "workout rejected");
    })?;

    let workout = state
        .workout_repo
        .create(&client_id, exercise_id, &metrics)
        .await?;
    tracing::info!(
        workout_id = %workout.id,
        %client_id,
        exercise_id,
        density = workout.metrics.density,
        "workout created"
    );

    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn list(
    State(state): State<WorkoutsState>,
    Query(filter): Query<WorkoutFilter>,
) -> Result<Json<Vec<Workout>>> {
    Ok(Json(state.workout_repo.list(&filter).await?))
}

pub async fn show(
    State(state): State<WorkoutsState>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    Ok(Json(state.find(&id).await?))
}

pub async fn by_client(
    State(state): State<WorkoutsState>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<Workout>>> {
    if !state.client_repo.exists(&client_id).await? {
        return Err(AppError::NotFound(format!("Client {} not found", client_id)));
    }
    Ok(Json(state.workout_repo.find_by_client(&client_id).await?))
}

/// Serves both PUT and PATCH: the body is overlaid on the stored workout and
/// the derived metrics are recomputed when any input to them changed.
pub async fn update(
    State(state): State<WorkoutsState>,
    Path(id): Path<String>,
    JsonObject(patch): JsonObject<WorkoutInput>,
) -> Result<Json<Workout>> {
    let current = state.find(&id).await?;

    let client_id = match patch.client_id.as_ref() {
        Some(value) => state.resolve_client(Some(value)).await?,
        None => current.client_id.clone(),
    };
    let exercise_id = match patch.exercise_id.as_ref() {
        Some(value) => state.resolve_exercise(Some(value)).await?,
        None => current.exercise_id,
    };

    let metrics = apply_patch(&current.metrics, &patch).inspect_err(|errors| {
        tracing::debug!(workout_id = %id, errors = %errors, "workout update rejected");
    })?;

    let workout = state
        .workout_repo
        .update(&id, &client_id, exercise_id, &metrics)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
    tracing::info!(
        workout_id = %workout.id,
        density = workout.metrics.density,
        "workout updated"
    );

    Ok(Json(workout))
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.workout_repo.delete(&id).await? {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }
    tracing::info!(workout_id = %id, "workout deleted");
    Ok(Json(json!({ "status": "deleted", "id": id })))
}
