use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::models::{
    Exercise, ExerciseSummary, LoadWeight, LoadWeightsQuery, WeightUnit, WeightsQuery,
};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

impl ExercisesState {
    async fn find(&self, id: i64) -> Result<Exercise> {
        self.exercise_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Exercise {} not found", id)))
    }
}

pub async fn list(State(state): State<ExercisesState>) -> Result<Json<Vec<ExerciseSummary>>> {
    Ok(Json(state.exercise_repo.find_all().await?))
}

pub async fn show(
    State(state): State<ExercisesState>,
    Path(id): Path<i64>,
) -> Result<Json<Exercise>> {
    Ok(Json(state.find(id).await?))
}

/// Every catalog weight for the exercise's load type, ascending.
pub async fn weights(
    State(state): State<ExercisesState>,
    Path(id): Path<i64>,
    Query(query): Query<WeightsQuery>,
) -> Result<Json<Vec<LoadWeight>>> {
    let exercise = state.find(id).await?;
    let unit = WeightUnit::parse(query.unit.as_deref());

    let weights = state
        .exercise_repo
        .find_weights(
            Some(exercise.load_type_id),
            unit,
            LoadWeightsQuery::MAX_PAGE_SIZE,
            0,
        )
        .await?;
    Ok(Json(weights))
}

pub async fn load_weights(
    State(state): State<ExercisesState>,
    Query(query): Query<LoadWeightsQuery>,
) -> Result<Json<Vec<LoadWeight>>> {
    let weights = state
        .exercise_repo
        .find_weights(
            query.load_type_id,
            WeightUnit::parse(query.unit.as_deref()),
            query.page_size(),
            query.offset(),
        )
        .await?;
    Ok(Json(weights))
}

pub async fn load_weights_by_exercise(
    State(state): State<ExercisesState>,
    Path(id): Path<i64>,
    Query(query): Query<LoadWeightsQuery>,
) -> Result<Json<Vec<LoadWeight>>> {
    let exercise = state.find(id).await?;
    let weights = state
        .exercise_repo
        .find_weights(
            Some(exercise.load_type_id),
            WeightUnit::parse(query.unit.as_deref()),
            query.page_size(),
            query.offset(),
        )
        .await?;
    Ok(Json(weights))
}
