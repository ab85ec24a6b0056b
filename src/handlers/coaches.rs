use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::{conflict_on_duplicate, non_blank, require_fields, JsonObject};
use crate::error::{AppError, Result};
use crate::middleware::AuthCoach;
use crate::models::{
    Client, Coach, CoachPayload, CoachProfile, LoginCredentials, LoginResponse, NewCoach,
};
use crate::repositories::{ClientRepository, CoachRepository, SessionRepository};

const DEFAULT_TIME_ZONE: &str = "UTC";

#[derive(Clone)]
pub struct CoachesState {
    pub coach_repo: CoachRepository,
    pub client_repo: ClientRepository,
    pub session_repo: SessionRepository,
}

impl CoachesState {
    async fn profile(&self, coach: Coach) -> Result<CoachProfile> {
        let clients = self.coach_repo.client_ids(&coach.id).await?;
        Ok(CoachProfile { coach, clients })
    }

    async fn find(&self, id: &str) -> Result<Coach> {
        self.coach_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coach not found".to_string()))
    }
}

fn ensure_self(auth: &AuthCoach, id: &str) -> Result<()> {
    if auth.coach_id == id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You can only manage your own coach account".to_string(),
        ))
    }
}

/// Lays every non-blank field of `payload` over `coach`.
fn apply_payload(coach: &mut Coach, payload: &CoachPayload) {
    let fields = [
        (&mut coach.name, &payload.name),
        (&mut coach.last_name, &payload.last_name),
        (&mut coach.profile_name, &payload.profile_name),
        (&mut coach.phone, &payload.phone),
        (&mut coach.email, &payload.email),
        (&mut coach.city, &payload.city),
        (&mut coach.time_zone, &payload.time_zone),
        (&mut coach.training_speciality, &payload.training_speciality),
    ];
    for (target, value) in fields {
        if let Some(value) = non_blank(value.as_deref()) {
            *target = value;
        }
    }
}

pub async fn register(
    State(state): State<CoachesState>,
    JsonObject(payload): JsonObject<CoachPayload>,
) -> Result<(StatusCode, Json<CoachProfile>)> {
    require_fields(&CoachPayload::REQUIRED_ON_REGISTER, |name| {
        payload.field(name)
    })?;

    let field = |name: &str| non_blank(payload.field(name)).unwrap_or_default();
    let new = NewCoach {
        name: field("name"),
        last_name: field("last_name"),
        profile_name: field("profile_name"),
        phone: field("phone"),
        email: field("email"),
        city: field("city"),
        time_zone: non_blank(payload.time_zone.as_deref())
            .unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string()),
        training_speciality: field("training_speciality"),
    };
    let password = field("password");

    let coach = state
        .coach_repo
        .create(new, &password)
        .await
        .map_err(conflict_on_duplicate)?;
    tracing::info!(coach_id = %coach.id, "coach registered");

    Ok((
        StatusCode::CREATED,
        Json(CoachProfile {
            coach,
            clients: Vec::new(),
        }),
    ))
}

pub async fn list(State(state): State<CoachesState>) -> Result<Json<Vec<CoachProfile>>> {
    let coaches = state.coach_repo.find_all().await?;
    let mut profiles = Vec::with_capacity(coaches.len());
    for coach in coaches {
        profiles.push(state.profile(coach).await?);
    }
    Ok(Json(profiles))
}

pub async fn show(
    State(state): State<CoachesState>,
    Path(id): Path<String>,
) -> Result<Json<CoachProfile>> {
    let coach = state.find(&id).await?;
    Ok(Json(state.profile(coach).await?))
}

pub async fn me(State(state): State<CoachesState>, auth: AuthCoach) -> Result<Json<CoachProfile>> {
    let coach = state.find(&auth.coach_id).await?;
    Ok(Json(state.profile(coach).await?))
}

/// PUT: every profile field must be supplied.
pub async fn replace(
    state: State<CoachesState>,
    auth: AuthCoach,
    id: Path<String>,
    JsonObject(payload): JsonObject<CoachPayload>,
) -> Result<Json<CoachProfile>> {
    require_fields(&CoachPayload::REQUIRED_ON_REPLACE, |name| {
        payload.field(name)
    })?;
    save(state, auth, id, payload).await
}

/// PATCH: only the supplied fields change.
pub async fn patch(
    state: State<CoachesState>,
    auth: AuthCoach,
    id: Path<String>,
    JsonObject(payload): JsonObject<CoachPayload>,
) -> Result<Json<CoachProfile>> {
    save(state, auth, id, payload).await
}

async fn save(
    State(state): State<CoachesState>,
    auth: AuthCoach,
    Path(id): Path<String>,
    payload: CoachPayload,
) -> Result<Json<CoachProfile>> {
    ensure_self(&auth, &id)?;
    let mut coach = state.find(&id).await?;

    apply_payload(&mut coach, &payload);
    state
        .coach_repo
        .update(&coach)
        .await
        .map_err(conflict_on_duplicate)?;

    if let Some(password) = non_blank(payload.password.as_deref()) {
        state.coach_repo.update_password(&id, &password).await?;
        state
            .session_repo
            .delete_all_for_coach_except(&id, &auth.token)
            .await?;
        tracing::info!(coach_id = %id, "coach password changed, other sessions revoked");
    }

    let coach = state.find(&id).await?;
    Ok(Json(state.profile(coach).await?))
}

pub async fn delete(
    State(state): State<CoachesState>,
    auth: AuthCoach,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    ensure_self(&auth, &id)?;
    if !state.coach_repo.exists(&id).await? {
        return Err(AppError::NotFound("Coach not found".to_string()));
    }

    let clients = state.client_repo.count_by_coach(&id).await?;
    if clients > 0 {
        return Err(AppError::Conflict(format!(
            "Coach still has {} client(s); reassign or delete them first",
            clients
        )));
    }

    state.coach_repo.delete(&id).await?;
    tracing::info!(coach_id = %id, "coach deleted");
    Ok(Json(json!({ "status": "deleted", "id": id })))
}

pub async fn login(
    State(state): State<CoachesState>,
    JsonObject(credentials): JsonObject<LoginCredentials>,
) -> Result<Json<LoginResponse>> {
    require_fields(&["email", "password"], |name| match name {
        "email" => credentials.email.as_deref(),
        "password" => credentials.password.as_deref(),
        _ => None,
    })?;

    let email = credentials.email.as_deref().unwrap_or_default().trim();
    let password = credentials.password.as_deref().unwrap_or_default();

    let coach = state
        .coach_repo
        .verify_password(email, password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let token = state.session_repo.create(&coach.id).await?;
    tracing::info!(coach_id = %coach.id, "coach logged in");

    Ok(Json(LoginResponse {
        token,
        coach_id: coach.id,
        name: coach.name,
        profile_name: coach.profile_name,
    }))
}

pub async fn logout(State(state): State<CoachesState>, auth: AuthCoach) -> Result<Json<Value>> {
    state.session_repo.delete(&auth.token).await?;
    Ok(Json(json!({ "status": "logged out" })))
}

pub async fn clients(
    State(state): State<CoachesState>,
    auth: AuthCoach,
    Path(id): Path<String>,
) -> Result<Json<Vec<Client>>> {
    ensure_self(&auth, &id)?;
    Ok(Json(state.client_repo.find_by_coach(&id).await?))
}
