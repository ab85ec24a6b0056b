use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::{conflict_on_duplicate, non_blank, require_fields, JsonObject};
use crate::error::{AppError, Result};
use crate::models::{Client, ClientFilter, ClientPayload, NewClient};
use crate::repositories::{ClientRepository, CoachRepository};

#[derive(Clone)]
pub struct ClientsState {
    pub client_repo: ClientRepository,
    pub coach_repo: CoachRepository,
}

impl ClientsState {
    async fn find(&self, id: &str) -> Result<Client> {
        self.client_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".to_string()))
    }

    async fn ensure_coach(&self, coach_id: &str) -> Result<()> {
        if self.coach_repo.exists(coach_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Coach {} not found", coach_id)))
        }
    }
}

pub async fn create(
    State(state): State<ClientsState>,
    JsonObject(payload): JsonObject<ClientPayload>,
) -> Result<(StatusCode, Json<Client>)> {
    require_fields(&ClientPayload::REQUIRED, |name| payload.field(name))?;

    let field = |name: &str| non_blank(payload.field(name)).unwrap_or_default();
    let new = NewClient {
        coach_id: field("coach_id"),
        name: field("name"),
        last_name: field("last_name"),
        profile_name: field("profile_name"),
        phone: field("phone"),
        email: field("email"),
        city: field("city"),
        time_zone: non_blank(payload.time_zone.as_deref()).unwrap_or_else(|| "UTC".to_string()),
    };
    state.ensure_coach(&new.coach_id).await?;

    let client = state
        .client_repo
        .create(new)
        .await
        .map_err(conflict_on_duplicate)?;
    tracing::info!(client_id = %client.id, coach_id = %client.coach_id, "client created");

    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list(
    State(state): State<ClientsState>,
    Query(filter): Query<ClientFilter>,
) -> Result<Json<Vec<Client>>> {
    Ok(Json(state.client_repo.list(&filter).await?))
}

pub async fn show(
    State(state): State<ClientsState>,
    Path(id): Path<String>,
) -> Result<Json<Client>> {
    Ok(Json(state.find(&id).await?))
}

pub async fn replace(
    state: State<ClientsState>,
    id: Path<String>,
    JsonObject(payload): JsonObject<ClientPayload>,
) -> Result<Json<Client>> {
    require_fields(&ClientPayload::REQUIRED, |name| payload.field(name))?;
    save(state, id, payload).await
}

pub async fn patch(
    state: State<ClientsState>,
    id: Path<String>,
    JsonObject(payload): JsonObject<ClientPayload>,
) -> Result<Json<Client>> {
    save(state, id, payload).await
}

async fn save(
    State(state): State<ClientsState>,
    Path(id): Path<String>,
    payload: ClientPayload,
) -> Result<Json<Client>> {
    let mut client = state.find(&id).await?;

    if let Some(coach_id) = non_blank(payload.coach_id.as_deref()) {
        if coach_id != client.coach_id {
            state.ensure_coach(&coach_id).await?;
            client.coach_id = coach_id;
        }
    }
    let fields = [
        (&mut client.name, &payload.name),
        (&mut client.last_name, &payload.last_name),
        (&mut client.profile_name, &payload.profile_name),
        (&mut client.phone, &payload.phone),
        (&mut client.city, &payload.city),
        (&mut client.time_zone, &payload.time_zone),
    ];
    for (target, value) in fields {
        if let Some(value) = non_blank(value.as_deref()) {
            *target = value;
        }
    }
    if let Some(email) = non_blank(payload.email.as_deref()) {
        client.email = Some(email);
    }

    let client = state
        .client_repo
        .update(&client)
        .await
        .map_err(conflict_on_duplicate)?
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;

    Ok(Json(client))
}

pub async fn delete(
    State(state): State<ClientsState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.client_repo.delete(&id).await? {
        return Err(AppError::NotFound("Client not found".to_string()));
    }
    tracing::info!(client_id = %id, "client deleted");
    Ok(Json(json!({ "status": "deleted", "id": id })))
}
