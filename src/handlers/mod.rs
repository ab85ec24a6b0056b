pub mod clients;
pub mod coaches;
pub mod exercises;
pub mod health;
pub mod workouts;

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};

/// JSON body that must be an object. Arrays and scalars are rejected with 400
/// before `T` ever sees them.
pub struct JsonObject<T>(pub T);

impl<S, T> FromRequest<S> for JsonObject<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        if !value.is_object() {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map(JsonObject)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
    }
}

/// Fails with `Missing fields: a, b` listing every absent or blank field.
pub(crate) fn require_fields<'a>(
    names: &[&str],
    field: impl Fn(&str) -> Option<&'a str>,
) -> Result<()> {
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| field(name).map(str::trim).map_or(true, str::is_empty))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Missing fields: {}",
            missing.join(", ")
        )))
    }
}

/// Turns a UNIQUE violation on `email` or `profile_name` into a 409.
pub(crate) fn conflict_on_duplicate(err: AppError) -> AppError {
    match err {
        AppError::Constraint(detail) if detail.contains("UNIQUE") && detail.ends_with(".email") => {
            AppError::Conflict("Email already exists".to_string())
        }
        AppError::Constraint(detail)
            if detail.contains("UNIQUE") && detail.ends_with(".profile_name") =>
        {
            AppError::Conflict("Profile name already exists".to_string())
        }
        other => other,
    }
}

/// `Some(trimmed)` for a non-blank value.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fields_lists_all_missing() {
        let err = require_fields(&["name", "email", "city"], |name| match name {
            "name" => Some("Ana"),
            "email" => Some("  "),
            _ => None,
        })
        .unwrap_err();

        match err {
            AppError::BadRequest(msg) => assert_eq!(msg, "Missing fields: email, city"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_conflict_on_duplicate() {
        let err = conflict_on_duplicate(AppError::Constraint(
            "UNIQUE constraint failed: clients.email".to_string(),
        ));
        assert!(matches!(err, AppError::Conflict(msg) if msg == "Email already exists"));

        let err = conflict_on_duplicate(AppError::Constraint(
            "UNIQUE constraint failed: coaches.profile_name".to_string(),
        ));
        assert!(matches!(err, AppError::Conflict(msg) if msg == "Profile name already exists"));

        let err = conflict_on_duplicate(AppError::Constraint(
            "FOREIGN KEY constraint failed".to_string(),
        ));
        assert!(matches!(err, AppError::Constraint(_)));
    }
}
