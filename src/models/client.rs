use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: String,
    pub coach_id: String,
    pub name: String,
    pub last_name: String,
    pub profile_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: String,
    pub time_zone: String,
    pub workouts_count: i64,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Client {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            coach_id: row.get("coach_id")?,
            name: row.get("name")?,
            last_name: row.get("last_name")?,
            profile_name: row.get("profile_name")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            city: row.get("city")?,
            time_zone: row.get("time_zone")?,
            workouts_count: row.get("workouts_count")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Body of `POST /clients` and `PUT/PATCH /clients/{id}`.
///
/// Every field is optional at the serde level so that missing fields can be
/// reported together instead of as a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ClientPayload {
    pub coach_id: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub profile_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub time_zone: Option<String>,
}

impl ClientPayload {
    pub const REQUIRED: [&'static str; 7] = [
        "name",
        "last_name",
        "profile_name",
        "phone",
        "email",
        "city",
        "coach_id",
    ];

    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "coach_id" => self.coach_id.as_deref(),
            "name" => self.name.as_deref(),
            "last_name" => self.last_name.as_deref(),
            "profile_name" => self.profile_name.as_deref(),
            "phone" => self.phone.as_deref(),
            "email" => self.email.as_deref(),
            "city" => self.city.as_deref(),
            "time_zone" => self.time_zone.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub coach_id: String,
    pub name: String,
    pub last_name: String,
    pub profile_name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFilter {
    pub coach_id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ClientFilter {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// `%term%` for a LIKE match, or `None` when there is nothing to search.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s))
    }
}
