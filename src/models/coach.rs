use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize)]
pub struct Coach {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub profile_name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub city: String,
    pub time_zone: String,
    pub training_speciality: String,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Coach {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            last_name: row.get("last_name")?,
            profile_name: row.get("profile_name")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            city: row.get("city")?,
            time_zone: row.get("time_zone")?,
            training_speciality: row.get("training_speciality")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A coach together with the ids of their clients.
#[derive(Debug, Clone, Serialize)]
pub struct CoachProfile {
    #[serde(flatten)]
    pub coach: Coach,
    pub clients: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CoachPayload {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub profile_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub city: Option<String>,
    pub time_zone: Option<String>,
    pub training_speciality: Option<String>,
}

impl CoachPayload {
    pub const REQUIRED_ON_REGISTER: [&'static str; 8] = [
        "name",
        "last_name",
        "profile_name",
        "phone",
        "email",
        "password",
        "city",
        "training_speciality",
    ];

    pub const REQUIRED_ON_REPLACE: [&'static str; 7] = [
        "name",
        "last_name",
        "profile_name",
        "phone",
        "email",
        "city",
        "training_speciality",
    ];

    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "last_name" => self.last_name.as_deref(),
            "profile_name" => self.profile_name.as_deref(),
            "phone" => self.phone.as_deref(),
            "email" => self.email.as_deref(),
            "password" => self.password.as_deref(),
            "city" => self.city.as_deref(),
            "time_zone" => self.time_zone.as_deref(),
            "training_speciality" => self.training_speciality.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewCoach {
    pub name: String,
    pub last_name: String,
    pub profile_name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub time_zone: String,
    pub training_speciality: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginCredentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub coach_id: String,
    pub name: String,
    pub profile_name: String,
}
