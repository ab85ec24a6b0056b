use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Coach, FromSqliteRow, NewCoach};

#[derive(Clone)]
pub struct CoachRepository {
    pool: DbPool,
}

fn fetch_by(conn: &Connection, column: &str, value: &str) -> rusqlite::Result<Option<Coach>> {
    let sql = format!("SELECT * FROM coaches WHERE {} = ?", column);
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([value], Coach::from_row).optional()
}

impl CoachRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM coaches WHERE id = ?)",
                [&id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Coach>> {
        self.find_by("id", id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Coach>> {
        self.find_by("email", email).await
    }

    pub async fn find_by_profile_name(&self, profile_name: &str) -> Result<Option<Coach>> {
        self.find_by("profile_name", profile_name).await
    }

    async fn find_by(&self, column: &'static str, value: &str) -> Result<Option<Coach>> {
        let pool = self.pool.clone();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            Ok(fetch_by(&conn, column, &value)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<Coach>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM coaches ORDER BY last_name, name")?;
            let coaches = stmt
                .query_map([], Coach::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(coaches)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Ids of the coach's clients, oldest first.
    pub async fn client_ids(&self, coach_id: &str) -> Result<Vec<String>> {
        let pool = self.pool.clone();
        let coach_id = coach_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT id FROM clients WHERE coach_id = ? ORDER BY created_at")?;
            let ids = stmt
                .query_map([&coach_id], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(ids)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, new: NewCoach, password: &str) -> Result<Coach> {
        let password_hash = hash_password(password)?;
        let coach = Coach {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            last_name: new.last_name,
            profile_name: new.profile_name,
            phone: new.phone,
            email: new.email,
            password_hash,
            city: new.city,
            time_zone: new.time_zone,
            training_speciality: new.training_speciality,
            created_at: Utc::now(),
        };
        let coach_clone = coach.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO coaches (id, name, last_name, profile_name, phone, email, password_hash,
                    city, time_zone, training_speciality, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    coach_clone.id,
                    coach_clone.name,
                    coach_clone.last_name,
                    coach_clone.profile_name,
                    coach_clone.phone,
                    coach_clone.email,
                    coach_clone.password_hash,
                    coach_clone.city,
                    coach_clone.time_zone,
                    coach_clone.training_speciality,
                    coach_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(coach)
    }

    /// Writes the profile columns of `coach`. The password hash is left alone.
    pub async fn update(&self, coach: &Coach) -> Result<bool> {
        let pool = self.pool.clone();
        let coach = coach.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE coaches SET name = ?, last_name = ?, profile_name = ?, phone = ?,
                    email = ?, city = ?, time_zone = ?, training_speciality = ?
                 WHERE id = ?",
                rusqlite::params![
                    coach.name,
                    coach.last_name,
                    coach.profile_name,
                    coach.phone,
                    coach.email,
                    coach.city,
                    coach.time_zone,
                    coach.training_speciality,
                    coach.id
                ],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn update_password(&self, id: &str, new_password: &str) -> Result<bool> {
        let password_hash = hash_password(new_password)?;
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE coaches SET password_hash = ? WHERE id = ?",
                rusqlite::params![password_hash, id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM coaches WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Returns the coach when `password` matches the stored hash.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<Option<Coach>> {
        let coach = self.find_by_email(email).await?;

        match coach {
            Some(coach) => {
                if verify_password(password, &coach.password_hash)? {
                    Ok(Some(coach))
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::PasswordHash)?
        .to_string();
    Ok(password_hash)
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
