use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Client, ClientFilter, FromSqliteRow, NewClient};

const SELECT_CLIENT: &str = "SELECT c.*,
        (SELECT COUNT(*) FROM workouts w WHERE w.client_id = c.id) AS workouts_count
     FROM clients c";

#[derive(Clone)]
pub struct ClientRepository {
    pool: DbPool,
}

fn fetch_by(conn: &Connection, column: &str, value: &str) -> rusqlite::Result<Option<Client>> {
    let sql = format!("{} WHERE c.{} = ?", SELECT_CLIENT, column);
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([value], Client::from_row).optional()
}

impl ClientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM clients WHERE id = ?)",
                [&id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Client>> {
        self.find_by("id", id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Client>> {
        self.find_by("email", email).await
    }

    pub async fn find_by_profile_name(&self, profile_name: &str) -> Result<Option<Client>> {
        self.find_by("profile_name", profile_name).await
    }

    async fn find_by(&self, column: &'static str, value: &str) -> Result<Option<Client>> {
        let pool = self.pool.clone();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            Ok(fetch_by(&conn, column, &value)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn list(&self, filter: &ClientFilter) -> Result<Vec<Client>> {
        let pool = self.pool.clone();
        let coach_id = filter.coach_id.clone();
        let pattern = filter.search_pattern();
        let (limit, offset) = (filter.limit(), filter.offset());

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sql = format!(
                "{} WHERE (?1 IS NULL OR c.coach_id = ?1)
                   AND (?2 IS NULL
                        OR c.name LIKE ?2
                        OR c.last_name LIKE ?2
                        OR c.profile_name LIKE ?2
                        OR c.email LIKE ?2)
                 ORDER BY c.last_name, c.name
                 LIMIT ?3 OFFSET ?4",
                SELECT_CLIENT
            );
            let mut stmt = conn.prepare(&sql)?;
            let clients = stmt
                .query_map(
                    rusqlite::params![coach_id, pattern, limit, offset],
                    Client::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(clients)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<Client>> {
        let pool = self.pool.clone();
        let coach_id = coach_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sql = format!(
                "{} WHERE c.coach_id = ? ORDER BY c.last_name, c.name",
                SELECT_CLIENT
            );
            let mut stmt = conn.prepare(&sql)?;
            let clients = stmt
                .query_map([&coach_id], Client::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(clients)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count_by_coach(&self, coach_id: &str) -> Result<i64> {
        let pool = self.pool.clone();
        let coach_id = coach_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM clients WHERE coach_id = ?",
                [&coach_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, new: NewClient) -> Result<Client> {
        let pool = self.pool.clone();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO clients (id, coach_id, name, last_name, profile_name, phone, email, city, time_zone, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    id,
                    new.coach_id,
                    new.name,
                    new.last_name,
                    new.profile_name,
                    new.phone,
                    new.email,
                    new.city,
                    new.time_zone,
                    now
                ],
            )?;
            fetch_by(&conn, "id", &id)?
                .ok_or_else(|| AppError::Internal(format!("client {} vanished after insert", id)))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Writes every editable column of `client` back. Returns the fresh row.
    pub async fn update(&self, client: &Client) -> Result<Option<Client>> {
        let pool = self.pool.clone();
        let client = client.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE clients SET coach_id = ?, name = ?, last_name = ?, profile_name = ?,
                    phone = ?, email = ?, city = ?, time_zone = ?
                 WHERE id = ?",
                rusqlite::params![
                    client.coach_id,
                    client.name,
                    client.last_name,
                    client.profile_name,
                    client.phone,
                    client.email,
                    client.city,
                    client.time_zone,
                    client.id
                ],
            )?;
            if rows == 0 {
                return Ok(None);
            }
            Ok(fetch_by(&conn, "id", &client.id)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Workouts go with the client (ON DELETE CASCADE).
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM clients WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
