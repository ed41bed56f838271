//! SQL accessors for the `users` table, plus database and table bootstrap.

use crate::error::{ConfigError, RepoError};
use chrono::NaiveDate;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Raw `users` row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
}

const INSERT_USER: &str = "INSERT INTO users (name, dob) VALUES ($1, $2) RETURNING id, name, dob";
const SELECT_USER_BY_ID: &str = "SELECT id, name, dob FROM users WHERE id = $1";
const SELECT_USERS: &str = "SELECT id, name, dob FROM users ORDER BY id";
const UPDATE_USER: &str = "UPDATE users SET name = $2, dob = $3 WHERE id = $1 RETURNING id, name, dob";
const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

/// Parameterized statements against `users(id, name, dob)`.
#[derive(Clone)]
pub struct UserQueries {
    pool: PgPool,
}

impl UserQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, name: &str, dob: NaiveDate) -> Result<UserRow, RepoError> {
        tracing::debug!(sql = %INSERT_USER, name = %name, dob = %dob, "query");
        sqlx::query_as::<_, UserRow>(INSERT_USER)
            .bind(name)
            .bind(dob)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)
    }

    /// `RepoError::NotFound` when no row has this id.
    pub async fn select_by_id(&self, id: i64) -> Result<UserRow, RepoError> {
        tracing::debug!(sql = %SELECT_USER_BY_ID, id, "query");
        sqlx::query_as::<_, UserRow>(SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    pub async fn select_all(&self) -> Result<Vec<UserRow>, RepoError> {
        tracing::debug!(sql = %SELECT_USERS, "query");
        let rows = sqlx::query_as::<_, UserRow>(SELECT_USERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// `RepoError::NotFound` when no row has this id.
    pub async fn update_by_id(&self, id: i64, name: &str, dob: NaiveDate) -> Result<UserRow, RepoError> {
        tracing::debug!(sql = %UPDATE_USER, id, name = %name, dob = %dob, "query");
        sqlx::query_as::<_, UserRow>(UPDATE_USER)
            .bind(id)
            .bind(name)
            .bind(dob)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, RepoError> {
        tracing::debug!(sql = %DELETE_USER, id, "query");
        let result = sqlx::query(DELETE_USER).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the `users` table if it does not exist.
pub async fn ensure_users_table(pool: &PgPool) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            dob DATE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database on the same server and create
/// the target database when missing. No-op when the URL targets `postgres` itself.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
