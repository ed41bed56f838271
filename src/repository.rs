//! Repository seam between the service and storage.

use crate::error::RepoError;
use crate::model::UserRecord;
use crate::store::{UserQueries, UserRow};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, name: &str, dob: NaiveDate) -> Result<UserRecord, RepoError>;
    async fn get_by_id(&self, id: i64) -> Result<UserRecord, RepoError>;
    async fn list(&self) -> Result<Vec<UserRecord>, RepoError>;
    async fn update(&self, id: i64, name: &str, dob: NaiveDate) -> Result<UserRecord, RepoError>;
    /// Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
    async fn ping(&self) -> Result<(), RepoError>;
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            dob: row.dob,
        }
    }
}

/// PostgreSQL-backed repository over [`UserQueries`].
pub struct PgUserRepository {
    queries: UserQueries,
}

impl PgUserRepository {
    pub fn new(queries: UserQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, name: &str, dob: NaiveDate) -> Result<UserRecord, RepoError> {
        Ok(self.queries.insert(name, dob).await?.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<UserRecord, RepoError> {
        Ok(self.queries.select_by_id(id).await?.into())
    }

    async fn list(&self) -> Result<Vec<UserRecord>, RepoError> {
        let rows = self.queries.select_all().await?;
        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    async fn update(&self, id: i64, name: &str, dob: NaiveDate) -> Result<UserRecord, RepoError> {
        Ok(self.queries.update_by_id(id, name, dob).await?.into())
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.queries.delete_by_id(id).await? > 0)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.queries.ping().await
    }
}

/// In-process repository used by tests. Ids start at 1 and
/// are never reused; listing is in id order like the SQL accessor.
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<i64, UserRecord>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, name: &str, dob: NaiveDate) -> Result<UserRecord, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = UserRecord {
            id,
            name: name.to_string(),
            dob,
        };
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(id, record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<UserRecord, RepoError> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        users.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn list(&self) -> Result<Vec<UserRecord>, RepoError> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.values().cloned().collect())
    }

    async fn update(&self, id: i64, name: &str, dob: NaiveDate) -> Result<UserRecord, RepoError> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        let record = users.get_mut(&id).ok_or(RepoError::NotFound)?;
        record.name = name.to_string();
        record.dob = dob;
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        Ok(users.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
