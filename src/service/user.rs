//! User service: record → API model mapping and the derived `age` field.

use crate::error::{RepoError, ServiceError};
use crate::model::User;
use crate::repository::UserRepository;
use crate::service::age::{compute_age, Clock, SystemClock};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Create a user. The response carries no `age`.
    pub async fn create(&self, name: &str, dob: NaiveDate) -> Result<User, ServiceError> {
        let record = self.repo.create(name, dob).await?;
        tracing::info!(id = record.id, "user created");
        Ok(User::from_record(record, None))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User, ServiceError> {
        let record = self.repo.get_by_id(id).await.map_err(|e| not_found_as(e, id))?;
        let age = compute_age(record.dob, self.clock.today());
        Ok(User::from_record(record, Some(age)))
    }

    /// All users in repository order, each with `age` against a single "today".
    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let records = self.repo.list().await?;
        let today = self.clock.today();
        Ok(records
            .into_iter()
            .map(|r| {
                let age = compute_age(r.dob, today);
                User::from_record(r, Some(age))
            })
            .collect())
    }

    /// Replace `name` and `dob`; `id` is preserved. The response carries no `age`.
    pub async fn update(&self, id: i64, name: &str, dob: NaiveDate) -> Result<User, ServiceError> {
        let record = self.repo.update(id, name, dob).await.map_err(|e| not_found_as(e, id))?;
        tracing::info!(id, "user updated");
        Ok(User::from_record(record, None))
    }

    /// Hard delete. Deleting an absent id succeeds.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? {
            tracing::info!(id, "user deleted");
        } else {
            tracing::debug!(id, "delete matched no user");
        }
        Ok(())
    }

    pub async fn ready(&self) -> Result<(), ServiceError> {
        self.repo.ping().await?;
        Ok(())
    }
}

fn not_found_as(err: RepoError, id: i64) -> ServiceError {
    match err {
        RepoError::NotFound => ServiceError::UserNotFound(id),
        other => ServiceError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserRecord;
    use crate::repository::InMemoryUserRepository;
    use crate::service::age::FixedClock;
    use async_trait::async_trait;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service() -> UserService {
        UserService::with_clock(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(FixedClock(date("2024-01-01"))),
        )
    }

    /// Fails every call with a database error.
    struct BrokenRepository;

    #[async_trait]
    impl UserRepository for BrokenRepository {
        async fn create(&self, _: &str, _: NaiveDate) -> Result<UserRecord, RepoError> {
            Err(RepoError::Database(sqlx::Error::PoolClosed))
        }
        async fn get_by_id(&self, _: i64) -> Result<UserRecord, RepoError> {
            Err(RepoError::Database(sqlx::Error::PoolClosed))
        }
        async fn list(&self) -> Result<Vec<UserRecord>, RepoError> {
            Err(RepoError::Database(sqlx::Error::PoolClosed))
        }
        async fn update(&self, _: i64, _: &str, _: NaiveDate) -> Result<UserRecord, RepoError> {
            Err(RepoError::Database(sqlx::Error::PoolClosed))
        }
        async fn delete(&self, _: i64) -> Result<bool, RepoError> {
            Err(RepoError::Database(sqlx::Error::PoolClosed))
        }
        async fn ping(&self) -> Result<(), RepoError> {
            Err(RepoError::Database(sqlx::Error::PoolClosed))
        }
    }

    #[tokio::test]
    async fn create_omits_age_and_get_computes_it() {
        let svc = service();
        let created = svc.create("Grace", date("2000-06-15")).await.unwrap();
        assert_eq!(created.name, "Grace");
        assert_eq!(created.dob, date("2000-06-15"));
        assert_eq!(created.age, None);

        let fetched = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.age, Some(23));
    }

    #[tokio::test]
    async fn list_is_empty_then_ordered_with_ages() {
        let svc = service();
        assert!(svc.list().await.unwrap().is_empty());

        svc.create("Alan", date("2000-01-01")).await.unwrap();
        svc.create("Barbara", date("2000-06-15")).await.unwrap();
        let users = svc.list().await.unwrap();
        let summary: Vec<(&str, Option<i32>)> = users.iter().map(|u| (u.name.as_str(), u.age)).collect();
        assert_eq!(summary, vec![("Alan", Some(24)), ("Barbara", Some(23))]);
    }

    #[tokio::test]
    async fn update_keeps_id_and_omits_age() {
        let svc = service();
        let created = svc.create("Edsger", date("1930-05-11")).await.unwrap();
        let updated = svc.update(created.id, "Edsger W.", date("1930-05-12")).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Edsger W.");
        assert_eq!(updated.age, None);

        let fetched = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.name, "Edsger W.");
        assert_eq!(fetched.dob, date("1930-05-12"));
    }

    #[tokio::test]
    async fn missing_user_is_a_domain_not_found() {
        let svc = service();
        assert!(matches!(svc.get_by_id(9).await, Err(ServiceError::UserNotFound(9))));
        assert!(matches!(
            svc.update(9, "Nobody", date("2000-01-01")).await,
            Err(ServiceError::UserNotFound(9))
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let svc = service();
        let created = svc.create("Niklaus", date("1934-02-15")).await.unwrap();
        svc.delete(created.id).await.unwrap();
        svc.delete(created.id).await.unwrap();
        assert!(matches!(svc.get_by_id(created.id).await, Err(ServiceError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn storage_failures_are_not_reported_as_not_found() {
        let svc = UserService::with_clock(Arc::new(BrokenRepository), Arc::new(FixedClock(date("2024-01-01"))));
        assert!(matches!(svc.get_by_id(1).await, Err(ServiceError::Repository(RepoError::Database(_)))));
        assert!(matches!(
            svc.update(1, "Ken", date("1943-02-04")).await,
            Err(ServiceError::Repository(RepoError::Database(_)))
        ));
        assert!(matches!(svc.delete(1).await, Err(ServiceError::Repository(_))));
        assert!(svc.create("Ken", date("1943-02-04")).await.is_err());
        assert!(svc.list().await.is_err());
        assert!(svc.ready().await.is_err());
    }
}
