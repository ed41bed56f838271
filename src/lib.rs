//! Users API: CRUD over a `users` table with a derived `age` field.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ConfigError, RepoError, ServiceError};
pub use model::{User, UserRecord};
pub use repository::{InMemoryUserRepository, PgUserRepository, UserRepository};
pub use routes::app;
pub use service::{compute_age, Clock, FixedClock, SystemClock, UserService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_users_table, UserQueries};
