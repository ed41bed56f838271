//! User CRUD handlers: create, read, list, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{PathId, ValidatedJson};
use crate::model::User;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

static DOB_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const DOB_FORMAT: &str = "%Y-%m-%d";

/// Body for create and update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    #[schema(example = "Ada Lovelace", min_length = 2)]
    pub name: String,
    #[validate(regex(path = *DOB_SHAPE, message = "must be YYYY-MM-DD"))]
    #[schema(example = "1990-05-17", format = Date)]
    pub dob: String,
}

impl UserPayload {
    /// Shape is checked by validation; this rejects impossible dates like 2024-13-40.
    fn parse_dob(&self) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(&self.dob, DOB_FORMAT)
            .map_err(|e| AppError::BadRequest(format!("dob: {}", e)))
    }
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let dob = payload.parse_dob()?;
    let user = state.users.create(&payload.name, dob).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User with derived age", body = User),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<User>, AppError> {
    let user = state.users.get_by_id(id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users with derived age", body = [User]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid id or input", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> Result<Json<User>, AppError> {
    let dob = payload.parse_dob()?;
    let user = state.users.update(id, &payload.name, dob).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted, or no such user"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, dob: &str) -> UserPayload {
        UserPayload {
            name: name.into(),
            dob: dob.into(),
        }
    }

    #[test]
    fn accepts_valid_payload() {
        let p = payload("Al", "1999-12-31");
        assert!(p.validate().is_ok());
        assert_eq!(p.parse_dob().unwrap(), NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
    }

    #[test]
    fn rejects_short_name() {
        assert!(payload("A", "1999-12-31").validate().is_err());
        assert!(payload("", "1999-12-31").validate().is_err());
    }

    #[test]
    fn rejects_badly_shaped_dob() {
        for dob in ["1999/12/31", "99-12-31", "1999-12-31T00:00:00", "", "1999-1-5"] {
            assert!(payload("Al", dob).validate().is_err(), "{dob}");
        }
    }

    #[test]
    fn well_shaped_but_impossible_dob_fails_to_parse() {
        let p = payload("Al", "2024-13-40");
        assert!(p.validate().is_ok());
        assert!(matches!(p.parse_dob(), Err(AppError::BadRequest(_))));
        assert!(payload("Al", "2023-02-29").parse_dob().is_err());
    }
}
