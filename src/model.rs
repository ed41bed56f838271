//! API-facing user model and the internal record it is built from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User as returned by the API. `age` is only set on read paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[schema(value_type = String, format = Date, example = "1990-05-17")]
    pub dob: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

/// Stored user as seen by the service; no derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
}

impl User {
    pub fn from_record(record: UserRecord, age: Option<i32>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            dob: record.dob,
            age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: 3,
            name: "Ada".into(),
            dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        }
    }

    #[test]
    fn serializes_dob_as_iso_date_and_omits_missing_age() {
        let json = serde_json::to_value(User::from_record(record(), None)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "Ada", "dob": "1990-05-17"}));
    }

    #[test]
    fn serializes_age_when_present() {
        let json = serde_json::to_value(User::from_record(record(), Some(34))).unwrap();
        assert_eq!(json["age"], 34);
    }
}
