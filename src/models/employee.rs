use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use crate::utils::validation::validate_not_blank;

/// A persisted (or about to be persisted) employee row.
///
/// `id` and both timestamps are owned by the store: they stay `None` until
/// the first `save`.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn from_request(request: &EmployeeRequest) -> Self {
        Employee {
            id: None,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            department: request.department.clone(),
            position: request.position.clone(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Replaces every editable field wholesale.
    pub fn apply(&mut self, request: &EmployeeRequest) {
        self.first_name = request.first_name.clone();
        self.last_name = request.last_name.clone();
        self.email = request.email.clone();
        self.department = request.department.clone();
        self.position = request.position.clone();
    }
}

/// Body of both `POST /api/employees` and `PUT /api/employees/{id}`.
#[derive(Deserialize, Validate, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeRequest {
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_not_blank")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_not_blank")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_not_blank", email(message = "Email should be valid"))]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_not_blank")]
    pub department: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_not_blank")]
    pub position: String,
}

/// A JSON `null` reads as an empty string so it reaches the blank check.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
