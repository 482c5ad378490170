//! Student models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Student entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub year_level: i16,
    pub course_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Student row joined with its course code, for listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentListItem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub student: Student,
    pub course_code: Option<String>,
}

/// Student form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub student_number: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub year_level: Option<i64>,
    pub course_id: Option<Uuid>,
}

/// Validated student fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub year_level: i16,
    pub course_id: Option<Uuid>,
}

/// Assign-user form
#[derive(Debug, Clone, Deserialize)]
pub struct AssignUserRequest {
    pub user_id: Uuid,
}
