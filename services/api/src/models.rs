//! API models for request and response payloads

use auth::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod attendance;
pub mod course;
pub mod dashboard;
pub mod report;
pub mod student;

pub use attendance::{
    Attendance, AttendanceEntry, AttendanceForm, AttendanceListing, AttendancePage,
    AttendanceQuery, AttendanceStatus, NewAttendance,
};
pub use course::{Course, CourseForm, NewCourse};
pub use dashboard::Dashboard;
pub use report::{
    AggregateReport, AttendanceSummary, CourseReport, Report, StudentRef, StudentReport,
};
pub use student::{AssignUserRequest, NewStudent, Student, StudentForm, StudentListItem};

/// Request for user registration
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm: String,
    #[serde(default = "default_registration_role")]
    pub role: String,
}

fn default_registration_role() -> String {
    Role::Student.as_str().to_string()
}

/// Response for user operations
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub student_id: Option<Uuid>,
}

impl From<&auth::User> for UserResponse {
    fn from(user: &auth::User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            student_id: user.student_id,
        }
    }
}

/// Response for user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub message: &'static str,
}

/// Plain acknowledgement carrying a user-visible notice
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub message: &'static str,
}

impl Notice {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
