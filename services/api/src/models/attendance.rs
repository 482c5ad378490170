//! Attendance models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::Student;

/// Attendance status for one student on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Excused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Excused => "Excused",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown attendance status: {}", s))
    }
}

/// Attendance entity
#[derive(Debug, Clone, Serialize)]
pub struct Attendance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attendance row joined with the student it belongs to, for listings
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub student_number: String,
    pub student_name: String,
}

/// Attendance form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceForm {
    pub student_id: Option<Uuid>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
    pub notes: Option<String>,
}

/// Validated attendance fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

/// Query parameters for the attendance listing
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
}

/// One page of the staff attendance listing
#[derive(Debug, Clone, Serialize)]
pub struct AttendancePage {
    pub items: Vec<AttendanceEntry>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub pages: i64,
}

/// Attendance listing, scoped to who asks
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AttendanceListing {
    /// A linked student sees only their own entries
    Student {
        student: Student,
        items: Vec<Attendance>,
    },
    /// Staff page through every entry
    Staff(AttendancePage),
}
