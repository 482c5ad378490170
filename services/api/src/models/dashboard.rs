//! Dashboard models

use serde::Serialize;

use super::{Attendance, AttendanceEntry, Student};

/// Landing view after login, depending on who asks
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Dashboard {
    /// A student account; `student` is absent until the account is linked
    Student {
        student: Option<Student>,
        attendance: Vec<Attendance>,
        notice: Option<&'static str>,
    },
    /// Professors and admins
    Staff {
        total_students: i64,
        total_attendance: i64,
        recent: Vec<AttendanceEntry>,
    },
}
