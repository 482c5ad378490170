//! Attendance report models

use serde::Serialize;
use uuid::Uuid;

use super::{Course, Student};

/// Presence figures for one student
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    /// `present / total * 100` rounded to two decimals, 0.0 without records
    pub percentage: f64,
}

/// Student reference used in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRef {
    pub id: Uuid,
    pub student_number: String,
    pub name: String,
}

impl From<&Student> for StudentRef {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            student_number: student.student_number.clone(),
            name: student.full_name(),
        }
    }
}

/// One row of a report
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub student: StudentRef,
    #[serde(flatten)]
    pub summary: AttendanceSummary,
}

/// Report rows of the students enrolled in one course
#[derive(Debug, Clone, Serialize)]
pub struct CourseReport {
    pub course: Course,
    pub students: Vec<StudentReport>,
}

/// Staff report over every course
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub courses: Vec<CourseReport>,
    /// Students without a course
    pub unassigned: Vec<StudentReport>,
}

/// Report answered to a request, depending on who asks
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Report {
    Student(StudentReport),
    Aggregate(AggregateReport),
}
