//! Attendance reporting
//!
//! Presence percentages per student, either for the student asking or for
//! every student grouped by course. Reads only.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{AggregateReport, AttendanceSummary, Course, CourseReport, Student, StudentReport};
use crate::repositories::AttendanceTally;
use crate::unit_of_work::UnitOfWork;

/// Compute the presence summary from raw counts
pub fn summarize(total: i64, present: i64) -> AttendanceSummary {
    let percentage = if total > 0 {
        round_2_decimals(present as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    AttendanceSummary {
        total,
        present,
        percentage,
    }
}

fn round_2_decimals(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn student_report(student: &Student, tallies: &HashMap<Uuid, AttendanceTally>) -> StudentReport {
    let summary = tallies
        .get(&student.id)
        .map(|tally| summarize(tally.total, tally.present))
        .unwrap_or_else(|| summarize(0, 0));

    StudentReport {
        student: student.into(),
        summary,
    }
}

/// Group students under their courses and attach their summaries
///
/// Courses keep the given order; students keep theirs within each course.
/// Students without a (known) course end up in `unassigned`.
pub fn build_aggregate(
    courses: Vec<Course>,
    students: &[Student],
    tallies: &[AttendanceTally],
) -> AggregateReport {
    let tallies: HashMap<Uuid, AttendanceTally> =
        tallies.iter().map(|tally| (tally.student_id, *tally)).collect();

    let mut by_course: HashMap<Uuid, Vec<StudentReport>> = HashMap::new();
    let mut unassigned = Vec::new();

    for student in students {
        let report = student_report(student, &tallies);
        match student.course_id {
            Some(course_id) if courses.iter().any(|c| c.id == course_id) => {
                by_course.entry(course_id).or_default().push(report);
            }
            _ => unassigned.push(report),
        }
    }

    let courses = courses
        .into_iter()
        .map(|course| CourseReport {
            students: by_course.remove(&course.id).unwrap_or_default(),
            course,
        })
        .collect();

    AggregateReport {
        courses,
        unassigned,
    }
}

/// Report of one student
pub async fn student_view(uow: &mut UnitOfWork, student_id: Uuid) -> ApiResult<StudentReport> {
    let student = uow
        .students()
        .find_by_id(student_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let tally = uow.attendance().tally_for_student(student_id).await?;

    Ok(StudentReport {
        student: (&student).into(),
        summary: summarize(tally.total, tally.present),
    })
}

/// Report of every student grouped by course
pub async fn aggregate_view(uow: &mut UnitOfWork) -> ApiResult<AggregateReport> {
    let courses = uow.courses().list().await?;
    let students = uow.students().list_all().await?;
    let tallies = uow.attendance().tally_by_student().await?;

    Ok(build_aggregate(courses, &students, &tallies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn course(code: &str) -> Course {
        Course {
            id: Uuid::new_v4(),
            code: code.to_string(),
            title: format!("{} title", code),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn student(number: &str, course_id: Option<Uuid>) -> Student {
        Student {
            id: Uuid::new_v4(),
            student_number: number.to_string(),
            first_name: "Maria".to_string(),
            last_name: number.to_string(),
            year_level: 2,
            course_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_records_is_zero_percent() {
        assert_eq!(
            summarize(0, 0),
            AttendanceSummary {
                total: 0,
                present: 0,
                percentage: 0.0
            }
        );
    }

    #[test]
    fn test_three_of_four_present() {
        assert_eq!(summarize(4, 3).percentage, 75.0);
        assert_eq!(summarize(2, 1).percentage, 50.0);
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(summarize(3, 1).percentage, 33.33);
        assert_eq!(summarize(3, 2).percentage, 66.67);
        assert_eq!(summarize(7, 7).percentage, 100.0);
    }

    #[test]
    fn test_students_grouped_under_courses() {
        let cs = course("CS101");
        let edu = course("EDU201");
        let juan = student("S2025001", Some(cs.id));
        let maria = student("S2025002", Some(edu.id));
        let pedro = student("S2025003", Some(cs.id));
        let loner = student("S2025004", None);

        let tallies = [
            AttendanceTally {
                student_id: juan.id,
                total: 2,
                present: 1,
            },
            AttendanceTally {
                student_id: maria.id,
                total: 4,
                present: 3,
            },
        ];

        let students = [juan.clone(), maria.clone(), pedro.clone(), loner.clone()];
        let report = build_aggregate(vec![cs.clone(), edu.clone()], &students, &tallies);

        assert_eq!(report.courses.len(), 2);
        assert_eq!(report.courses[0].course.code, "CS101");
        let cs_rows: Vec<_> = report.courses[0]
            .students
            .iter()
            .map(|row| (row.student.id, row.summary.percentage))
            .collect();
        assert_eq!(cs_rows, vec![(juan.id, 50.0), (pedro.id, 0.0)]);

        assert_eq!(report.courses[1].students.len(), 1);
        assert_eq!(report.courses[1].students[0].summary.percentage, 75.0);

        assert_eq!(report.unassigned.len(), 1);
        assert_eq!(report.unassigned[0].student.id, loner.id);
    }

    #[test]
    fn test_course_without_students_is_listed() {
        let empty = course("MATH1");
        let report = build_aggregate(vec![empty], &[], &[]);
        assert_eq!(report.courses.len(), 1);
        assert!(report.courses[0].students.is_empty());
        assert!(report.unassigned.is_empty());
    }
}
