//! Input validation for course, student and attendance forms
//!
//! Each form is checked as a whole and turned into the typed value the
//! repositories accept. Referential checks (does the course exist?) need the
//! database and are done by the handlers.

use chrono::NaiveDate;

use crate::models::{
    AttendanceForm, AttendanceStatus, CourseForm, NewAttendance, NewCourse, NewStudent,
    StudentForm,
};

/// Trim a required text field and check its length
fn required_text(label: &str, value: &str, max: usize) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} is required", label));
    }

    if value.chars().count() > max {
        return Err(format!("{} must be at most {} characters long", label, max));
    }

    Ok(value.to_string())
}

/// Validate a course form
pub fn validate_course(form: &CourseForm) -> Result<NewCourse, String> {
    Ok(NewCourse {
        code: required_text("Course Code", &form.code, 50)?,
        title: required_text("Course Title", &form.title, 200)?,
    })
}

/// Validate a student form
pub fn validate_student(form: &StudentForm) -> Result<NewStudent, String> {
    let student_number = required_text("Student Number", &form.student_number, 50)?;
    let first_name = required_text("First Name", &form.first_name, 100)?;
    let last_name = required_text("Last Name", &form.last_name, 100)?;

    let year_level = match form.year_level {
        None => return Err("Year Level is required".to_string()),
        Some(level @ 1..=4) => level as i16,
        Some(_) => return Err("Year Level must be 1, 2, 3 or 4".to_string()),
    };

    Ok(NewStudent {
        student_number,
        first_name,
        last_name,
        year_level,
        course_id: form.course_id,
    })
}

/// Validate an attendance form
pub fn validate_attendance(form: &AttendanceForm) -> Result<NewAttendance, String> {
    let student_id = form
        .student_id
        .ok_or_else(|| "Student is required".to_string())?;

    let date = form.date.trim();
    if date.is_empty() {
        return Err("Date is required".to_string());
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| "Date must be formatted as YYYY-MM-DD".to_string())?;

    let status = form.status.trim();
    if status.is_empty() {
        return Err("Status is required".to_string());
    }
    let status = status
        .parse::<AttendanceStatus>()
        .map_err(|_| "Status must be one of: Present, Absent, Late, Excused".to_string())?;

    let notes = form
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string);

    Ok(NewAttendance {
        student_id,
        date,
        status,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn student_form() -> StudentForm {
        StudentForm {
            student_number: " S2025001 ".to_string(),
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            year_level: Some(1),
            course_id: None,
        }
    }

    #[test]
    fn test_course_fields_are_trimmed() {
        let course = validate_course(&CourseForm {
            code: "  CS101 ".to_string(),
            title: "Intro to Computer Science ".to_string(),
        })
        .unwrap();

        assert_eq!(course.code, "CS101");
        assert_eq!(course.title, "Intro to Computer Science");
    }

    #[test]
    fn test_course_requires_code_and_title() {
        assert_eq!(
            validate_course(&CourseForm {
                code: "   ".to_string(),
                title: "Title".to_string(),
            }),
            Err("Course Code is required".to_string())
        );
        assert!(
            validate_course(&CourseForm {
                code: "CS101".to_string(),
                title: "x".repeat(201),
            })
            .is_err()
        );
    }

    #[test]
    fn test_student_year_level_bounds() {
        assert_eq!(validate_student(&student_form()).unwrap().student_number, "S2025001");

        for level in [0, 5, -1] {
            let form = StudentForm {
                year_level: Some(level),
                ..student_form()
            };
            assert!(validate_student(&form).is_err());
        }

        let form = StudentForm {
            year_level: None,
            ..student_form()
        };
        assert_eq!(validate_student(&form), Err("Year Level is required".to_string()));
    }

    #[test]
    fn test_student_name_length() {
        let form = StudentForm {
            last_name: "x".repeat(101),
            ..student_form()
        };
        assert!(validate_student(&form).is_err());
    }

    #[test]
    fn test_attendance_parsing() {
        let student_id = Uuid::new_v4();
        let attendance = validate_attendance(&AttendanceForm {
            student_id: Some(student_id),
            date: "2025-03-14".to_string(),
            status: "Late".to_string(),
            notes: Some("  20 minutes late ".to_string()),
        })
        .unwrap();

        assert_eq!(attendance.student_id, student_id);
        assert_eq!(attendance.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(attendance.status, AttendanceStatus::Late);
        assert_eq!(attendance.notes.as_deref(), Some("20 minutes late"));
    }

    #[test]
    fn test_attendance_rejects_bad_input() {
        let valid = AttendanceForm {
            student_id: Some(Uuid::new_v4()),
            date: "2025-03-14".to_string(),
            status: "Present".to_string(),
            notes: Some("   ".to_string()),
        };
        assert_eq!(validate_attendance(&valid).unwrap().notes, None);

        let missing_student = AttendanceForm {
            student_id: None,
            ..valid.clone()
        };
        assert_eq!(
            validate_attendance(&missing_student),
            Err("Student is required".to_string())
        );

        let bad_date = AttendanceForm {
            date: "14/03/2025".to_string(),
            ..valid.clone()
        };
        assert!(validate_attendance(&bad_date).is_err());

        let bad_status = AttendanceForm {
            status: "Sick".to_string(),
            ..valid
        };
        assert!(validate_attendance(&bad_status).is_err());
    }
}
