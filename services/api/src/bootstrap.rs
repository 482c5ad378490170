//! Start-up data: the administrator account and the sample data set

use anyhow::{Context, Result};
use auth::credential::hash_password;
use auth::models::{NewUser, Role};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::config::AppConfig;
use crate::models::{AttendanceStatus, NewAttendance, NewCourse, NewStudent};
use crate::unit_of_work::UnitOfWork;

/// Counts of what [`seed_sample_data`] inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub courses: usize,
    pub students: usize,
    pub users: usize,
    pub attendance: usize,
}

/// Make sure the configured administrator account exists
///
/// An existing account is left untouched, password included.
pub async fn ensure_admin(pool: &PgPool, config: &AppConfig) -> Result<()> {
    let mut uow = UnitOfWork::begin(pool).await?;

    if uow
        .users()
        .find_by_username(&config.admin_username)
        .await?
        .is_some()
    {
        info!("Admin account {} already exists", config.admin_username);
        return Ok(());
    }

    let admin = NewUser {
        username: config.admin_username.clone(),
        password_hash: hash_password(&config.admin_password)?,
        role: Role::Admin,
        student_id: None,
    };
    uow.users()
        .create(&admin)
        .await
        .context("failed to create the admin account")?;
    uow.commit().await?;

    info!("Created admin account {}", config.admin_username);
    Ok(())
}

/// Replace all data with the sample data set
///
/// Two courses, three students, an admin, a professor and one student account
/// linked to the first student, and one attendance entry per student over the
/// last three days.
pub async fn seed_sample_data(pool: &PgPool) -> Result<SeedSummary> {
    let mut uow = UnitOfWork::begin(pool).await?;

    // Attendance goes with the students
    uow.users().delete_all().await?;
    uow.students().delete_all().await?;
    uow.courses().delete_all().await?;

    let cs = uow
        .courses()
        .create(&NewCourse {
            code: "CS101".to_string(),
            title: "Intro to Computer Science".to_string(),
        })
        .await?;
    let edu = uow
        .courses()
        .create(&NewCourse {
            code: "EDU201".to_string(),
            title: "Foundations of Education".to_string(),
        })
        .await?;

    let roster = [
        ("S2025001", "Juan", "Dela Cruz", 1, cs.id),
        ("S2025002", "Maria", "Santos", 2, edu.id),
        ("S2025003", "Pedro", "Reyes", 3, cs.id),
    ];
    let mut students = Vec::with_capacity(roster.len());
    for (number, first, last, year_level, course_id) in roster {
        let student = uow
            .students()
            .create(&NewStudent {
                student_number: number.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                year_level,
                course_id: Some(course_id),
            })
            .await
            .with_context(|| format!("failed to create student {}", number))?;
        students.push(student);
    }

    let accounts = [
        ("admin", "admin123", Role::Admin, None),
        ("prof", "prof123", Role::Professor, None),
        ("juan", "juan123", Role::Student, Some(students[0].id)),
    ];
    for (username, password, role, student_id) in accounts {
        uow.users()
            .create(&NewUser {
                username: username.to_string(),
                password_hash: hash_password(password)?,
                role,
                student_id,
            })
            .await
            .with_context(|| format!("failed to create user {}", username))?;
    }

    let today = Utc::now().date_naive();
    let entries = [
        (0, AttendanceStatus::Present, "On time"),
        (1, AttendanceStatus::Late, "20 minutes late"),
        (2, AttendanceStatus::Absent, "Sick"),
    ];
    for (days_ago, status, notes) in entries {
        uow.attendance()
            .create(&NewAttendance {
                student_id: students[days_ago].id,
                date: today - Duration::days(days_ago as i64),
                status,
                notes: Some(notes.to_string()),
            })
            .await?;
    }

    uow.commit().await?;

    let summary = SeedSummary {
        courses: 2,
        students: students.len(),
        users: accounts.len(),
        attendance: entries.len(),
    };
    info!("Seeded sample data: {:?}", summary);
    Ok(summary)
}
