//! Attendance repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{Attendance, AttendanceEntry, AttendanceStatus, NewAttendance};

const ENTRY_SELECT: &str = r#"
    SELECT a.id, a.student_id, a.date, a.status, a.notes, a.created_at, a.updated_at,
           s.student_number, s.first_name || ' ' || s.last_name AS student_name
    FROM attendances a
    JOIN students s ON s.id = a.student_id
"#;

/// Attendance counts of one student
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceTally {
    pub student_id: Uuid,
    pub total: i64,
    pub present: i64,
}

/// Attendance repository bound to one transaction
pub struct AttendanceRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> AttendanceRepository<'c> {
    /// Create a new attendance repository
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// One page of all entries, newest date first
    pub async fn list_page(&mut self, limit: i64, offset: i64) -> Result<Vec<AttendanceEntry>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "{ENTRY_SELECT} ORDER BY a.date DESC, a.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter().map(entry_from_row).collect()
    }

    /// The most recent entries
    pub async fn recent(&mut self, limit: i64) -> Result<Vec<AttendanceEntry>, sqlx::Error> {
        self.list_page(limit, 0).await
    }

    /// Number of attendance entries
    pub async fn count(&mut self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM attendances")
            .fetch_one(&mut *self.conn)
            .await
    }

    /// All entries of one student, newest date first
    pub async fn list_for_student(&mut self, student_id: Uuid) -> Result<Vec<Attendance>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, student_id, date, status, notes, created_at, updated_at
            FROM attendances
            WHERE student_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter().map(attendance_from_row).collect()
    }

    /// Total and present counts of one student
    pub async fn tally_for_student(&mut self, student_id: Uuid) -> Result<AttendanceTally, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = $2) AS present
            FROM attendances
            WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .bind(AttendanceStatus::Present.as_str())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(AttendanceTally {
            student_id,
            total: row.try_get("total")?,
            present: row.try_get("present")?,
        })
    }

    /// Total and present counts of every student with at least one entry
    pub async fn tally_by_student(&mut self) -> Result<Vec<AttendanceTally>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT student_id,
                   COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = $1) AS present
            FROM attendances
            GROUP BY student_id
            "#,
        )
        .bind(AttendanceStatus::Present.as_str())
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter()
            .map(|row| -> Result<AttendanceTally, sqlx::Error> {
                Ok(AttendanceTally {
                    student_id: row.try_get("student_id")?,
                    total: row.try_get("total")?,
                    present: row.try_get("present")?,
                })
            })
            .collect()
    }

    /// Find an entry by ID
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<Option<AttendanceEntry>, sqlx::Error> {
        let row = sqlx::query(&format!("{ENTRY_SELECT} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    /// Record attendance
    pub async fn create(&mut self, attendance: &NewAttendance) -> Result<Attendance, sqlx::Error> {
        info!(
            "Recording attendance for student {} on {}: {}",
            attendance.student_id, attendance.date, attendance.status
        );

        let row = sqlx::query(
            r#"
            INSERT INTO attendances (id, student_id, date, status, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, student_id, date, status, notes, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(attendance.student_id)
        .bind(attendance.date)
        .bind(attendance.status.as_str())
        .bind(&attendance.notes)
        .fetch_one(&mut *self.conn)
        .await?;

        attendance_from_row(&row)
    }

    /// Replace the fields of an entry
    pub async fn update(&mut self, id: Uuid, attendance: &NewAttendance) -> Result<Option<Attendance>, sqlx::Error> {
        info!("Updating attendance {}", id);

        let row = sqlx::query(
            r#"
            UPDATE attendances
            SET student_id = $2, date = $3, status = $4, notes = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, student_id, date, status, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(attendance.student_id)
        .bind(attendance.date)
        .bind(attendance.status.as_str())
        .bind(&attendance.notes)
        .fetch_optional(&mut *self.conn)
        .await?;

        row.as_ref().map(attendance_from_row).transpose()
    }

    /// Delete an entry
    pub async fn delete(&mut self, id: Uuid) -> Result<bool, sqlx::Error> {
        info!("Deleting attendance {}", id);

        let result = sqlx::query("DELETE FROM attendances WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn attendance_from_row(row: &PgRow) -> Result<Attendance, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<AttendanceStatus>()
        .map_err(|e| sqlx::Error::Decode(e.into()))?;

    Ok(Attendance {
        id: row.try_get("id")?,
        student_id: row.try_get("student_id")?,
        date: row.try_get("date")?,
        status,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn entry_from_row(row: &PgRow) -> Result<AttendanceEntry, sqlx::Error> {
    Ok(AttendanceEntry {
        attendance: attendance_from_row(row)?,
        student_number: row.try_get("student_number")?,
        student_name: row.try_get("student_name")?,
    })
}
