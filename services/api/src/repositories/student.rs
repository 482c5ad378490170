//! Student repository for database operations

use sqlx::PgConnection;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewStudent, Student, StudentListItem};

/// Student repository bound to one transaction
pub struct StudentRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> StudentRepository<'c> {
    /// Create a new student repository
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Get all students with their course code, ordered by name
    pub async fn list(&mut self) -> Result<Vec<StudentListItem>, sqlx::Error> {
        sqlx::query_as::<_, StudentListItem>(
            r#"
            SELECT s.id, s.student_number, s.first_name, s.last_name, s.year_level,
                   s.course_id, s.created_at, s.updated_at, c.code AS course_code
            FROM students s
            LEFT JOIN courses c ON c.id = s.course_id
            ORDER BY s.last_name, s.first_name
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await
    }

    /// Get all students without joins, ordered by name
    pub async fn list_all(&mut self) -> Result<Vec<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            r#"
            SELECT id, student_number, first_name, last_name, year_level,
                   course_id, created_at, updated_at
            FROM students
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await
    }

    /// Find a student by ID
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<Option<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            r#"
            SELECT id, student_number, first_name, last_name, year_level,
                   course_id, created_at, updated_at
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
    }

    /// Whether a student with this ID exists
    pub async fn exists(&mut self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.conn)
            .await
    }

    /// Number of student records
    pub async fn count(&mut self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&mut *self.conn)
            .await
    }

    /// Create a new student
    pub async fn create(&mut self, student: &NewStudent) -> Result<Student, sqlx::Error> {
        info!("Creating student: {}", student.student_number);

        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, student_number, first_name, last_name, year_level, course_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, student_number, first_name, last_name, year_level,
                      course_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&student.student_number)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.year_level)
        .bind(student.course_id)
        .fetch_one(&mut *self.conn)
        .await
    }

    /// Replace the fields of a student
    pub async fn update(&mut self, id: Uuid, student: &NewStudent) -> Result<Option<Student>, sqlx::Error> {
        info!("Updating student {}: {}", id, student.student_number);

        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET student_number = $2, first_name = $3, last_name = $4,
                year_level = $5, course_id = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, student_number, first_name, last_name, year_level,
                      course_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&student.student_number)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.year_level)
        .bind(student.course_id)
        .fetch_optional(&mut *self.conn)
        .await
    }

    /// Delete a student together with its attendance records
    pub async fn delete(&mut self, id: Uuid) -> Result<bool, sqlx::Error> {
        info!("Deleting student {}", id);

        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every student (used when reseeding)
    pub async fn delete_all(&mut self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students")
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }
}
