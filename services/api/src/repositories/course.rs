//! Course repository for database operations

use sqlx::PgConnection;
use tracing::info;
use uuid::Uuid;

use crate::models::{Course, NewCourse};

/// Course repository bound to one transaction
pub struct CourseRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> CourseRepository<'c> {
    /// Create a new course repository
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Get all courses ordered by code
    pub async fn list(&mut self) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, code, title, created_at, updated_at
            FROM courses
            ORDER BY code
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await
    }

    /// Find a course by ID
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, code, title, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
    }

    /// Whether a course with this ID exists
    pub async fn exists(&mut self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM courses WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.conn)
            .await
    }

    /// Create a new course
    pub async fn create(&mut self, course: &NewCourse) -> Result<Course, sqlx::Error> {
        info!("Creating course: {}", course.code);

        sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (id, code, title)
            VALUES ($1, $2, $3)
            RETURNING id, code, title, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&course.code)
        .bind(&course.title)
        .fetch_one(&mut *self.conn)
        .await
    }

    /// Replace the fields of a course
    pub async fn update(&mut self, id: Uuid, course: &NewCourse) -> Result<Option<Course>, sqlx::Error> {
        info!("Updating course {}: {}", id, course.code);

        sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET code = $2, title = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, code, title, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&course.code)
        .bind(&course.title)
        .fetch_optional(&mut *self.conn)
        .await
    }

    /// Delete a course; its students stay with `course_id` cleared
    pub async fn delete(&mut self, id: Uuid) -> Result<bool, sqlx::Error> {
        info!("Deleting course {}", id);

        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every course (used when reseeding)
    pub async fn delete_all(&mut self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses")
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }
}
