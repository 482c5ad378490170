//! User repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, Role, User};

const USER_COLUMNS: &str =
    "id, username, password_hash, role, student_id, created_at, updated_at";

/// User repository bound to one connection or transaction
pub struct UserRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> UserRepository<'c> {
    /// Create a new user repository
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Create a new user
    pub async fn create(&mut self, new_user: &NewUser) -> Result<User, sqlx::Error> {
        info!("Creating new user: {} ({})", new_user.username, new_user.role);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (id, username, password_hash, role, student_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(new_user.student_id)
        .fetch_one(&mut *self.conn)
        .await?;

        user_from_row(&row)
    }

    /// Find a user by username
    pub async fn find_by_username(&mut self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
            .bind(username)
            .fetch_optional(&mut *self.conn)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Find a user by ID
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Find the account linked to a student record
    pub async fn find_by_student_id(&mut self, student_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE student_id = $1 ORDER BY username LIMIT 1"
        ))
        .bind(student_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Student accounts that are not linked to a student record yet
    pub async fn list_unlinked_students(&mut self) -> Result<Vec<User>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE role = $1 AND student_id IS NULL
            ORDER BY username
            "#
        ))
        .bind(Role::Student.as_str())
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter().map(user_from_row).collect()
    }

    /// Point an unlinked user account at a student record
    ///
    /// Returns false when the user does not exist or is linked to another student.
    pub async fn link_student(&mut self, user_id: Uuid, student_id: Uuid) -> Result<bool, sqlx::Error> {
        info!("Linking user {} to student {}", user_id, student_id);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET student_id = $2, updated_at = NOW()
            WHERE id = $1 AND (student_id IS NULL OR student_id = $2)
            "#,
        )
        .bind(user_id)
        .bind(student_id)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every account (used when reseeding)
    pub async fn delete_all(&mut self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users")
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    let role: String = row.try_get("role")?;
    let role = role
        .parse::<Role>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        role,
        student_id: row.try_get("student_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
