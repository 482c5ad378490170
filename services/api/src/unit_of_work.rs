//! One database transaction per request
//!
//! Handlers open a [`UnitOfWork`], reach the repositories through it and call
//! [`UnitOfWork::commit`] once. Dropping it without committing rolls back.

use auth::repositories::UserRepository;
use sqlx::{PgPool, Postgres, Transaction};

use crate::repositories::{AttendanceRepository, CourseRepository, StudentRepository};

pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    /// Start a transaction on the pool
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    pub fn users(&mut self) -> UserRepository<'_> {
        UserRepository::new(&mut *self.tx)
    }

    pub fn courses(&mut self) -> CourseRepository<'_> {
        CourseRepository::new(&mut *self.tx)
    }

    pub fn students(&mut self) -> StudentRepository<'_> {
        StudentRepository::new(&mut *self.tx)
    }

    pub fn attendance(&mut self) -> AttendanceRepository<'_> {
        AttendanceRepository::new(&mut *self.tx)
    }

    /// Commit every change made through this unit of work
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }
}
