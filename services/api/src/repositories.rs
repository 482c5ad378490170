//! Repositories for database operations
//!
//! Every repository borrows the connection of a [`crate::unit_of_work::UnitOfWork`],
//! so all reads and writes of one request share a transaction.

pub mod attendance;
pub mod course;
pub mod student;

pub use attendance::{AttendanceRepository, AttendanceTally};
pub use course::CourseRepository;
pub use student::StudentRepository;
