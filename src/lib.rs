//! Student registry: a small form-driven web application over a single
//! SQLite table of students.
//!
//! The library exposes the store gateway and the router so the binary and the
//! integration tests build the application the same way.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod web;

pub use config::Config;
pub use db::{open_store, open_store_in_memory, EditOutcome};
pub use error::{AppError, StoreError};
pub use models::Student;
pub use web::{router, serve, AppState};
