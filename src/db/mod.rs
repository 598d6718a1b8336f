//! Persistence module split across logical submodules.

mod connection;
mod students;

pub use connection::{ensure_schema, open_store, open_store_in_memory};
pub use students::{
    create_student, delete_student, email_taken_by_other, fetch_student, fetch_students,
    save_edit, update_student, EditOutcome,
};
