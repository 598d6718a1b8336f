//! Domain model mirroring the `students` table. The type stays a plain data
//! holder so the persistence and web layers can pass it around freely.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single student record.
pub struct Student {
    /// Primary key. Reassigned when an earlier record is deleted, so it is only
    /// stable until the next delete.
    pub id: i64,
    /// Display name, never empty.
    pub name: String,
    /// Contact address, unique across all records.
    pub email: String,
    pub age: i64,
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Student {}>", self.name)
    }
}
