use rusqlite::{params, Connection, Error as SqlError, ErrorCode, OptionalExtension, Row};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::models::Student;

/// Result of submitting the edit form. Only the uniqueness check and the
/// commit are distinguished; everything else is a plain [`StoreError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    EmailTaken,
    UpdateFailed(String),
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
    })
}

/// Every student ordered by id. No filtering or paging.
pub fn fetch_students(conn: &Connection) -> StoreResult<Vec<Student>> {
    let mut stmt = conn.prepare("SELECT id, name, email, age FROM students ORDER BY id")?;

    let students = stmt
        .query_map([], student_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(students)
}

/// Look up one student, failing with [`StoreError::NotFound`] when the id is
/// unknown.
pub fn fetch_student(conn: &Connection, id: i64) -> StoreResult<Student> {
    conn.query_row(
        "SELECT id, name, email, age FROM students WHERE id = ?1",
        params![id],
        student_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound(id))
}

/// Insert a new student and return it with the id SQLite assigned.
pub fn create_student(conn: &Connection, name: &str, email: &str, age: i64) -> StoreResult<Student> {
    conn.execute(
        "INSERT INTO students (name, email, age) VALUES (?1, ?2, ?3)",
        params![name, email, age],
    )
    .map_err(map_constraint)?;

    let student = Student {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        age,
    };
    info!(id = student.id, %student, "student created");
    Ok(student)
}

/// Overwrite name, email and age of an existing student. Touching zero rows is
/// reported as [`StoreError::NotFound`].
pub fn update_student(conn: &Connection, student: &Student) -> StoreResult<()> {
    let updated = conn
        .execute(
            "UPDATE students SET name = ?1, email = ?2, age = ?3 WHERE id = ?4",
            params![student.name, student.email, student.age, student.id],
        )
        .map_err(map_constraint)?;

    if updated == 0 {
        Err(StoreError::NotFound(student.id))
    } else {
        Ok(())
    }
}

/// Whether a student other than `id` already uses `email`.
pub fn email_taken_by_other(conn: &Connection, email: &str, id: i64) -> StoreResult<bool> {
    let taken: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM students WHERE email = ?1 AND id <> ?2)",
        params![email, id],
        |row| row.get(0),
    )?;
    Ok(taken)
}

/// Persist an edited student. The uniqueness check runs first; the update then
/// runs in its own transaction, which is rolled back if the update or the
/// commit fails.
pub fn save_edit(conn: &mut Connection, student: &Student) -> StoreResult<EditOutcome> {
    if email_taken_by_other(conn, &student.email, student.id)? {
        warn!(id = student.id, email = %student.email, "edit rejected: email already in use");
        return Ok(EditOutcome::EmailTaken);
    }

    let tx = match conn.transaction() {
        Ok(tx) => tx,
        Err(err) => return Ok(EditOutcome::UpdateFailed(err.to_string())),
    };

    if let Err(err) = update_student(&tx, student) {
        if let Err(rollback_err) = tx.rollback() {
            warn!(error = %rollback_err, "rollback after failed update also failed");
        }
        warn!(id = student.id, error = %err, "edit rolled back");
        return Ok(EditOutcome::UpdateFailed(err.to_string()));
    }

    match tx.commit() {
        Ok(()) => {
            info!(id = student.id, "student updated");
            Ok(EditOutcome::Saved)
        }
        Err(err) => {
            warn!(id = student.id, error = %err, "edit commit failed");
            Ok(EditOutcome::UpdateFailed(err.to_string()))
        }
    }
}

/// Remove a student, then renumber the survivors to `1..=n` in their previous
/// id order. Both steps share one transaction.
pub fn delete_student(conn: &mut Connection, id: i64) -> StoreResult<()> {
    let tx = conn.transaction()?;

    let deleted = tx.execute("DELETE FROM students WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(StoreError::NotFound(id));
    }

    let remaining = {
        let mut stmt = tx.prepare("SELECT id FROM students ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids
    };

    // Ascending order guarantees the target id is already free.
    let mut renumbered = 0usize;
    for (new_id, old_id) in (1..).zip(remaining) {
        if new_id != old_id {
            tx.execute(
                "UPDATE students SET id = ?1 WHERE id = ?2",
                params![new_id, old_id],
            )?;
            renumbered += 1;
        }
    }

    tx.commit()?;
    info!(id, renumbered, "student deleted");
    Ok(())
}

/// Surface constraint failures (duplicate email, missing column value) as
/// [`StoreError::ConstraintViolation`] carrying SQLite's own message.
fn map_constraint(err: SqlError) -> StoreError {
    if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
        let message = match &err {
            SqlError::SqliteFailure(_, Some(message)) => message.clone(),
            _ => err.to_string(),
        };
        StoreError::ConstraintViolation(message)
    } else {
        err.into()
    }
}
