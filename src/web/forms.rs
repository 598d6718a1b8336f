use serde::Deserialize;

use crate::error::AppError;
use crate::models::Student;

/// Raw body of the add and edit forms. Fields are optional so a missing one
/// is reported as a bad request instead of a generic extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct StudentSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
}

/// State of the student form as rendered on the add and edit pages. Values
/// are kept as text so a rejected submission can be echoed back unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub age: String,
    pub error: Option<String>,
}

impl StudentForm {
    /// Populate the form from an existing student when editing.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age.to_string(),
            error: None,
        }
    }

    /// Take the three fields out of a submission, rejecting the request when
    /// any of them is absent.
    pub fn from_submission(submission: StudentSubmission) -> Result<Self, AppError> {
        fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
            value.ok_or_else(|| AppError::BadRequest(format!("missing form field `{field}`")))
        }

        Ok(Self {
            name: required(submission.name, "name")?,
            email: required(submission.email, "email")?,
            age: required(submission.age, "age")?,
            error: None,
        })
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Validate the inputs and return typed values ready for persistence.
    pub fn parse_inputs(&self) -> Result<(String, String, i64), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required.".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err("Email is required.".to_string());
        }
        let age_raw = self.age.trim();
        if age_raw.is_empty() {
            return Err("Age is required.".to_string());
        }
        let age = age_raw
            .parse::<i64>()
            .map_err(|_| "Age must be an integer.".to_string())?;
        Ok((name.to_string(), email.to_string(), age))
    }
}
