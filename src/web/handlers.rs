use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use super::forms::{StudentForm, StudentSubmission};
use super::views;
use super::AppState;
use crate::db::{self, EditOutcome};
use crate::error::AppError;

/// Ids are matched as integers; anything else is an unknown route.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

fn render_edit(status: StatusCode, id: i64, form: &StudentForm) -> Response {
    (status, Html(views::edit_page(id, form))).into_response()
}

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let students = db::fetch_students(&state.conn.lock())?;
    Ok(Html(views::index_page(&students)))
}

pub async fn add_form() -> Html<String> {
    Html(views::add_page(&StudentForm::default()))
}

pub async fn add(
    State(state): State<AppState>,
    Form(submission): Form<StudentSubmission>,
) -> Result<Response, AppError> {
    let form = StudentForm::from_submission(submission)?;
    let (name, email, age) = match form.parse_inputs() {
        Ok(values) => values,
        Err(message) => {
            let form = form.with_error(message);
            return Ok((StatusCode::BAD_REQUEST, Html(views::add_page(&form))).into_response());
        }
    };

    db::create_student(&state.conn.lock(), &name, &email, age)?;
    Ok(Redirect::to("/").into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let student = db::fetch_student(&state.conn.lock(), id)?;
    Ok(Html(views::edit_page(id, &StudentForm::from_student(&student))))
}

/// Apply a submitted edit. The record must exist before the form is even
/// looked at; uniqueness and commit failures re-render the form inline.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(submission): Form<StudentSubmission>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let mut conn = state.conn.lock();
    let mut student = db::fetch_student(&conn, id)?;

    let form = StudentForm::from_submission(submission)?;
    let (name, email, age) = match form.parse_inputs() {
        Ok(values) => values,
        Err(message) => {
            return Ok(render_edit(StatusCode::BAD_REQUEST, id, &form.with_error(message)));
        }
    };
    student.name = name;
    student.email = email;
    student.age = age;

    let outcome = db::save_edit(&mut conn, &student)?;
    drop(conn);

    let response = match outcome {
        EditOutcome::Saved => Redirect::to("/").into_response(),
        EditOutcome::EmailTaken => {
            render_edit(StatusCode::OK, id, &form.with_error("Email already exists!"))
        }
        EditOutcome::UpdateFailed(message) => render_edit(
            StatusCode::OK,
            id,
            &form.with_error(format!("Update failed: {message}")),
        ),
    };
    Ok(response)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let mut conn = state.conn.lock();
    let student = db::fetch_student(&conn, id)?;
    db::delete_student(&mut conn, student.id)?;
    tracing::debug!(%student, "delete request served");
    Ok(Redirect::to("/"))
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
