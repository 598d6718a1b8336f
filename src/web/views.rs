//! Server-side HTML for the list page, the add and edit forms, and error
//! pages. Every piece of user-supplied text goes through [`escape`].

use std::fmt::Write as _;

use axum::http::StatusCode;

use super::forms::StudentForm;
use crate::models::Student;

/// Escape the characters that are significant in HTML text and attribute
/// values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// The home page: a table of every student with edit and delete links.
pub fn index_page(students: &[Student]) -> String {
    let mut body = String::from("<h1>Students</h1>\n<p><a href=\"/add\">Add Student</a></p>\n");

    if students.is_empty() {
        body.push_str("<p>No students yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Email</th><th>Age</th>\
             <th>Actions</th></tr></thead>\n<tbody>\n",
        );
        for student in students {
            // Writing into a String cannot fail.
            let _ = writeln!(
                body,
                "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{age}</td>\
                 <td><a href=\"/edit/{id}\">Edit</a> <a href=\"/delete/{id}\">Delete</a></td></tr>",
                id = student.id,
                name = escape(&student.name),
                email = escape(&student.email),
                age = student.age,
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout("Students", &body)
}

fn form_fields(form: &StudentForm) -> String {
    format!(
        "<label>Name <input type=\"text\" name=\"name\" value=\"{name}\" required></label><br>\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\" required></label><br>\n\
         <label>Age <input type=\"number\" name=\"age\" value=\"{age}\" required></label><br>\n",
        name = escape(&form.name),
        email = escape(&form.email),
        age = escape(&form.age),
    )
}

fn error_banner(form: &StudentForm) -> String {
    form.error
        .as_deref()
        .map(|message| format!("<p class=\"error\">{}</p>\n", escape(message)))
        .unwrap_or_default()
}

fn form_page(title: &str, action: &str, submit: &str, form: &StudentForm) -> String {
    let body = format!(
        "<h1>{title}</h1>\n{error}<form method=\"post\" action=\"{action}\">\n{fields}\
         <button type=\"submit\">{submit}</button>\n</form>\n<p><a href=\"/\">Back</a></p>\n",
        title = escape(title),
        error = error_banner(form),
        fields = form_fields(form),
    );
    layout(title, &body)
}

/// Creation form, empty on first display and echoing input after a rejection.
pub fn add_page(form: &StudentForm) -> String {
    form_page("Add Student", "/add", "Add", form)
}

/// Edit form for student `id`, pre-filled from the record or the rejected
/// submission.
pub fn edit_page(id: i64, form: &StudentForm) -> String {
    form_page("Edit Student", &format!("/edit/{id}"), "Update", form)
}

pub fn error_page(status: StatusCode, detail: Option<&str>) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let mut body = format!("<h1>{} {}</h1>\n", status.as_u16(), escape(reason));
    if let Some(detail) = detail {
        let _ = writeln!(body, "<p>{}</p>", escape(detail));
    }
    body.push_str("<p><a href=\"/\">Back to the list</a></p>\n");
    layout(reason, &body)
}
