use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use student_registry::{open_store_in_memory, router, AppState};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(open_store_in_memory().unwrap()))
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn list_page(app: &Router) -> String {
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

fn assert_redirects_home(response: &Response) {
    assert!(response.status().is_redirection(), "status {}", response.status());
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn empty_list_renders() {
    let app = app();
    let html = list_page(&app).await;
    assert!(html.contains("No students yet."));
    assert!(html.contains("href=\"/add\""));
}

#[tokio::test]
async fn add_form_is_empty() {
    let app = app();
    let response = get(&app, "/add").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/add\""));
    assert!(html.contains("name=\"email\" value=\"\""));
}

#[tokio::test]
async fn add_then_list_shows_student_once() {
    let app = app();
    let response = post_form(&app, "/add", "name=Alice&email=a%40x.com&age=20").await;
    assert_redirects_home(&response);

    let html = list_page(&app).await;
    assert_eq!(html.matches("a@x.com").count(), 1);
    assert!(html.contains("<td>1</td><td>Alice</td>"));
}

#[tokio::test]
async fn duplicate_email_on_add_is_a_server_error() {
    let app = app();
    post_form(&app, "/add", "name=Alice&email=a%40x.com&age=20").await;

    let response = post_form(&app, "/add", "name=Alicia&email=a%40x.com&age=22").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = list_page(&app).await;
    assert_eq!(html.matches("a@x.com").count(), 1);
    assert!(!html.contains("Alicia"));
}

#[tokio::test]
async fn add_with_missing_field_is_bad_request() {
    let app = app();
    let response = post_form(&app, "/add", "name=Alice&email=a%40x.com").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("missing form field `age`"));
}

#[tokio::test]
async fn add_with_non_numeric_age_rerenders_form() {
    let app = app();
    let response = post_form(&app, "/add", "name=Alice&email=a%40x.com&age=old").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Age must be an integer."));
    assert!(html.contains("value=\"Alice\""));
    assert!(list_page(&app).await.contains("No students yet."));
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let app = app();
    post_form(&app, "/add", "name=Alice&email=a%40x.com&age=20").await;

    let response = get(&app, "/edit/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("value=\"Alice\""));
    assert!(html.contains("value=\"a@x.com\""));
    assert!(html.contains("value=\"20\""));
}

#[tokio::test]
async fn edit_to_other_students_email_is_rejected() {
    let app = app();
    post_form(&app, "/add", "name=Alice&email=a%40x.com&age=20").await;
    post_form(&app, "/add", "name=Bob&email=b%40x.com&age=21").await;

    let response = post_form(&app, "/edit/2", "name=Robert&email=a%40x.com&age=21").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Email already exists!"));

    let html = list_page(&app).await;
    assert!(html.contains("<td>2</td><td>Bob</td><td>b@x.com</td>"));
    assert!(!html.contains("Robert"));
}

#[tokio::test]
async fn edit_with_own_email_succeeds() {
    let app = app();
    post_form(&app, "/add", "name=Alice&email=a%40x.com&age=20").await;

    let response = post_form(&app, "/edit/1", "name=Alice+Smith&email=a%40x.com&age=21").await;
    assert_redirects_home(&response);

    let html = list_page(&app).await;
    assert!(html.contains("<td>1</td><td>Alice Smith</td><td>a@x.com</td><td>21</td>"));
}

#[tokio::test]
async fn edit_unknown_id_is_not_found() {
    let app = app();
    post_form(&app, "/add", "name=Alice&email=a%40x.com&age=20").await;

    assert_eq!(get(&app, "/edit/9").await.status(), StatusCode::NOT_FOUND);
    let response = post_form(&app, "/edit/9", "name=X&email=x%40x.com&age=1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = list_page(&app).await;
    assert!(html.contains("<td>1</td><td>Alice</td>"));
    assert!(!html.contains("x@x.com"));
}

#[tokio::test]
async fn delete_renumbers_remaining_students() {
    let app = app();
    post_form(&app, "/add", "name=Alice&email=a%40x.com&age=20").await;
    post_form(&app, "/add", "name=Bob&email=b%40x.com&age=21").await;

    let response = get(&app, "/delete/1").await;
    assert_redirects_home(&response);

    let html = list_page(&app).await;
    assert!(html.contains("<td>1</td><td>Bob</td><td>b@x.com</td><td>21</td>"));
    assert!(!html.contains("Alice"));
    assert!(!html.contains("/edit/2"));
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let app = app();
    post_form(&app, "/add", "name=Alice&email=a%40x.com&age=20").await;

    assert_eq!(get(&app, "/delete/3").await.status(), StatusCode::NOT_FOUND);
    assert!(list_page(&app).await.contains("<td>1</td><td>Alice</td>"));
}

#[tokio::test]
async fn non_integer_id_is_not_found() {
    let app = app();
    assert_eq!(get(&app, "/edit/abc").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/delete/abc").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/nowhere").await.status(), StatusCode::NOT_FOUND);
}
