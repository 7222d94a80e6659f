//! Integration tests for the API client using a wiremock mock server

use forms_tui::api::{ApiClient, ApiClientTrait, ApiError};
use forms_tui::state::{
    assemble_submission, Field, FieldKind, FillFocus, FormFill, NewForm, NewProject, NewUser,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_list_projects_accepts_integer_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Trial A", "created_at": "2024-03-05 09:30:00", "forms_count": 2 },
            { "id": 2, "name": "Trial B", "forms_count": null }
        ])))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    let projects = client.list_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].id, "1");
    assert_eq!(projects[0].forms_count, 2);
    assert_eq!(projects[1].name, "Trial B");
    assert_eq!(projects[1].forms_count, 0);
}

#[tokio::test]
async fn test_session_cookie_sent_with_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "u1", "email": "root@clinic.org", "is_admin": true }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), Some("session=abc123".to_string()));
    let users = client.list_users().await.unwrap();

    assert_eq!(users[0].email, "root@clinic.org");
    assert!(users[0].is_admin);
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Project already exists" })),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    let err = client
        .create_project(&NewProject {
            name: "Trial A".to_string(),
        })
        .await
        .unwrap_err();

    match &err {
        ApiError::Server { status, message } => {
            assert_eq!(*status, StatusCode::BAD_REQUEST);
            assert_eq!(message.as_deref(), Some("Project already exists"));
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert_eq!(
        err.alert_text("Error creating project"),
        "Project already exists"
    );
}

#[tokio::test]
async fn test_html_error_page_falls_back_to_generic_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/forms/7"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("<html><body>Internal Error</body></html>"),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    let err = client.delete_form("7").await.unwrap_err();

    assert!(matches!(
        &err,
        ApiError::Server { status, message: None } if *status == StatusCode::INTERNAL_SERVER_ERROR
    ));
    assert_eq!(err.alert_text("Error deleting form"), "Error deleting form");
}

#[tokio::test]
async fn test_create_user_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({
            "email": "nurse@clinic.org",
            "password": "s3cret",
            "is_admin": false
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    client
        .create_user(&NewUser {
            email: "nurse@clinic.org".to_string(),
            password: "s3cret".to_string(),
            is_admin: false,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_form_sends_field_schema() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/forms"))
        .and(body_json(json!({
            "name": "Intake",
            "project_id": "1",
            "fields": [
                { "label": "Name", "type": "text", "options": [] },
                { "label": "Sex", "type": "radio", "options": ["F", "M"] }
            ]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    client
        .create_form(&NewForm {
            name: "Intake".to_string(),
            project_id: "1".to_string(),
            fields: vec![Field::text("Name"), Field::radio("Sex", &["F", "M"])],
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submission_sends_checked_options_as_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/submissions"))
        .and(body_json(json!({
            "patient_number": "12",
            "form_id": "3",
            "fields": { "Age": "30", "Colour": ["Red", "Blue"] }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut fill = FormFill::new(vec![
        Field::number("Age"),
        Field::checkbox("Colour", &["Red", "Green", "Blue"]),
    ]);
    for c in "12".chars() {
        fill.push_char(c);
    }
    fill.focus = FillFocus::Field(0);
    for c in "30".chars() {
        fill.push_char(c);
    }
    fill.focus = FillFocus::Field(1);
    fill.toggle();
    fill.move_option(true);
    fill.move_option(true);
    fill.toggle();

    let body = assemble_submission(&fill.patient_number, Some("3"), &fill).unwrap();
    let client = ApiClient::new(&mock_server.uri(), None);
    client.create_submission(&body).await.unwrap();
}

#[tokio::test]
async fn test_unknown_field_type_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Intake",
            "fields": [{ "label": "When", "type": "date" }]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    let err = client.get_form("3").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.alert_text("Error loading form"), "Error loading form");
}

#[tokio::test]
async fn test_form_list_tolerates_unknown_field_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/1/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Intake", "fields": [{ "label": "Age", "type": "number" }] },
            { "id": 4, "name": "Legacy", "fields": [{ "label": "When", "type": "date" }] }
        ])))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    let forms = client.list_project_forms("1").await.unwrap();

    assert_eq!(forms.len(), 2);
    assert_eq!(forms[1].name, "Legacy");
    assert_eq!(forms[1].field_count(), 1);
}

#[tokio::test]
async fn test_get_form_parses_schema() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Intake",
            "project_id": 1,
            "fields": [
                { "label": "Camp", "type": "dropdown", "options": ["North", "South"] }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    let form = client.get_form("3").await.unwrap();

    assert_eq!(form.id, "3");
    assert_eq!(
        form.fields[0].kind,
        FieldKind::Dropdown {
            options: vec!["North".to_string(), "South".to_string()]
        }
    );
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": "2024-03-05T10:15:00Z"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None);
    assert!(client.health().await.unwrap().is_healthy());
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let client = ApiClient::new("http://127.0.0.1:9", None);
    let err = client.list_forms().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.alert_text("Error loading forms"), "Error loading forms");
}
