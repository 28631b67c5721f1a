//! HTTP contract tests for the `reqwest` backend against a mock server.
//!
//! The client is blocking, so every call runs on `spawn_blocking`.

use tenderdesk::backend::http::{HttpBackend, HttpFormSubmitter};
use tenderdesk::backend::{DocumentBackend, UploadRequest};
use tenderdesk::config::BackendConfig;
use tenderdesk::csrf::token_from_cookies;
use tenderdesk::error::FormError;
use tenderdesk::filter::SubcontractorList;
use tenderdesk::model::attachment::{DocumentId, SelectedFile};
use tenderdesk::model::subcontractor::SubcontractorRow;
use tenderdesk::project::ProjectId;
use tenderdesk::submit::{EmailForm, FormSubmitter};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> BackendConfig {
    BackendConfig {
        base_url: server.uri(),
        ..BackendConfig::default()
    }
}

fn upload_request() -> UploadRequest {
    UploadRequest {
        document_type: "DRAWING".into(),
        title: "Site plan".into(),
        project_id: ProjectId(12),
        description: None,
        file: Some(SelectedFile::new("plan.pdf", b"%PDF-1.4".to_vec())),
        link: Some("https://sp.example.com/plan".into()),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upload_posts_multipart_with_csrf_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenders/upload-document/"))
        .and(header("X-CSRFToken", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "document_id": 42,
            "document_type": "Drawing"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let response = tokio::task::spawn_blocking(move || {
        let backend = HttpBackend::new(&config).unwrap();
        let token = token_from_cookies("csrftoken=tok", "csrftoken").unwrap();
        backend.upload_document(&upload_request(), &token)
    })
    .await
    .unwrap()
    .unwrap();

    assert!(response.success);
    assert_eq!(response.document_id, Some(DocumentId(42)));

    let request = &server.received_requests().await.unwrap()[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&request.body);
    for field in ["document_type", "title", "project_id", "file", "sharepoint_link"] {
        assert!(body.contains(&format!("name=\"{field}\"")), "missing {field}");
    }
    assert!(!body.contains("name=\"description\""));
    assert!(body.contains("filename=\"plan.pdf\""));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn remove_posts_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenders/document/42/remove/"))
        .and(header("X-CSRFToken", "tok"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": false, "error": "locked"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let response = tokio::task::spawn_blocking(move || {
        let backend = HttpBackend::new(&config).unwrap();
        let token = token_from_cookies("csrftoken=tok", "csrftoken").unwrap();
        backend.remove_document(DocumentId(42), &token)
    })
    .await
    .unwrap()
    .unwrap();

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("locked"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn non_ok_status_keeps_backend_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenders/upload-document/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"success": false, "error": "Project not found"})),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let err = tokio::task::spawn_blocking(move || {
        let backend = HttpBackend::new(&config).unwrap();
        let token = token_from_cookies("csrftoken=tok", "csrftoken").unwrap();
        backend.upload_document(&upload_request(), &token)
    })
    .await
    .unwrap()
    .unwrap_err();

    match err {
        FormError::HttpStatus { status, reason } => {
            assert_eq!(status, 400);
            assert_eq!(reason.as_deref(), Some("Project not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn non_ok_status_without_json_reports_status_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenders/document/9/remove/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let err = tokio::task::spawn_blocking(move || {
        let backend = HttpBackend::new(&config).unwrap();
        let token = token_from_cookies("csrftoken=tok", "csrftoken").unwrap();
        backend.remove_document(DocumentId(9), &token)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert_eq!(err.user_reason(), "HTTP 502");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn email_form_posts_selected_subcontractors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenders/project/12/send-invitation/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    tokio::task::spawn_blocking(move || {
        let backend = HttpBackend::new(&config).unwrap();
        let mut list = SubcontractorList::new(vec![
            SubcontractorRow::new("5", "ElectriCo", "Electrical", ""),
            SubcontractorRow::new("6", "Acme", "Plumbing", ""),
            SubcontractorRow::new("7", "Volt", "Electrical", ""),
        ]);
        list.set_display_checked("5", true);
        list.set_display_checked("7", true);
        let url = "/tenders/project/12/send-invitation/";
        let mut form = EmailForm::new(url, url, list);
        form.subject = "Tender Invitation: Depot".into();

        let mut submitter = HttpFormSubmitter {
            backend: &backend,
            cookies: "csrftoken=tok".into(),
        };
        submitter.submit(&form)
    })
    .await
    .unwrap()
    .unwrap();

    let request = &server.received_requests().await.unwrap()[0];
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("subcontractors=5"));
    assert!(body.contains("subcontractors=7"));
    assert!(!body.contains("subcontractors=6"));
    assert!(body.contains("csrfmiddlewaretoken=tok"));
    assert!(body.contains("subject=Tender+Invitation%3A+Depot"));
}
