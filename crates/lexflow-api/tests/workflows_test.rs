mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{api_path, basic_auth, spawn_app};
use mockito::Matcher;
use serde_json::json;

fn pdf(name: &str) -> Part {
    Part::bytes(bytes::Bytes::from_static(b"%PDF-1.4 test"))
        .file_name(name)
        .mime_type("application/pdf")
}

#[tokio::test]
async fn catalog_lists_nine_workflows() {
    let app = spawn_app(&[("N8N_WEBHOOK_PETITION", "http://n8n.internal/hook/petition")]);

    let response = app.client().get(&api_path("/workflows")).await;

    assert_eq!(response.status_code(), 200);
    let body: Vec<serde_json::Value> = response.json();
    assert_eq!(body.len(), 9);
    assert_eq!(body[0]["id"], "demand-letter");
    assert_eq!(body[0]["fields"][0]["key"], "stowersDemand");

    let petition = body.iter().find(|w| w["id"] == "petition").unwrap();
    assert_eq!(petition["configured"], true);

    let motion = body.iter().find(|w| w["id"] == "motion").unwrap();
    assert_eq!(motion["configured"], false);
    assert_eq!(motion["title"], "Draft a Motion");
    assert_eq!(motion["fields"][0]["key"], "motionType");
    assert_eq!(motion["fields"][0]["required"], true);
}

#[tokio::test]
async fn submission_requires_credentials() {
    let app = spawn_app(&[]);
    let form = MultipartForm::new().add_text("matter", "00042-Smith");

    let response = app
        .client()
        .post(&api_path("/workflows/petition/submissions"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 401);

    let form = MultipartForm::new().add_text("matter", "00042-Smith");
    let response = app
        .client()
        .post(&api_path("/workflows/petition/submissions"))
        .add_header("Authorization", basic_auth("test", "wrong"))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn unknown_workflow_is_not_found() {
    let app = spawn_app(&[]);
    let form = MultipartForm::new().add_text("matter", "00042-Smith");

    let response = app
        .client()
        .post(&api_path("/workflows/appeal/submissions"))
        .add_header("Authorization", basic_auth("test", "pass"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Legal Workflow 'appeal'"));
    assert!(app.stored_keys().await.is_empty());
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let app = spawn_app(&[]);

    let response = app
        .client()
        .post(&api_path("/workflows/petition/submissions"))
        .add_header("Authorization", basic_auth("test", "pass"))
        .json(&json!({"matter": "00042-Smith"}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Expected a multipart form"));
    assert!(app.stored_keys().await.is_empty());
}

#[tokio::test]
async fn demand_letter_uploads_then_delivers() {
    let mut n8n = mockito::Server::new_async().await;
    let hook = n8n
        .mock("POST", "/webhook/demand-letter")
        .match_body(Matcher::PartialJson(json!({
            "workflowType": "demand-letter",
            "matter": "00042-Smith",
            "notes": "Policy limits demand",
            "fileCount": 2,
            "stowersDemand": true,
            "user": "test"
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let url = n8n.url();
    let app = spawn_app(&[("N8N_BASE_URL", url.as_str())]);
    let form = MultipartForm::new()
        .add_text("matter", "00042-Smith")
        .add_text("notes", "Policy limits demand")
        .add_text("stowersDemand", "on")
        .add_text("motionType", "ignored")
        .add_part("files", pdf("police-report.pdf"))
        .add_part("files", pdf("medical.pdf"));

    let response = app
        .client()
        .post(&api_path("/workflows/demand-letter/submissions"))
        .add_header("Authorization", basic_auth("test", "pass"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let receipt: serde_json::Value = response.json();
    assert_eq!(receipt["delivery"]["status"], "delivered");
    assert_eq!(receipt["delivery"]["statusCode"], 200);
    assert!(receipt["payload"].get("motionType").is_none());

    let files = receipt["payload"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files
        .iter()
        .all(|f| f.as_str().unwrap().starts_with("demand-letter/")));

    let mut stored = app.stored_keys().await;
    stored.sort();
    let mut sent: Vec<String> = files
        .iter()
        .map(|f| f.as_str().unwrap().to_string())
        .collect();
    sent.sort();
    assert_eq!(stored, sent);
    hook.assert_async().await;
}

#[tokio::test]
async fn other_matter_text_replaces_selector() {
    let mut n8n = mockito::Server::new_async().await;
    let hook = n8n
        .mock("POST", "/webhook/affidavit")
        .match_body(Matcher::PartialJson(json!({
            "matter": "Walk-in: Patel",
            "fileCount": 0,
            "files": []
        })))
        .with_status(202)
        .expect(1)
        .create_async()
        .await;

    let url = n8n.url();
    let app = spawn_app(&[("N8N_BASE_URL", url.as_str())]);
    let form = MultipartForm::new()
        .add_text("matter", "other")
        .add_text("matterOther", "Walk-in: Patel");

    let response = app
        .client()
        .post(&api_path("/workflows/affidavit/submissions"))
        .add_header("Authorization", basic_auth("test", "pass"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    hook.assert_async().await;
}

#[tokio::test]
async fn motion_without_type_is_rejected_before_upload() {
    let mut n8n = mockito::Server::new_async().await;
    let hook = n8n
        .mock("POST", "/webhook/motion")
        .expect(0)
        .create_async()
        .await;

    let url = n8n.url();
    let app = spawn_app(&[("N8N_BASE_URL", url.as_str())]);
    let form = MultipartForm::new()
        .add_text("matter", "00077-Reyes")
        .add_part("files", pdf("draft.pdf"));

    let response = app
        .client()
        .post(&api_path("/workflows/motion/submissions"))
        .add_header("Authorization", basic_auth("test", "pass"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Motion type is required");
    assert!(app.stored_keys().await.is_empty());
    hook.assert_async().await;
}

#[tokio::test]
async fn unconfigured_destination_keeps_uploads_and_reports_failure() {
    let app = spawn_app(&[]);
    let form = MultipartForm::new()
        .add_text("matter", "00042-Smith")
        .add_part("files", pdf("petition.pdf"));

    let response = app
        .client()
        .post(&api_path("/workflows/petition/submissions"))
        .add_header("Authorization", basic_auth("test", "pass"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 502);
    let receipt: serde_json::Value = response.json();
    assert_eq!(receipt["delivery"]["status"], "failed");
    assert_eq!(receipt["uploaded"].as_array().unwrap().len(), 1);
    assert_eq!(app.stored_keys().await.len(), 1);
}
