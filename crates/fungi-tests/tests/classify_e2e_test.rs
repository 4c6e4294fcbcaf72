//! End-to-end tests: upload form + real client + stub prediction service
//!
//! These drive the whole submission path over a real socket, so the form,
//! the client, and the wire contract stay in sync with each other.

use std::sync::Arc;
use std::time::Duration;

use fungi_client::testing::{stub_router, StubReply, StubService, TestServer};
use fungi_client::ImageFile;
use fungi_form::testing::RecordingView;
use fungi_form::{SubmitOutcome, UploadForm, NO_FILE_MESSAGE, UPLOAD_FAILED_MESSAGE};
use fungi_tests::{amanita, photo};
use pretty_assertions::assert_eq;

async fn form_against(
    stub: &StubService,
) -> (
    TestServer,
    UploadForm<fungi_client::PredictClient, RecordingView>,
) {
    let server = TestServer::start(stub_router(stub.clone())).await.unwrap();
    let form = UploadForm::new(server.client.clone(), RecordingView::default());
    (server, form)
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_successful_classification_renders_result() {
    let stub = StubService::new();
    stub.enqueue(StubReply::predict("Amanita muscaria", 0.9231));
    let (_server, form) = form_against(&stub).await;

    form.select_file(photo());
    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Rendered(amanita()));
    assert_eq!(stub.hits(), 1);

    let view = form.view();
    assert_eq!(view.reveal_count, 1);
    assert_eq!(
        view.prediction.as_deref(),
        Some("Predicted Species: Amanita muscaria")
    );
    assert_eq!(view.confidence.as_deref(), Some("Confidence: 92.31%"));
    assert!(view.alerts.is_empty());
}

#[tokio::test]
async fn test_no_file_selected_makes_zero_network_calls() {
    let stub = StubService::new();
    let (_server, form) = form_against(&stub).await;

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::NoFileSelected);
    assert_eq!(stub.hits(), 0);
    let view = form.view();
    assert_eq!(view.alerts, vec![NO_FILE_MESSAGE.to_string()]);
    assert!(!view.revealed());
}

#[tokio::test]
async fn test_server_error_alerts_and_keeps_region_hidden() {
    let stub = StubService::new();
    stub.enqueue(StubReply::reject(500, "model unavailable"));
    let (_server, form) = form_against(&stub).await;

    form.select_file(photo());
    let outcome = form.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected("model unavailable".to_string())
    );
    let view = form.view();
    assert_eq!(view.alerts, vec!["Error: model unavailable".to_string()]);
    assert!(!view.revealed());
    assert!(view.prediction.is_none());
}

// =============================================================================
// Malformed Responses
// =============================================================================

#[tokio::test]
async fn test_unparseable_success_body_alerts_generic_message() {
    let stub = StubService::new();
    stub.enqueue(StubReply::raw(200, "<html>oops</html>"));
    let (_server, form) = form_against(&stub).await;

    form.select_file(photo());
    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    let view = form.view();
    assert_eq!(view.alerts, vec![UPLOAD_FAILED_MESSAGE.to_string()]);
    assert!(!view.revealed());
}

#[tokio::test]
async fn test_out_of_range_score_is_never_rendered() {
    let stub = StubService::new();
    stub.enqueue(StubReply::raw(200, r#"{"label": "x", "score": 2.0}"#));
    let (_server, form) = form_against(&stub).await;

    form.select_file(photo());
    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    let view = form.view();
    assert!(!view.revealed());
    assert!(view.prediction.is_none());
    assert!(view.confidence.is_none());
}

// =============================================================================
// Upload Validation
// =============================================================================

#[tokio::test]
async fn test_disallowed_extension_surfaces_server_text() {
    let stub = StubService::new();
    let (_server, form) = form_against(&stub).await;

    form.select_file(ImageFile::new("notes.txt", b"hello".to_vec()));
    let outcome = form.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected("File type not allowed".to_string())
    );
    assert_eq!(
        form.view().alerts,
        vec!["Error: File type not allowed".to_string()]
    );
}

// =============================================================================
// Resubmission and Overlap
// =============================================================================

#[tokio::test]
async fn test_resubmit_after_failure_succeeds() {
    let stub = StubService::new();
    stub.enqueue(StubReply::reject(500, "model unavailable"));
    stub.enqueue(StubReply::predict("Amanita muscaria", 0.9231));
    let (_server, form) = form_against(&stub).await;

    form.select_file(photo());
    assert!(matches!(form.submit().await, SubmitOutcome::Rejected(_)));

    // The failed attempt left no partial state behind
    assert!(!form.view().revealed());

    let outcome = form.submit().await;
    assert_eq!(outcome, SubmitOutcome::Rendered(amanita()));
    assert_eq!(form.view().reveal_count, 1);
    assert_eq!(stub.hits(), 2);
}

#[tokio::test]
async fn test_slow_first_response_loses_to_newer_submission() {
    let stub = StubService::new();
    stub.enqueue(StubReply::delayed(
        Duration::from_millis(300),
        StubReply::predict("Amanita muscaria", 0.9231),
    ));
    stub.enqueue(StubReply::predict("Boletus edulis", 0.61));

    let server = TestServer::start(stub_router(stub.clone())).await.unwrap();
    let form = Arc::new(UploadForm::new(
        server.client.clone(),
        RecordingView::default(),
    ));

    form.select_file(photo());
    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });

    // Let the first request reach the stub before submitting again
    tokio::time::sleep(Duration::from_millis(50)).await;

    form.select_file(ImageFile::new("second.jpg", vec![1, 2, 3]));
    let second = form.submit().await;
    assert!(matches!(second, SubmitOutcome::Rendered(_)));

    let first = first.await.unwrap();
    assert_eq!(first, SubmitOutcome::Stale);

    // The slow response never overwrote the newer result
    let view = form.view();
    assert_eq!(view.reveal_count, 1);
    assert_eq!(
        view.prediction.as_deref(),
        Some("Predicted Species: Boletus edulis")
    );
    assert_eq!(view.confidence.as_deref(), Some("Confidence: 61.00%"));
    assert_eq!(stub.hits(), 2);
}
