//! End-to-end tests of the analyze flow against a stub backend.

mod common;

use common::{docx_with, image_only_pdf, RecordingClipboard, StubBackend, SUCCESS_BODY};
use tempfile::tempdir;

use trustfilter::ui::{NETWORK_ERROR_ALERT, NO_TACTICS, SERVER_ERROR_FALLBACK};
use trustfilter::{AnalysisClient, App, Config, RiskBand, UiStatus};

#[tokio::test]
async fn test_short_content_never_reaches_backend() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "   too short   ".to_string();
    let status = app.analyze().await.clone();

    assert_eq!(status, UiStatus::ContentTooShort);
    assert_eq!(backend.hits(), 0);
    assert!(!app.session().report().visible);
    assert!(app.session().action().is_enabled());
}

#[tokio::test]
async fn test_success_renders_report() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "\n  Your account is locked. Send your PIN now.  \n".to_string();
    app.session_mut().category = "banking".to_string();
    assert_eq!(app.analyze().await, &UiStatus::Done);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].client_id.as_deref(), Some("client-123"));
    assert_eq!(
        requests[0].body,
        serde_json::json!({
            "content": "Your account is locked. Send your PIN now.",
            "category": "banking",
        })
    );

    let session = app.session();
    let report = session.report();
    assert!(report.visible);
    assert!(!report.paywall_visible);
    assert_eq!(report.badge, Some(RiskBand::High));
    assert_eq!(report.score, "87");
    assert_eq!(report.tactics, vec!["Urgency", "Authority impersonation"]);
    assert_eq!(session.free_uses_left_display(), "4");
    assert!(session.alert().is_none());
    assert!(session.action().is_enabled());
}

#[tokio::test]
async fn test_sparse_result_uses_placeholders() {
    let backend = StubBackend::start(200, r#"{"risk_level": "unclear"}"#).await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "Is this message legitimate or not?".to_string();
    assert_eq!(app.analyze().await, &UiStatus::Done);

    let report = app.session().report();
    assert_eq!(report.badge, Some(RiskBand::Low));
    assert_eq!(report.score, "—");
    assert_eq!(report.tactics, vec![NO_TACTICS]);
    assert!(report.safe_reply.is_empty());
    assert_eq!(app.session().free_uses_left_display(), "—");
}

#[tokio::test]
async fn test_payment_required_shows_paywall() {
    let backend = StubBackend::start(402, r#"{"detail": "Free limit reached"}"#).await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "Please check this message for me".to_string();
    assert_eq!(app.analyze().await, &UiStatus::FreeLimitReached);

    let session = app.session();
    assert!(session.report().visible);
    assert!(session.report().paywall_visible);
    assert!(!session.report().has_result());
    assert_eq!(session.free_uses_left(), Some(0));
    assert!(session.alert().is_none());
    assert!(session.action().is_enabled());
}

#[tokio::test]
async fn test_payment_required_ignores_body() {
    for body in ["", "<html>Payment Required</html>"] {
        let backend = StubBackend::start(402, body).await;
        let mut app = backend.app(RecordingClipboard::default());

        app.session_mut().content = "Please check this message for me".to_string();
        assert_eq!(app.analyze().await, &UiStatus::FreeLimitReached);

        let session = app.session();
        assert!(session.report().paywall_visible, "body {:?}", body);
        assert!(!session.report().has_result());
        assert_eq!(session.free_uses_left(), Some(0));
        assert!(session.action().is_enabled());
    }
}

#[tokio::test]
async fn test_undecodable_success_body_fails() {
    let backend = StubBackend::start(200, "not json").await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "Please check this message for me".to_string();
    let status = app.analyze().await.clone();

    assert!(matches!(status, UiStatus::Failed(_)), "got {:?}", status);
    let session = app.session();
    assert!(!session.report().visible);
    assert!(session.alert().is_none());
    assert_eq!(session.free_uses_left_display(), "—");
    assert!(session.action().is_enabled());
}

#[tokio::test]
async fn test_server_error_alerts_detail() {
    let backend = StubBackend::start(500, r#"{"detail": "Model overloaded"}"#).await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "Please check this message for me".to_string();
    assert_eq!(app.analyze().await, &UiStatus::ServerError(500));
    assert_eq!(app.session().alert(), Some("Model overloaded"));
    assert!(!app.session().report().visible);
    assert!(app.session().action().is_enabled());
}

#[tokio::test]
async fn test_server_error_without_detail_uses_fallback() {
    let backend = StubBackend::start(503, "<html>Bad Gateway</html>").await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "Please check this message for me".to_string();
    assert_eq!(app.analyze().await, &UiStatus::ServerError(503));
    assert_eq!(app.session().alert(), Some(SERVER_ERROR_FALLBACK));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = Config::default().with_api_base(&format!("http://127.0.0.1:{}", port));
    let client = AnalysisClient::new(&config).unwrap();
    let mut app = App::with_parts(
        client,
        "client-123".to_string(),
        Box::new(RecordingClipboard::default()),
        "general",
    );

    app.session_mut().content = "Please check this message for me".to_string();
    assert_eq!(app.analyze().await, &UiStatus::NetworkError);
    assert_eq!(app.session().alert(), Some(NETWORK_ERROR_ALERT));
    assert!(app.session().action().is_enabled());
}

#[tokio::test]
async fn test_new_analysis_replaces_previous_report() {
    let backend = StubBackend::start(500, r#"{"detail": "boom"}"#).await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "Please check this message for me".to_string();
    app.analyze().await;
    app.session_mut().content = "short".to_string();
    app.analyze().await;

    assert_eq!(app.session().status(), &UiStatus::ContentTooShort);
    assert!(app.session().alert().is_none());
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_text_file_round_trip() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let mut app = backend.app(RecordingClipboard::default());
    let dir = tempdir().unwrap();
    let path = dir.path().join("message.TXT");
    std::fs::write(&path, "\u{feff}\n\nCongratulations, you won a prize!\n\n").unwrap();

    let status = app.load_file(&path).await.clone();
    assert_eq!(
        status,
        UiStatus::FileLoaded {
            name: "message.TXT".to_string(),
            chars: 33,
        }
    );
    assert_eq!(app.session().content, "Congratulations, you won a prize!");

    app.analyze().await;
    assert_eq!(
        backend.requests()[0].body["content"],
        "Congratulations, you won a prize!"
    );
}

#[tokio::test]
async fn test_docx_file_loads_paragraphs() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let mut app = backend.app(RecordingClipboard::default());
    let dir = tempdir().unwrap();
    let path = dir.path().join("offer.docx");
    std::fs::write(&path, docx_with(&["Job offer", "Pay the training fee first"])).unwrap();

    app.load_file(&path).await;
    assert_eq!(app.session().content, "Job offer\n\nPay the training fee first");
    assert!(app.session().action().is_enabled());
}

#[tokio::test]
async fn test_unreadable_pdf_keeps_content() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let mut app = backend.app(RecordingClipboard::default());
    let dir = tempdir().unwrap();
    let path = dir.path().join("scan.pdf");
    std::fs::write(&path, image_only_pdf()).unwrap();

    app.session_mut().content = "text typed earlier".to_string();
    let status = app.load_file(&path).await.clone();

    assert_eq!(status, UiStatus::FileUnreadable("scan.pdf".to_string()));
    assert_eq!(app.session().content, "text typed earlier");
    assert_eq!(backend.hits(), 0);
    assert!(app.session().action().is_enabled());
}

#[tokio::test]
async fn test_unsupported_file_keeps_content() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let mut app = backend.app(RecordingClipboard::default());
    let dir = tempdir().unwrap();
    let path = dir.path().join("photo.png");
    std::fs::write(&path, b"\x89PNG").unwrap();

    app.session_mut().content = "keep me".to_string();
    let status = app.load_file(&path).await.clone();

    assert_eq!(status, UiStatus::FileUnsupported("photo.png".to_string()));
    assert_eq!(app.session().content, "keep me");
}

#[tokio::test]
async fn test_copy_reply() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let clipboard = RecordingClipboard::default();
    let copied = clipboard.copied.clone();
    let mut app = backend.app(clipboard);

    app.session_mut().content = "Please check this message for me".to_string();
    app.analyze().await;
    assert_eq!(app.copy_reply().await, &UiStatus::Copied);
    assert_eq!(
        copied.lock().unwrap().as_slice(),
        ["I will verify this through official channels."]
    );
}

#[tokio::test]
async fn test_copy_without_clipboard_fails_softly() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let mut app = backend.app(RecordingClipboard {
        unavailable: true,
        ..Default::default()
    });

    app.session_mut().content = "Please check this message for me".to_string();
    app.analyze().await;
    assert_eq!(app.copy_reply().await, &UiStatus::CopyFailed);
    assert!(app.session().report().has_result());
}

#[tokio::test]
async fn test_clear_resets_session() {
    let backend = StubBackend::start(200, SUCCESS_BODY).await;
    let mut app = backend.app(RecordingClipboard::default());

    app.session_mut().content = "Please check this message for me".to_string();
    app.analyze().await;
    app.clear();

    let session = app.session();
    assert!(session.content.is_empty());
    assert_eq!(session.status(), &UiStatus::Ready);
    assert!(!session.report().visible);
    assert_eq!(session.free_uses_left_display(), "4");
}
