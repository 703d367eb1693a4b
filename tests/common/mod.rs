//! Shared helpers for integration tests: a stub analysis backend and a
//! recording clipboard.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use lopdf::{dictionary, Document, Object, Stream};

use trustfilter::client::CLIENT_ID_HEADER;
use trustfilter::clipboard::{Clipboard, ClipboardError};
use trustfilter::{AnalysisClient, App, Config};

/// A request as seen by the stub backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub client_id: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Backend that answers every `POST /analyze` with a fixed status and body.
pub struct StubBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    pub async fn start(status: u16, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/analyze", post(handle_analyze))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// App wired to this backend with a fixed client id.
    pub fn app(&self, clipboard: RecordingClipboard) -> App {
        let config = Config::default().with_api_base(&self.base_url());
        let client = AnalysisClient::new(&config).unwrap();
        App::with_parts(client, "client-123".to_string(), Box::new(clipboard), "general")
    }
}

async fn handle_analyze(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(&'static str, &'static str); 1], String) {
    let client_id = headers
        .get(CLIENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { client_id, body });

    (
        state.status,
        [("content-type", "application/json")],
        state.body.clone(),
    )
}

/// Clipboard that keeps what it was given, or fails when unavailable.
#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub copied: Arc<Mutex<Vec<String>>>,
    pub unavailable: bool,
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable);
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// A one-page PDF with no text operators, like a scanned document.
pub fn image_only_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {},
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A minimal DOCX whose body holds the given paragraphs.
pub fn docx_with(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut buf = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buf);
        zip.start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf.into_inner()
}

pub const SUCCESS_BODY: &str = r#"{
    "risk_level": "High risk",
    "red_flag_score": 87,
    "manipulation_tactics": ["Urgency", "Authority impersonation"],
    "missing_proof": ["No verifiable sender"],
    "verification_checklist": ["Call the bank on its published number"],
    "safe_reply": "I will verify this through official channels.",
    "disclaimer": "Automated analysis; not legal advice.",
    "free_uses_left": 4
}"#;
