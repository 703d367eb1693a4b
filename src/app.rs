//! User actions wired to the session, backend, loader and clipboard.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::client::{AnalysisClient, AnalysisError};
use crate::clipboard::{Clipboard, ClipboardError, SystemClipboard};
use crate::config::Config;
use crate::extract::DocumentLoader;
use crate::identity::ClientIdentity;
use crate::ui::{Session, UiStatus};

/// Application controller. Owns the session and everything it talks to.
pub struct App {
    session: Session,
    client: AnalysisClient,
    loader: DocumentLoader,
    clipboard: Arc<dyn Clipboard>,
    client_id: String,
}

impl App {
    /// Build the app from configuration, resolving the persistent client id.
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        let identity = ClientIdentity::from_path(config.identity_file());
        let client_id = identity.get_or_create();
        debug!("Client id: {}", client_id);

        Ok(Self::with_parts(
            AnalysisClient::new(config)?,
            client_id,
            Box::new(SystemClipboard::detect()),
            &config.default_category,
        ))
    }

    pub fn with_parts(
        client: AnalysisClient,
        client_id: String,
        clipboard: Box<dyn Clipboard>,
        category: &str,
    ) -> Self {
        Self {
            session: Session::new(category),
            client,
            loader: DocumentLoader::new(),
            clipboard: Arc::from(clipboard),
            client_id,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn analyze_url(&self) -> &str {
        self.client.analyze_url()
    }

    /// Analyze the current content.
    ///
    /// Ignored while another operation holds the action control.
    pub async fn analyze(&mut self) -> &UiStatus {
        let action = self.session.action().clone();
        let Some(_guard) = action.try_acquire() else {
            debug!("Analyze ignored: an operation is already in flight");
            return self.session.status();
        };

        if let Some(request) = self.session.begin_analysis() {
            let outcome = self.client.analyze(&request, &self.client_id).await;
            self.session.finish_analysis(outcome);
        }
        self.session.status()
    }

    /// Load a document into the content field.
    pub async fn load_file(&mut self, path: &Path) -> &UiStatus {
        let action = self.session.action().clone();
        let Some(_guard) = action.try_acquire() else {
            debug!("Load ignored: an operation is already in flight");
            return self.session.status();
        };

        self.session.begin_file_load();
        let outcome = self.loader.extract_text(path).await;
        self.session.finish_file_load(outcome);
        self.session.status()
    }

    /// Copy the current safe reply.
    ///
    /// Copy tools are external processes, so the write runs on the blocking pool.
    pub async fn copy_reply(&mut self) -> &UiStatus {
        let clipboard = Arc::clone(&self.clipboard);
        let text = self.session.report().safe_reply.clone();
        let outcome = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
            .await
            .unwrap_or_else(|e| {
                Err(ClipboardError::Failed {
                    tool: "clipboard".to_string(),
                    message: e.to_string(),
                })
            });
        self.session.finish_copy(outcome);
        self.session.status()
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }
}
