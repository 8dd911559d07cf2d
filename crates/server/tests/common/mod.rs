//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port. Both the catalog and
//! the model service point at one `httpmock::MockServer`, and the prompt
//! templates are written into a temporary directory.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use reelquest_server::{
    config::{AppConfig, CatalogConfig, ModelConfig},
    router,
    state::{build_app_state, AppState},
};
use reelquest_test_utils::{TEST_CORRECTION_PROMPT, TEST_GENERATION_PROMPT};
use reqwest::Client;
use serde_json::{json, Value};
use std::fs;
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// The path the catalog mock is mounted on.
pub const CATALOG_SEARCH_PATH: &str = "/3/search/multi";
/// The path the model mock is mounted on.
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Which credentials and templates the spawned app gets.
pub struct TestAppOptions {
    pub tmdb_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub kakao_js_key: Option<String>,
    pub with_prompts: bool,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            tmdb_api_key: Some("test-tmdb-key".to_string()),
            openai_api_key: Some("test-openai-key".to_string()),
            kakao_js_key: None,
            with_prompts: true,
        }
    }
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _prompts_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application with both credentials and both templates.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(TestAppOptions::default()).await
    }

    pub async fn spawn_with(options: TestAppOptions) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;

        let prompts_dir = tempdir()?;
        if options.with_prompts {
            fs::write(
                prompts_dir.path().join("system-prompt.txt"),
                TEST_GENERATION_PROMPT,
            )?;
            fs::write(
                prompts_dir.path().join("query-correction-prompt.txt"),
                TEST_CORRECTION_PROMPT,
            )?;
        }

        let config = AppConfig {
            port: 0,
            tmdb_api_key: options.tmdb_api_key,
            openai_api_key: options.openai_api_key,
            kakao_js_key: options.kakao_js_key,
            prompts_dir: prompts_dir.path().to_string_lossy().into_owned(),
            catalog: CatalogConfig {
                api_url: mock_server.url("/3"),
                language: "ko-KR".to_string(),
            },
            model: ModelConfig {
                api_url: mock_server.url(CHAT_COMPLETIONS_PATH),
                model_name: "gpt-4o".to_string(),
            },
        };
        let app_state = build_app_state(config)?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = format!("http://{}", listener.local_addr()?);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _prompts_dir: prompts_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Wraps model output in an OpenAI chat-completions response body.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}
