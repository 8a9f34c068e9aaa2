//! HTTP server for the inference UI
//! Tokio listener, one task per connection, one request per connection.

use crate::client::{InferenceTransport, ServiceClient};
use crate::config::AppConfig;
use crate::error::Result;
use crate::forms::{ClassifierForm, RagForm, Submission};
use crate::http::{read_request, HttpRequest, HttpResponse, ReadOutcome};
use crate::render::{render_not_found, render_page, PageView, STYLESHEET};
use crate::shell::Service;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

/// Shared, read-only state. No per-session data lives here.
pub struct AppState {
    pub config: AppConfig,
    pub transport: Arc<dyn InferenceTransport>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            config,
            transport: Arc::new(ServiceClient::new()?),
        })
    }

    pub fn with_transport(config: AppConfig, transport: Arc<dyn InferenceTransport>) -> Self {
        Self { config, transport }
    }
}

pub async fn run(config: AppConfig) -> Result<()> {
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);
    info!("Classifier endpoint: {}", config.classifier.url);
    info!("RAG endpoint: {}", config.rag.url);

    let state = Arc::new(AppState::new(config)?);
    serve(listener, state).await
}

pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        debug!("New connection from: {}", addr);
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, state).await {
                error!("Error handling connection from {}: {}", addr, e);
            }
        });
    }
}

async fn handle_connection(mut stream: TcpStream, state: Arc<AppState>) -> Result<()> {
    let response = match read_request(&mut stream).await? {
        ReadOutcome::Complete(bytes) => match HttpRequest::parse(&bytes) {
            Ok(request) => {
                info!("{} {}", request.method, request.path);
                handle_request(&request, &state).await
            }
            Err(e) => {
                warn!("Malformed request: {}", e);
                HttpResponse::json(400, r#"{"error":"Bad Request"}"#.to_string())
            }
        },
        ReadOutcome::Closed => return Ok(()),
        ReadOutcome::TimedOut => {
            warn!("Request read timeout");
            HttpResponse::json(408, r#"{"error":"Request timeout"}"#.to_string())
        }
        ReadOutcome::TooLarge => {
            warn!("Request too large");
            HttpResponse::json(413, r#"{"error":"Request too large"}"#.to_string())
        }
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

pub async fn handle_request(request: &HttpRequest, state: &AppState) -> HttpResponse {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/") => {
            let service = Service::from_slug(request.query.get("service").map(String::as_str));
            HttpResponse::html(200, idle_page(service))
        }
        ("POST", "/classify") => {
            let form = ClassifierForm::from_fields(&request.form());
            let submission = form.submit(state.transport.as_ref(), &state.config.classifier).await;
            HttpResponse::html(
                200,
                render_page(&PageView::Classifier {
                    form: &form,
                    submission: &submission,
                }),
            )
        }
        ("POST", "/rag") => {
            let form = RagForm::from_fields(&request.form());
            let submission = form.submit(state.transport.as_ref(), &state.config.rag).await;
            HttpResponse::html(
                200,
                render_page(&PageView::Rag {
                    form: &form,
                    submission: &submission,
                }),
            )
        }
        ("GET", "/static/app.css") => HttpResponse::css(STYLESHEET.clone()),
        ("GET", "/health") => {
            let body = serde_json::json!({
                "status": "ok",
                "service": "inference-ui",
                "version": env!("CARGO_PKG_VERSION"),
            });
            HttpResponse::json(200, body.to_string())
        }
        (method, path) => {
            warn!("404: {} {} not found", method, path);
            HttpResponse::html(404, render_not_found(path))
        }
    }
}

/// Fresh page for a service: default field values, no result.
fn idle_page(service: Service) -> String {
    match service {
        Service::DynamicClassifier => render_page(&PageView::Classifier {
            form: &ClassifierForm::default(),
            submission: &Submission::Idle,
        }),
        Service::Rag => render_page(&PageView::Rag {
            form: &RagForm::default(),
            submission: &Submission::Idle,
        }),
    }
}
