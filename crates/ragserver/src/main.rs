use actix_cors::Cors;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder, Result as ActixResult};
use actix_ws::Message;
use anyhow::anyhow;
use ragcore::ContextDoc;
use ragnodes::{build_workflow, providers::ProviderConfig};
use ragruntime::RagRuntime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Application state shared across handlers
struct AppState {
    runtime: Arc<RagRuntime>,
}

/// Request body for a question
#[derive(Debug, Deserialize)]
struct AskRequest {
    question: String,
}

/// Response for a completed run
#[derive(Debug, Serialize)]
struct AskResponse {
    question: String,
    answer: Option<String>,
    docs: Vec<ContextDoc>,
}

/// Error response
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Health check endpoint
#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ragserver"
    }))
}

/// Run the workflow for one question
#[post("/api/ask")]
async fn ask(data: web::Data<AppState>, req: web::Json<AskRequest>) -> ActixResult<impl Responder> {
    let question = req.into_inner().question;

    info!("Answering question: {}", question);

    match data.runtime.ask(question).await {
        Ok(state) => Ok(HttpResponse::Ok().json(AskResponse {
            question: state.question,
            answer: state.answer,
            docs: state.docs,
        })),
        Err(e) => {
            error!("Run failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            }))
        }
    }
}

/// List the workflow step names
#[get("/api/nodes")]
async fn list_nodes(data: web::Data<AppState>) -> ActixResult<impl Responder> {
    let nodes: Vec<String> = data
        .runtime
        .node_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    Ok(HttpResponse::Ok().json(nodes))
}

/// WebSocket endpoint for real-time execution events
#[get("/api/events")]
async fn websocket_events(
    req: actix_web::HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (res, mut session, mut msg_stream) = actix_ws::handle(&req, stream)?;

    info!("WebSocket client connected");

    let mut events = data.runtime.subscribe_events();

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Ok(event) => {
                            if let Ok(json) = serde_json::to_string(&event) {
                                if session.text(json).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Err(_) => break,
                    }
                }

                Some(Ok(msg)) = msg_stream.recv() => {
                    match msg {
                        Message::Ping(bytes) => {
                            if session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Message::Close(_) => break,
                        _ => {}
                    }
                }

                else => break,
            }
        }

        info!("WebSocket client disconnected");
        let _ = session.close(None).await;
    });

    Ok(res)
}

fn provider_config_from_env() -> anyhow::Result<ProviderConfig> {
    Ok(ProviderConfig {
        llm_api_key: require_env("RAG_LLM_API_KEY")?,
        llm_base_url: std::env::var("RAG_LLM_BASE_URL").ok(),
        llm_model: std::env::var("RAG_LLM_MODEL").ok(),
        tavily_api_key: require_env("TAVILY_API_KEY")?,
        retriever_url: require_env("RAG_RETRIEVER_URL")?,
    })
}

fn require_env(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow!("{} not found in the environment.", key))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚀 Starting ragserver");

    let provider_config = provider_config_from_env()?;
    let runtime = RagRuntime::new(build_workflow(provider_config.collaborators()))?;

    info!("✅ Runtime initialized");

    let app_state = web::Data::new(AppState {
        runtime: Arc::new(runtime),
    });

    let bind_address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    info!("🌐 Server starting on http://{}", bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(actix_web::middleware::Logger::default())
            .service(health_check)
            .service(ask)
            .service(list_nodes)
            .service(websocket_events)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
