use crate::application::{ChatUseCase, GenerateTestsUseCase};
use crate::domain::chat::{ActionType, ChatRequest};
use crate::domain::error::{AppError, Result};
use crate::domain::generation::{GenerationRequest, GenerationResponse};
use crate::infrastructure::config::ServerConfig;
use actix_web::dev::Server;
use actix_web::http::{header, StatusCode};
use actix_web::{
    get, guard, middleware, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
pub const ALLOWED_METHODS: &str = "POST, GET, OPTIONS";

pub struct HttpState {
    pub generate_tests: Arc<GenerateTestsUseCase>,
    pub chat: Arc<ChatUseCase>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatFailure {
    error: String,
    action_type: ActionType,
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        AppError::LLMError(_) => StatusCode::BAD_GATEWAY,
        AppError::ConfigurationError(_) | AppError::DatabaseError(_) | AppError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn authorization(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("Invalid request body: {}", e)))
}

#[post("/functions/v1/ai-generate-tests")]
async fn generate_tests(
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<HttpState>,
) -> impl Responder {
    let result = async {
        let user = data.generate_tests.authorize(authorization(&req)).await?;
        let request: GenerationRequest = parse_body(&body)?;
        data.generate_tests.execute(&user, request).await
    }
    .await;

    match result {
        Ok(generated) => HttpResponse::Ok().json(GenerationResponse::success(generated)),
        Err(e) => {
            error!(error = %e, "test generation failed");
            HttpResponse::build(status_for(&e))
                .json(GenerationResponse::failure(e.message().to_string()))
        }
    }
}

#[post("/functions/v1/ai-chat")]
async fn ai_chat(req: HttpRequest, body: web::Bytes, data: web::Data<HttpState>) -> impl Responder {
    let result = async {
        let user = data.chat.authorize(authorization(&req)).await?;
        let request: ChatRequest = parse_body(&body)?;
        data.chat.execute(&user, request).await
    }
    .await;

    match result {
        Ok(reply) => HttpResponse::Ok().json(reply),
        Err(e) => {
            error!(error = %e, "chat request failed");
            HttpResponse::build(status_for(&e)).json(ChatFailure {
                error: e.message().to_string(),
                action_type: ActionType::Error,
            })
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn preflight() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "success": false, "error": "Not found" }))
}

/// CORS headers added to every response that does not already set them.
pub fn cors_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Preflight is answered for every path before any route is matched.
    cfg.service(
        web::resource("/{tail:.*}")
            .guard(guard::Options())
            .to(preflight),
    )
    .service(generate_tests)
    .service(ai_chat)
    .service(health);
}

pub fn start_server(state: HttpState, config: &ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            .default_service(web::route().to(not_found))
    })
    .bind(config.bind_address())?
    .run();

    info!(host = %config.host, port = config.port, "http server listening");
    Ok(server)
}
