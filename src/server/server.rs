use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{debug, error};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;

use super::envelope::{
    bad_request_response, server_error_response, success_response, RequestEnvelope,
    MISSING_METHOD_OR_PARAMS,
};
use super::{log_requests, state::*, ServerConfig};
use crate::clock::now_iso8601;
use crate::service::ServiceKind;
use crate::supervisor::{ServiceStates, ServiceStatus};
use crate::tools::ToolDefinition;

const ENDPOINTS: [&str; 5] = [
    "GET /health",
    "GET /services",
    "POST /mcp/postgresql",
    "POST /mcp/mongodb",
    "GET /mcp/{service}/tools",
];

#[derive(Serialize)]
struct ServerStats {
    pub name: &'static str,
    pub version: &'static str,
    pub uptime: String,
    pub endpoints: Vec<&'static str>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    services: HealthServices,
}

#[derive(Serialize)]
struct HealthServices {
    postgresql: &'static str,
    mongodb: &'static str,
}

#[derive(Serialize)]
struct ServicesResponse {
    services: Vec<ServiceStatus>,
}

#[derive(Serialize)]
struct ToolsResponse {
    service: ServiceKind,
    tools: Vec<ToolDefinition>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    Json(ServerStats {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_uptime(state.start_time.elapsed()),
        endpoints: ENDPOINTS.to_vec(),
    })
}

async fn health(State(service_states): State<ServiceStates>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: now_iso8601(),
        services: HealthServices {
            postgresql: service_states
                .get(ServiceKind::Postgresql)
                .health_status(),
            mongodb: service_states.get(ServiceKind::Mongodb).health_status(),
        },
    })
}

async fn get_services(State(service_states): State<ServiceStates>) -> impl IntoResponse {
    let services = service_states
        .snapshot()
        .iter()
        .map(|(service, state)| ServiceStatus::new(*service, state))
        .collect();
    Json(ServicesResponse { services })
}

async fn get_tools(
    State(tool_executor): State<GuardedToolExecutor>,
    Path(service): Path<String>,
) -> Response {
    match ServiceKind::from_name(&service) {
        Some(service) => Json(ToolsResponse {
            service,
            tools: tool_executor.tool_definitions(service),
        })
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn dispatch(
    tool_executor: GuardedToolExecutor,
    service: ServiceKind,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        // A body that is not declared as JSON reads as an empty envelope.
        Err(JsonRejection::MissingJsonContentType(_)) => {
            return bad_request_response(MISSING_METHOD_OR_PARAMS)
        }
        Err(rejection) => {
            debug!("Rejected {} request body: {}", service, rejection.body_text());
            return bad_request_response(rejection.body_text());
        }
    };

    let envelope = match RequestEnvelope::from_value(body) {
        Some(envelope) => envelope,
        None => return bad_request_response(MISSING_METHOD_OR_PARAMS),
    };

    match tool_executor
        .execute(service, &envelope.method, envelope.params)
        .await
    {
        Ok(result) => success_response(result),
        Err(err) => {
            error!("{} MCP error: {}", service.display_name(), err);
            server_error_response(err.to_string())
        }
    }
}

async fn post_postgresql(
    State(tool_executor): State<GuardedToolExecutor>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    dispatch(tool_executor, ServiceKind::Postgresql, body).await
}

async fn post_mongodb(
    State(tool_executor): State<GuardedToolExecutor>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    dispatch(tool_executor, ServiceKind::Mongodb, body).await
}

pub fn make_app(
    config: ServerConfig,
    tool_executor: GuardedToolExecutor,
    service_states: ServiceStates,
) -> Router {
    let state = ServerState::new(config.clone(), tool_executor, service_states);

    let mcp_routes: Router = Router::new()
        .route("/postgresql", post(post_postgresql))
        .route("/mongodb", post(post_mongodb))
        .route("/{service}/tools", get(get_tools))
        .with_state(state.clone());

    let app: Router = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/services", get(get_services))
        .with_state(state.clone())
        .nest("/mcp", mcp_routes);

    app.layer(middleware::from_fn_with_state(config, log_requests))
}

pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let address = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))
}

pub async fn run_server(
    listener: TcpListener,
    config: ServerConfig,
    tool_executor: GuardedToolExecutor,
    service_states: ServiceStates,
) -> Result<()> {
    let app = make_app(config, tool_executor, service_states);
    Ok(axum::serve(listener, app).await?)
}
