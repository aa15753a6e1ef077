use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use platform_api::{ApiError, parse_age_threshold};
use products_hr::{Employee, EmployeeStore};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    graphql::SchemaType,
    view::{EmployeeRow, roster_rows},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EmployeeStore>,
    pub schema: SchemaType,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let employees = state.store.len();
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, employees, "roster server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/employees", get(list_handler))
        .route("/employees/name-departments", get(name_departments_handler))
        .route("/employees/average-salary", get(average_salary_handler))
        .route("/employees/older-than", get(older_than_handler))
        .route("/employees/rows", get(rows_handler))
        .route("/graphql", post(graphql_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn list_handler(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.store.list_all().to_vec())
}

async fn name_departments_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.project_name_department())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AverageSalaryResponse {
    average_salary: f64,
}

async fn average_salary_handler(State(state): State<AppState>) -> Json<AverageSalaryResponse> {
    Json(AverageSalaryResponse {
        average_salary: state.store.average_salary(),
    })
}

#[derive(Deserialize)]
struct OlderThanQuery {
    #[serde(default)]
    threshold: String,
}

async fn older_than_handler(
    State(state): State<AppState>,
    Query(query): Query<OlderThanQuery>,
) -> HttpResult<Json<Vec<Employee>>> {
    let threshold = parse_age_threshold(&query.threshold)?;
    Ok(Json(state.store.filter_by_age(threshold)))
}

async fn rows_handler(State(state): State<AppState>) -> Json<Vec<EmployeeRow>> {
    Json(roster_rows(&state.store))
}

async fn graphql_handler(State(state): State<AppState>, request: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(request.into_inner()).await.into()
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        employees: state.store.len(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    employees: usize,
    version: &'static str,
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(value: ApiError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(self.0.body())).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::graphql::build_schema;

    fn router_with(store: EmployeeStore) -> Router {
        let store = Arc::new(store);
        build_router(AppState {
            schema: build_schema(store.clone()),
            store,
            config: Arc::new(AppConfig {
                roster_path: None,
                cors_allowed_origins: vec!["http://localhost:5173".into()],
            }),
        })
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_roster_size() {
        let (status, body) = get_json(router_with(EmployeeStore::demo()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["employees"], json!(5));
    }

    #[tokio::test]
    async fn lists_employees_in_order() {
        let (status, body) = get_json(router_with(EmployeeStore::demo()), "/employees").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie", "Diana", "Edward"]);
    }

    #[tokio::test]
    async fn average_salary_endpoint() {
        let (_, body) =
            get_json(router_with(EmployeeStore::demo()), "/employees/average-salary").await;
        assert_eq!(body, json!({"averageSalary": 64800.0}));

        let (_, body) =
            get_json(router_with(EmployeeStore::default()), "/employees/average-salary").await;
        assert_eq!(body, json!({"averageSalary": 0.0}));
    }

    #[tokio::test]
    async fn older_than_filters_by_threshold() {
        let (status, body) = get_json(
            router_with(EmployeeStore::demo()),
            "/employees/older-than?threshold=30",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ages: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["age"].as_i64().unwrap())
            .collect();
        assert_eq!(ages, vec![35, 40, 32]);
    }

    #[tokio::test]
    async fn older_than_rejects_non_numeric_threshold() {
        let (status, body) = get_json(
            router_with(EmployeeStore::demo()),
            "/employees/older-than?threshold=abc",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_INPUT"));

        let (status, _) = get_json(
            router_with(EmployeeStore::demo()),
            "/employees/older-than",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn projection_and_rows_are_aligned() {
        let router = router_with(EmployeeStore::demo());
        let (_, labels) = get_json(router.clone(), "/employees/name-departments").await;
        let (_, rows) = get_json(router, "/employees/rows").await;
        assert_eq!(labels[2], json!("Charlie (Engineering)"));
        assert_eq!(rows[2]["label"], labels[2]);
        assert_eq!(rows[2]["salary"], json!(85000.0));
    }

    #[tokio::test]
    async fn graphql_endpoint_executes_queries() {
        let response = router_with(EmployeeStore::demo())
            .oneshot(
                http::Request::builder()
                    .method(Method::POST)
                    .uri("/graphql")
                    .header(http::header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"query": "{ nameDepartments }"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["nameDepartments"][0], json!("Alice (Engineering)"));
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let response = router_with(EmployeeStore::demo())
            .oneshot(
                http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
