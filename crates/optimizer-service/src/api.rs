//! HTTP API for the load optimizer.

use axum::{
	body::Bytes,
	extract::{rejection::BytesRejection, DefaultBodyLimit, State},
	http::StatusCode,
	response::{IntoResponse, Json, Response},
	routing::{get, post},
	Router,
};
use optimizer_config::{OptimizerConfig, ServerConfig};
use optimizer_core::OptimizerEngine;
use optimizer_storage::MemoryCache;
use optimizer_types::{ErrorResponse, OptimizeRequest, OptimizeResponse};
use std::future::Future;
use std::sync::Arc;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, instrument, warn};

pub const HEALTH_PATH: &str = "/healthz";
pub const OPTIMIZE_PATH: &str = "/api/v1/load-optimizer/optimize";

/// Response header reporting whether the result came from the cache.
pub const CACHE_HEADER: &str = "x-cache";

#[derive(Clone)]
pub struct AppState {
	pub engine: Arc<OptimizerEngine>,
}

impl AppState {
	/// Builds the engine with an in-memory cache sized from `config`.
	pub fn from_config(config: &OptimizerConfig) -> Self {
		let cache = MemoryCache::<OptimizeResponse>::new(config.cache.capacity);
		let engine = OptimizerEngine::new(Arc::new(cache), config.cache.ttl());
		Self {
			engine: Arc::new(engine),
		}
	}
}

/// Builds the router with body limit, timeout and tracing layers.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
	Router::new()
		.route(HEALTH_PATH, get(health_check))
		.route(OPTIMIZE_PATH, post(optimize))
		.with_state(state)
		.layer(DefaultBodyLimit::max(config.max_body_bytes))
		.layer(TimeoutLayer::with_status_code(
			StatusCode::REQUEST_TIMEOUT,
			config.request_timeout(),
		))
		.layer(TraceLayer::new_for_http())
}

/// Serves the API until `shutdown` resolves.
#[instrument(skip_all, fields(address = %config.bind_address()))]
pub async fn start_http_server<F>(config: &ServerConfig, state: AppState, shutdown: F) -> anyhow::Result<()>
where
	F: Future<Output = ()> + Send + 'static,
{
	let app = router(state, config);
	let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;

	info!("HTTP server listening on {}", listener.local_addr()?);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown)
		.await?;

	Ok(())
}

/// Liveness probe
async fn health_check() -> Json<serde_json::Value> {
	Json(serde_json::json!({ "status": "healthy" }))
}

async fn optimize(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Response {
	let body = match body {
		Ok(body) => body,
		Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
			warn!("Rejected oversized request body");
			return error_response(StatusCode::PAYLOAD_TOO_LARGE, "payload too large");
		}
		Err(rejection) => {
			warn!("Failed to read request body: {}", rejection.body_text());
			return error_response(
				StatusCode::BAD_REQUEST,
				format!("invalid request body: {}", rejection.body_text()),
			);
		}
	};

	let request: OptimizeRequest = match serde_json::from_slice(&body) {
		Ok(request) => request,
		Err(e) => {
			warn!("Invalid optimize request JSON: {}", e);
			return error_response(StatusCode::BAD_REQUEST, format!("invalid JSON: {}", e));
		}
	};

	if let Err(e) = request.validate() {
		warn!("Optimize request failed validation: {}", e);
		return error_response(StatusCode::BAD_REQUEST, e.to_string());
	}

	match state.engine.optimize(request).await {
		Ok(optimized) => (
			StatusCode::OK,
			[(CACHE_HEADER, optimized.cache.as_str())],
			Json(optimized.response.as_ref()),
		)
			.into_response(),
		Err(e) => {
			error!("Optimization failed: {}", e);
			error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
		}
	}
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
	(status, Json(ErrorResponse::new(message))).into_response()
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;
	use axum::http::{header, HeaderMap, Method, Request};
	use tower::ServiceExt;

	const SCENARIO: &str = r#"{
		"truck": {"id": "truck-123", "max_weight_lbs": 44000, "max_volume_cuft": 3000},
		"orders": [
			{"id": "A", "payout_cents": 250000, "weight_lbs": 18000, "volume_cuft": 1200,
			 "origin": "Los Angeles, CA", "destination": "Dallas, TX",
			 "pickup_date": "2025-12-05", "delivery_date": "2025-12-09", "is_hazmat": false},
			{"id": "B", "payout_cents": 180000, "weight_lbs": 12000, "volume_cuft": 900,
			 "origin": "los angeles, ca ", "destination": "DALLAS, TX",
			 "pickup_date": "2025-12-04", "delivery_date": "2025-12-10", "is_hazmat": false},
			{"id": "C", "payout_cents": 300000, "weight_lbs": 40000, "volume_cuft": 2800,
			 "origin": "Los Angeles, CA", "destination": "Dallas, TX",
			 "pickup_date": "2025-12-06", "delivery_date": "2025-12-08", "is_hazmat": true}
		]
	}"#;

	fn app_with(config: OptimizerConfig) -> Router {
		router(AppState::from_config(&config), &config.server)
	}

	fn app() -> Router {
		app_with(OptimizerConfig::default())
	}

	fn post_json(body: impl Into<String>) -> Request<Body> {
		Request::builder()
			.method(Method::POST)
			.uri(OPTIMIZE_PATH)
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.into()))
			.unwrap()
	}

	async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, serde_json::Value) {
		let response = app.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let headers = response.headers().clone();
		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let json = if bytes.is_empty() {
			serde_json::Value::Null
		} else {
			serde_json::from_slice(&bytes).unwrap()
		};
		(status, headers, json)
	}

	#[tokio::test]
	async fn test_health_check() {
		let request = Request::builder()
			.uri(HEALTH_PATH)
			.body(Body::empty())
			.unwrap();

		let (status, _, body) = send(&app(), request).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, serde_json::json!({ "status": "healthy" }));
	}

	#[tokio::test]
	async fn test_optimize_miss_then_hit() {
		let app = app();

		let (status, headers, body) = send(&app, post_json(SCENARIO)).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(headers[CACHE_HEADER], "MISS");
		assert_eq!(body["truck_id"], "truck-123");
		assert_eq!(body["selected_order_ids"], serde_json::json!(["A", "B"]));
		assert_eq!(body["total_payout_cents"], 430_000);
		assert_eq!(body["total_weight_lbs"], 30_000);
		assert_eq!(body["total_volume_cuft"], 2_100);
		assert_eq!(body["utilization_weight_percent"], 68.18);
		assert_eq!(body["utilization_volume_percent"], 70.0);

		let (status, headers, cached) = send(&app, post_json(SCENARIO)).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(headers[CACHE_HEADER], "HIT");
		assert_eq!(cached, body);
	}

	#[tokio::test]
	async fn test_malformed_json() {
		let (status, _, body) = send(&app(), post_json("{\"truck\": ")).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body["error"].as_str().unwrap().starts_with("invalid JSON:"));
		assert_eq!(body["error"], body["message"]);
	}

	#[tokio::test]
	async fn test_unknown_field_rejected() {
		let payload = r#"{"truck": {"id": "t", "max_weight_lbs": 1, "max_volume_cuft": 1}, "orders": [], "priority": 1}"#;
		let (status, _, body) = send(&app(), post_json(payload)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body["error"].as_str().unwrap().starts_with("invalid JSON:"));
	}

	#[tokio::test]
	async fn test_validation_failure() {
		let payload = r#"{"truck": {"max_weight_lbs": 1, "max_volume_cuft": 1}, "orders": []}"#;
		let (status, headers, body) = send(&app(), post_json(payload)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(headers.get(CACHE_HEADER).is_none());
		assert_eq!(body["error"], "truck.id is required");
		assert_eq!(body["message"], "truck.id is required");
	}

	#[tokio::test]
	async fn test_empty_orders_is_ok() {
		let payload = r#"{"truck": {"id": "t-9", "max_weight_lbs": 10, "max_volume_cuft": 10}, "orders": []}"#;
		let (status, _, body) = send(&app(), post_json(payload)).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["truck_id"], "t-9");
		assert_eq!(body["selected_order_ids"], serde_json::json!([]));
		assert_eq!(body["utilization_weight_percent"], 0.0);
	}

	#[tokio::test]
	async fn test_payload_too_large() {
		let mut config = OptimizerConfig::default();
		config.server.max_body_bytes = 64;

		let (status, _, body) = send(&app_with(config), post_json(SCENARIO)).await;
		assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
		assert_eq!(body["error"], "payload too large");
	}

	#[tokio::test]
	async fn test_wrong_method() {
		let request = Request::builder()
			.method(Method::GET)
			.uri(OPTIMIZE_PATH)
			.body(Body::empty())
			.unwrap();

		let (status, _, _) = send(&app(), request).await;
		assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
	}
}
