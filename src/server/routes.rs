//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::address::{Address, AddressPatch, NewAddress};
use crate::error::Error;
use crate::geocode::Geocoder;
use crate::server::state::AppState;
use crate::service::SearchCenter;
use crate::store::AddressStore;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Create the API router
pub fn create_router<S, G>(state: Arc<AppState<S, G>>) -> Router
where
    S: AddressStore + 'static,
    G: Geocoder + 'static,
{
    Router::new()
        .route("/api/health", get(health_handler::<S, G>))
        .route("/api/addresses", post(create_handler::<S, G>))
        .route("/api/addresses/", post(create_handler::<S, G>))
        .route("/api/addresses/search/", get(search_handler::<S, G>))
        .route(
            "/api/addresses/:id",
            get(get_handler::<S, G>)
                .put(update_handler::<S, G>)
                .delete(delete_handler::<S, G>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip, default = "default_error_status")]
    status: StatusCode,
}

fn default_error_status() -> StatusCode {
    StatusCode::BAD_REQUEST
}

impl ApiError {
    fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INVALID_ARGUMENT".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    /// HTTP status this error is sent with
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            Error::GeocodeFailed(_) => (StatusCode::BAD_REQUEST, "GEOCODE_FAILED"),
            Error::Geocoder(_) => (StatusCode::BAD_GATEWAY, "GEOCODER_UNAVAILABLE"),
            Error::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        if !err.is_client_error() {
            error!("Request failed: {}", err);
        }
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_argument(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_argument(rejection.body_text())
    }
}

/// Create an address
///
/// POST /api/addresses/
async fn create_handler<S: AddressStore, G: Geocoder>(
    State(state): State<Arc<AppState<S, G>>>,
    payload: Result<Json<NewAddress>, JsonRejection>,
) -> Result<(StatusCode, Json<Address>), ApiError> {
    let Json(data) = payload?;
    let address = state.service.create(data).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// Get an address
///
/// GET /api/addresses/:id
async fn get_handler<S: AddressStore, G: Geocoder>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(id): Path<String>,
) -> Result<Json<Address>, ApiError> {
    Ok(Json(state.service.get(&id).await?))
}

/// Partially update an address
///
/// PUT /api/addresses/:id
async fn update_handler<S: AddressStore, G: Geocoder>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(id): Path<String>,
    payload: Result<Json<AddressPatch>, JsonRejection>,
) -> Result<Json<Address>, ApiError> {
    let Json(patch) = payload?;
    Ok(Json(state.service.update(&id, patch).await?))
}

/// Delete an address
///
/// DELETE /api/addresses/:id
async fn delete_handler<S: AddressStore, G: Geocoder>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Latitude of the center point
    pub lat: Option<f64>,
    /// Longitude of the center point
    pub lon: Option<f64>,
    /// Free-text address to geocode as the center
    pub address: Option<String>,
    /// Search radius in kilometers
    pub radius_km: f64,
}

/// Addresses within a radius of a point or an address
///
/// GET /api/addresses/search/?lat=&lon=&address=&radius_km=
async fn search_handler<S: AddressStore, G: Geocoder>(
    State(state): State<Arc<AppState<S, G>>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Address>>, ApiError> {
    let Query(params) = params?;
    let center = SearchCenter::from_params(params.lat, params.lon, params.address.as_deref())?;
    Ok(Json(state.service.search(center, params.radius_km).await?))
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub addresses: usize,
    pub uptime_secs: u64,
}

/// Service health
///
/// GET /api/health
async fn health_handler<S: AddressStore, G: Geocoder>(
    State(state): State<Arc<AppState<S, G>>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let addresses = state.service.store().count().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        addresses,
        uptime_secs: state.uptime_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geocode::testing::StubGeocoder;
    use crate::service::AddressService;
    use crate::store::MemoryStore;
    use axum::body::{Body, Bytes};
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    type TestState = Arc<AppState<MemoryStore, StubGeocoder>>;

    fn create_test_state(geocoder: StubGeocoder) -> TestState {
        let service = AddressService::new(MemoryStore::new(), geocoder);
        Arc::new(AppState::new(Config::default(), service))
    }

    fn stub() -> StubGeocoder {
        StubGeocoder::new()
            .with_answer("350 5th Ave, New York, USA", 40.7484, -73.9857)
            .with_answer("Times Square", 40.758, -73.9855)
    }

    async fn send(state: &TestState, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn office_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Office",
            "street": "350 5th Ave",
            "city": "New York",
            "postal_code": "10118",
            "country": "USA"
        })
    }

    async fn create_office(state: &TestState) -> Address {
        let (status, body) = send(state, json_request("POST", "/api/addresses/", office_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        serde_json::from_slice(&body).unwrap()
    }

    fn error_code(body: &[u8]) -> String {
        let err: ApiError = serde_json::from_slice(body).unwrap();
        err.code
    }

    #[tokio::test]
    async fn test_create_geocodes_missing_coordinates() {
        let state = create_test_state(stub());
        let address = create_office(&state).await;

        assert_eq!(address.latitude, 40.7484);
        assert_eq!(address.longitude, -73.9857);
        assert_eq!(state.service.geocoder().call_count(), 1);
    }

    #[tokio::test]
    async fn test_create_without_trailing_slash() {
        let state = create_test_state(stub());
        let mut body = office_body();
        body["latitude"] = serde_json::json!(40.0);
        body["longitude"] = serde_json::json!(-74.0);

        let (status, _) = send(&state, json_request("POST", "/api/addresses", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(state.service.geocoder().call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_geocode_failure() {
        let state = create_test_state(StubGeocoder::new());
        let (status, body) = send(&state, json_request("POST", "/api/addresses/", office_body())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "GEOCODE_FAILED");
    }

    #[tokio::test]
    async fn test_create_geocoder_unavailable() {
        let state = create_test_state(StubGeocoder::unavailable());
        let (status, body) = send(&state, json_request("POST", "/api/addresses/", office_body())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_code(&body), "GEOCODER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let state = create_test_state(stub());

        let mut long_code = office_body();
        long_code["postal_code"] = serde_json::json!("12345678901");
        let (status, body) = send(&state, json_request("POST", "/api/addresses/", long_code)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "INVALID_ARGUMENT");

        let missing_name = serde_json::json!({"street": "x", "city": "y", "postal_code": "1", "country": "z"});
        let (status, body) = send(&state, json_request("POST", "/api/addresses/", missing_name)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_get_address() {
        let state = create_test_state(stub());
        let created = create_office(&state).await;

        let (status, body) = send(&state, empty_request("GET", &format!("/api/addresses/{}", created.id))).await;
        assert_eq!(status, StatusCode::OK);

        let fetched: Address = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_record_shape() {
        let state = create_test_state(stub());
        let created = create_office(&state).await;

        let (_, body) = send(&state, empty_request("GET", &format!("/api/addresses/{}", created.id))).await;
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        for field in [
            "id", "name", "street", "city", "postal_code", "country", "latitude", "longitude",
            "created_at", "updated_at",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
    }

    #[tokio::test]
    async fn test_missing_address_is_404() {
        let state = create_test_state(stub());

        let (status, body) = send(&state, empty_request("GET", "/api/addresses/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_code(&body), "NOT_FOUND");

        let (status, _) = send(&state, empty_request("DELETE", "/api/addresses/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let patch = serde_json::json!({"name": "x"});
        let (status, _) = send(&state, json_request("PUT", "/api/addresses/nope", patch)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_address() {
        let state = create_test_state(stub());
        let created = create_office(&state).await;
        let uri = format!("/api/addresses/{}", created.id);

        let patch = serde_json::json!({"name": "HQ", "postal_code": "10001"});
        let (status, body) = send(&state, json_request("PUT", &uri, patch)).await;
        assert_eq!(status, StatusCode::OK);

        let updated: Address = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.name, "HQ");
        assert_eq!(updated.postal_code, "10001");
        assert_eq!(updated.city, "New York");
        assert_eq!(state.service.geocoder().call_count(), 1);
    }

    #[tokio::test]
    async fn test_update_null_coordinates_regeocodes() {
        let state = create_test_state(stub());
        let mut body = office_body();
        body["latitude"] = serde_json::json!(1.0);
        body["longitude"] = serde_json::json!(1.0);
        let (_, body) = send(&state, json_request("POST", "/api/addresses/", body)).await;
        let created: Address = serde_json::from_slice(&body).unwrap();

        let patch = serde_json::json!({"latitude": null, "longitude": null});
        let uri = format!("/api/addresses/{}", created.id);
        let (status, body) = send(&state, json_request("PUT", &uri, patch)).await;
        assert_eq!(status, StatusCode::OK);

        let updated: Address = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.latitude, 40.7484);
        assert_eq!(state.service.geocoder().call_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_address() {
        let state = create_test_state(stub());
        let created = create_office(&state).await;
        let uri = format!("/api/addresses/{}", created.id);

        let (status, body) = send(&state, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = send(&state, empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_by_coordinates() {
        let state = create_test_state(stub());
        let office = create_office(&state).await;

        let (status, body) = send(
            &state,
            empty_request("GET", "/api/addresses/search/?lat=40.7128&lon=-74.0060&radius_km=5"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let found: Vec<Address> = serde_json::from_slice(&body).unwrap();
        assert_eq!(found, vec![office]);

        let (_, body) = send(
            &state,
            empty_request("GET", "/api/addresses/search/?lat=40.7128&lon=-74.0060&radius_km=1"),
        )
        .await;
        let found: Vec<Address> = serde_json::from_slice(&body).unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_search_by_address() {
        let state = create_test_state(stub());
        let office = create_office(&state).await;

        let (status, body) = send(
            &state,
            empty_request("GET", "/api/addresses/search/?address=Times%20Square&radius_km=2"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let found: Vec<Address> = serde_json::from_slice(&body).unwrap();
        assert_eq!(found, vec![office]);
    }

    #[tokio::test]
    async fn test_search_errors() {
        let state = create_test_state(stub());

        let cases = [
            ("/api/addresses/search/?lat=1&lon=1&radius_km=0", "INVALID_ARGUMENT"),
            ("/api/addresses/search/?lat=1&lon=1&radius_km=-3", "INVALID_ARGUMENT"),
            ("/api/addresses/search/?lat=1&lon=1", "INVALID_ARGUMENT"),
            ("/api/addresses/search/?radius_km=5", "INVALID_ARGUMENT"),
            ("/api/addresses/search/?lat=1&radius_km=5", "INVALID_ARGUMENT"),
            ("/api/addresses/search/?lat=95&lon=1&radius_km=5", "INVALID_ARGUMENT"),
            ("/api/addresses/search/?lat=abc&lon=1&radius_km=5", "INVALID_ARGUMENT"),
            ("/api/addresses/search/?address=Atlantis&radius_km=5", "GEOCODE_FAILED"),
        ];

        for (uri, code) in cases {
            let (status, body) = send(&state, empty_request("GET", uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(error_code(&body), code, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let state = create_test_state(stub());
        create_office(&state).await;

        let (status, body) = send(&state, empty_request("GET", "/api/health")).await;
        assert_eq!(status, StatusCode::OK);

        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.addresses, 1);
    }

    #[test]
    fn test_error_mapping() {
        let cases = [
            (Error::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (Error::InvalidArgument("x".into()), StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            (Error::GeocodeFailed("x".into()), StatusCode::BAD_REQUEST, "GEOCODE_FAILED"),
            (Error::Geocoder("x".into()), StatusCode::BAD_GATEWAY, "GEOCODER_UNAVAILABLE"),
            (Error::Store("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            (Error::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];

        for (err, status, code) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status(), status);
            assert_eq!(api.code, code);
        }
    }
}
