use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BloodType, DonorId, DonorPatch, DonorRegistration, Urgency};
use super::heuristics::forecast::DEFAULT_HORIZON_DAYS;
use super::heuristics::{EligibilityScreening, MatchQuery};
use super::service::DonorService;
use super::storage::KeyValueStore;
use crate::support::{Clock, RandomSource};

/// Router exposing the donor registry, dashboard, and heuristics endpoints.
pub fn donor_router<S, R, C>(service: Arc<DonorService<S, R, C>>) -> Router
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/donors",
            post(register_handler::<S, R, C>).get(list_handler::<S, R, C>),
        )
        .route("/api/v1/donors/export", get(export_handler::<S, R, C>))
        .route(
            "/api/v1/donors/:donor_id",
            patch(update_handler::<S, R, C>).delete(delete_handler::<S, R, C>),
        )
        .route("/api/v1/dashboard/summary", get(summary_handler::<S, R, C>))
        .route(
            "/api/v1/requests",
            post(record_request_handler::<S, R, C>).get(list_requests_handler::<S, R, C>),
        )
        .route("/api/v1/inventory", get(inventory_handler::<S, R, C>))
        .route(
            "/api/v1/inventory/:blood_type",
            put(set_inventory_handler::<S, R, C>),
        )
        .route("/api/v1/matching", post(matching_handler::<S, R, C>))
        .route(
            "/api/v1/forecast/:blood_type",
            get(forecast_handler::<S, R, C>),
        )
        .route("/api/v1/eligibility", post(eligibility_handler::<S, R, C>))
        .route("/api/v1/sync", post(sync_handler::<S, R, C>))
        .route(
            "/api/v1/connectivity",
            put(connectivity_handler::<S, R, C>),
        )
        .with_state(service)
}

async fn register_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Json(registration): Json<DonorRegistration>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    let donor = service.register(registration);
    (StatusCode::CREATED, Json(donor)).into_response()
}

async fn list_handler<S, R, C>(State(service): State<Arc<DonorService<S, R, C>>>) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    Json(service.donors()).into_response()
}

async fn export_handler<S, R, C>(State(service): State<Arc<DonorService<S, R, C>>>) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    match service.export_roster_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

async fn update_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Path(donor_id): Path<String>,
    Json(patch): Json<DonorPatch>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    let id = DonorId(donor_id);
    match service.update(&id, patch) {
        Some(donor) => (StatusCode::OK, Json(donor)).into_response(),
        None => {
            let payload = json!({ "error": format!("donor '{id}' not found") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

async fn delete_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Path(donor_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    service.remove(&DonorId(donor_id));
    StatusCode::NO_CONTENT.into_response()
}

async fn summary_handler<S, R, C>(State(service): State<Arc<DonorService<S, R, C>>>) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    Json(service.summary()).into_response()
}

#[derive(Debug, Deserialize)]
struct RecordRequestBody {
    blood_type: BloodType,
    units: u32,
    urgency: Urgency,
    city: String,
}

async fn record_request_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Json(body): Json<RecordRequestBody>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    let request = service.record_request(body.blood_type, body.units, body.urgency, body.city);
    (StatusCode::CREATED, Json(request)).into_response()
}

async fn list_requests_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    Json(service.requests()).into_response()
}

async fn inventory_handler<S, R, C>(State(service): State<Arc<DonorService<S, R, C>>>) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    Json(service.inventory()).into_response()
}

#[derive(Debug, Deserialize)]
struct SetInventoryBody {
    units: u32,
}

async fn set_inventory_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Path(blood_type): Path<String>,
    Json(body): Json<SetInventoryBody>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    let blood_type = match parse_blood_type(&blood_type) {
        Ok(blood_type) => blood_type,
        Err(response) => return response,
    };
    service.set_inventory(blood_type, body.units);
    Json(service.inventory()).into_response()
}

async fn matching_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Json(query): Json<MatchQuery>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    Json(service.match_donors(&query)).into_response()
}

#[derive(Debug, Deserialize)]
struct ForecastParams {
    days: Option<u32>,
}

async fn forecast_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Path(blood_type): Path<String>,
    Query(params): Query<ForecastParams>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    let blood_type = match parse_blood_type(&blood_type) {
        Ok(blood_type) => blood_type,
        Err(response) => return response,
    };
    let horizon = params.days.unwrap_or(DEFAULT_HORIZON_DAYS);
    Json(service.forecast(blood_type, horizon)).into_response()
}

async fn eligibility_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Json(screening): Json<EligibilityScreening>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    Json(service.check_eligibility(&screening)).into_response()
}

async fn sync_handler<S, R, C>(State(service): State<Arc<DonorService<S, R, C>>>) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    Json(service.sync().await).into_response()
}

#[derive(Debug, Deserialize)]
struct ConnectivityBody {
    online: bool,
}

async fn connectivity_handler<S, R, C>(
    State(service): State<Arc<DonorService<S, R, C>>>,
    Json(body): Json<ConnectivityBody>,
) -> Response
where
    S: KeyValueStore + 'static,
    R: RandomSource + 'static,
    C: Clock + 'static,
{
    service.set_online(body.online);
    Json(json!({ "online": service.is_online() })).into_response()
}

fn parse_blood_type(raw: &str) -> Result<BloodType, Response> {
    raw.parse::<BloodType>().map_err(|err| {
        let payload = json!({ "error": err.to_string() });
        (StatusCode::BAD_REQUEST, Json(payload)).into_response()
    })
}
