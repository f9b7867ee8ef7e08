//! Store registration and proximity search handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use storefinder_core::{NewStore, RankedStore};
use storefinder_geo::{ErrorKind, LocateError};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct NearbyQuery {
    pub radius_km: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateStoreResponse {
    pub id: i64,
}

pub(super) async fn create_store(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<NewStore>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreateStoreResponse>>), ApiError> {
    let Json(body) = payload
        .map_err(|rejection| ApiError::new(&req_id.0, "validation_error", rejection.body_text()))?;

    let store = body.trimmed();
    store
        .validate()
        .map_err(|e| ApiError::new(&req_id.0, "validation_error", e.to_string()))?;

    let id = state.stores.insert(&store).await.map_err(|e| {
        tracing::error!(error = %e, "store insert failed");
        ApiError::new(&req_id.0, "internal_error", "failed to save store")
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: CreateStoreResponse { id },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

pub(super) async fn find_nearby(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(postal_code): Path<String>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<RankedStore>>>, ApiError> {
    let Query(params) = query
        .map_err(|rejection| ApiError::new(&req_id.0, "validation_error", rejection.body_text()))?;

    let result = match params.radius_km {
        Some(radius_km) => state.locator.find_nearby(&postal_code, radius_km).await,
        None => state.locator.find_nearby_default(&postal_code).await,
    };
    let stores = result.map_err(|e| map_locate_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: stores,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_locate_error(request_id: String, error: &LocateError) -> ApiError {
    let code = match error.kind() {
        ErrorKind::NotFound => "not_found",
        ErrorKind::NoResults => "no_results",
        ErrorKind::UpstreamUnavailable => "upstream_unavailable",
        ErrorKind::Invalid => "validation_error",
        ErrorKind::Internal => {
            return ApiError::new(request_id, "internal_error", "failed to read store catalog");
        }
    };
    ApiError::new(request_id, code, error.to_string())
}
