use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use skyfare_core::DestinationSummary;

use crate::middleware::RequestId;

use super::{map_amadeus_error, normalize_iata, ApiError, ApiResponse, AppState, ResponseMeta};

const DEFAULT_MAX_PRICE: u32 = 200;

#[derive(Debug, Deserialize)]
pub(super) struct DestinationsQuery {
    pub max_price: Option<String>,
}

pub(super) async fn search_destinations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(origin): Path<String>,
    Query(query): Query<DestinationsQuery>,
) -> Result<Json<ApiResponse<Vec<DestinationSummary>>>, ApiError> {
    let origin = normalize_iata(&req_id.0, "origin", &origin)?;
    let max_price = parse_max_price(&req_id.0, query.max_price.as_deref())?;

    let data =
        skyfare_amadeus::find_destinations(&state.amadeus, &state.credentials, &origin, max_price)
            .await
            .map_err(|e| map_amadeus_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn parse_max_price(request_id: &str, raw: Option<&str>) -> Result<u32, ApiError> {
    match raw {
        None => Ok(DEFAULT_MAX_PRICE),
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ApiError::new(
                request_id,
                "validation_error",
                format!("max_price must be a positive integer, got \"{raw}\""),
            )),
        },
    }
}
