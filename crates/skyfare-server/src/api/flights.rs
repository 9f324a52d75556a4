use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use skyfare_amadeus::FlightSearch;
use skyfare_core::SimplifiedFlight;

use crate::middleware::RequestId;

use super::{map_amadeus_error, normalize_iata, ApiError, ApiResponse, AppState, ResponseMeta};

const MAX_ADULTS: u8 = 9;

#[derive(Debug, Deserialize)]
pub(super) struct FlightsQuery {
    pub date: Option<String>,
    pub adults: Option<String>,
}

pub(super) async fn search_flights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((origin, destination)): Path<(String, String)>,
    Query(query): Query<FlightsQuery>,
) -> Result<Json<ApiResponse<Vec<SimplifiedFlight>>>, ApiError> {
    let search = FlightSearch {
        origin: normalize_iata(&req_id.0, "origin", &origin)?,
        destination: normalize_iata(&req_id.0, "destination", &destination)?,
        departure_date: parse_departure_date(&req_id.0, query.date.as_deref(), today())?,
        adults: parse_adults(&req_id.0, query.adults.as_deref())?,
        max_results: state.search_max_results,
    };

    let data = skyfare_amadeus::find_flights(&state.amadeus, &state.credentials, &search)
        .await
        .map_err(|e| map_amadeus_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parses a required `YYYY-MM-DD` departure date that is not before `today`.
fn parse_departure_date(
    request_id: &str,
    raw: Option<&str>,
    today: NaiveDate,
) -> Result<NaiveDate, ApiError> {
    let Some(raw) = raw else {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            "date query parameter is required (YYYY-MM-DD)",
        ));
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::new(
            request_id,
            "validation_error",
            format!("date must be formatted YYYY-MM-DD, got \"{raw}\""),
        )
    })?;

    if date < today {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            format!("date {date} is in the past"),
        ));
    }
    Ok(date)
}

/// Parses the optional adult passenger count, defaulting to 1.
fn parse_adults(request_id: &str, raw: Option<&str>) -> Result<u8, ApiError> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    match raw.parse::<u8>() {
        Ok(n) if (1..=MAX_ADULTS).contains(&n) => Ok(n),
        _ => Err(ApiError::new(
            request_id,
            "validation_error",
            format!("adults must be between 1 and {MAX_ADULTS}, got \"{raw}\""),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use skyfare_amadeus::{AmadeusClient, ClientCredentials, Credentials};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::build_app;

    fn state_for(base_url: &str) -> AppState {
        let amadeus = AmadeusClient::with_base_url(5, "skyfare-test/0.1", base_url).expect("client");
        let credentials = ClientCredentials::new(
            amadeus.clone(),
            Credentials {
                client_id: "key".to_string(),
                client_secret: "secret".to_string(),
            },
        );
        AppState {
            amadeus,
            credentials,
            search_max_results: 10,
        }
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/security/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
                "access_token": "tok",
                "expires_in": 1799
            })))
            .mount(server)
            .await;
    }

    fn tomorrow() -> String {
        today()
            .succ_opt()
            .expect("tomorrow")
            .format("%Y-%m-%d")
            .to_string()
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[test]
    fn parse_departure_date_requires_value() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let err = parse_departure_date("r", None, today).unwrap_err();
        assert_eq!(err.error.code, "validation_error");
    }

    #[test]
    fn parse_departure_date_rejects_bad_format() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert!(parse_departure_date("r", Some("02/11/2026"), today).is_err());
        assert!(parse_departure_date("r", Some("2026-13-01"), today).is_err());
    }

    #[test]
    fn parse_departure_date_rejects_past_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let err = parse_departure_date("r", Some("2026-10-15"), today).unwrap_err();
        assert!(err.error.message.contains("in the past"));
    }

    #[test]
    fn parse_departure_date_accepts_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(
            parse_departure_date("r", Some("2026-10-16"), today).unwrap(),
            today
        );
    }

    #[test]
    fn parse_adults_defaults_and_bounds() {
        assert_eq!(parse_adults("r", None).unwrap(), 1);
        assert_eq!(parse_adults("r", Some("9")).unwrap(), 9);
        assert!(parse_adults("r", Some("0")).is_err());
        assert!(parse_adults("r", Some("10")).is_err());
        assert!(parse_adults("r", Some("two")).is_err());
    }

    #[tokio::test]
    async fn search_flights_returns_simplified_flights() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        let date = tomorrow();
        Mock::given(method("GET"))
            .and(path("/v2/shopping/flight-offers"))
            .and(query_param("originLocationCode", "JFK"))
            .and(query_param("destinationLocationCode", "LAX"))
            .and(query_param("departureDate", date.as_str()))
            .and(query_param("max", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "id": "1",
                    "itineraries": [{
                        "segments": [{
                            "departure": { "iataCode": "JFK" },
                            "arrival": { "iataCode": "LAX" },
                            "carrierCode": "AA",
                            "number": "100"
                        }]
                    }],
                    "price": { "currency": "USD", "total": "199.99" }
                }],
                "dictionaries": {
                    "locations": {
                        "JFK": { "cityCode": "NYC", "countryCode": "US" },
                        "LAX": { "cityCode": "LAX", "countryCode": "US" }
                    },
                    "carriers": { "AA": "American Airlines" }
                }
            })))
            .mount(&server)
            .await;

        let app = build_app(state_for(&server.uri()));
        let (status, json) = get_json(app, &format!("/api/v1/flights/jfk/lax?date={date}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"],
            json!([{
                "id": "1",
                "origin": { "code": "JFK", "country": "US" },
                "destination": { "code": "LAX", "country": "US" },
                "airline": "American Airlines",
                "flightNumber": "AA100",
                "price": { "currency": "USD", "total": "199.99" }
            }])
        );
    }

    #[tokio::test]
    async fn search_flights_with_no_offers_returns_empty_array() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/shopping/flight-offers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let app = build_app(state_for(&server.uri()));
        let (status, json) =
            get_json(app, &format!("/api/v1/flights/JFK/LAX?date={}", tomorrow())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn search_flights_rejects_invalid_origin_without_calling_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = build_app(state_for(&server.uri()));
        let (status, json) =
            get_json(app, &format!("/api/v1/flights/JF1/LAX?date={}", tomorrow())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn search_flights_maps_token_rejection_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/security/oauth2/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "invalid_client",
                "error_description": "Client credentials are invalid"
            })))
            .mount(&server)
            .await;

        let app = build_app(state_for(&server.uri()));
        let (status, json) =
            get_json(app, &format!("/api/v1/flights/JFK/LAX?date={}", tomorrow())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn search_flights_maps_upstream_failure_to_bad_gateway() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/shopping/flight-offers"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "errors": [{ "status": 500, "code": 141, "title": "SYSTEM ERROR HAS OCCURRED" }]
            })))
            .mount(&server)
            .await;

        let app = build_app(state_for(&server.uri()));
        let (status, json) =
            get_json(app, &format!("/api/v1/flights/JFK/LAX?date={}", tomorrow())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "bad_gateway");
        assert_eq!(json["error"]["message"], "SYSTEM ERROR HAS OCCURRED (141)");
    }
}
