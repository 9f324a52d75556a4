//! Amadeus API response types.
//!
//! Only the fields the adapter reads are modelled; serde ignores the rest.
//!
//! ### Flight offers (`/v2/shopping/flight-offers`)
//! The body is `{ "data": [offer, ...], "dictionaries": { ... } }`. Each
//! offer nests `itineraries[].segments[]`, and segments carry raw codes
//! (`departure.iataCode`, `carrierCode`) that only make sense next to the
//! `dictionaries` side table. When a search matches nothing the upstream
//! omits `dictionaries` entirely, so it defaults to empty. Offers are kept as
//! raw JSON and decoded one at a time during normalization, so a single
//! incomplete offer cannot fail the whole body.
//!
//! ### Token (`/v1/security/oauth2/token`)
//! Only `access_token` is guaranteed; the remaining fields are informational.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// OAuth2 token
// ---------------------------------------------------------------------------

/// Bearer token issued by the client-credentials grant.
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub application_name: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub state: Option<String>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("kind", &self.kind)
            .field("application_name", &self.application_name)
            .field("token_type", &self.token_type)
            .field("access_token", &"[redacted]")
            .field("expires_in", &self.expires_in)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Error body returned by the token endpoint on failure.
#[derive(Debug, Deserialize)]
pub struct TokenErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Error envelope returned by the data endpoints: `{ "errors": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

// ---------------------------------------------------------------------------
// Flight offers
// ---------------------------------------------------------------------------

/// Top-level body of a flight-offers search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightOffersResponse {
    /// Undecoded offers; see [`RawFlight`] for the shape each is expected to have.
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default)]
    pub dictionaries: DictionaryInfo,
}

/// One priced flight offer as the upstream sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFlight {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub itineraries: Vec<Itinerary>,
    pub price: RawPrice,
}

/// One directional leg grouping (outbound or return).
#[derive(Debug, Clone, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub segments: Vec<Segment>,
}

/// A single flown leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: SegmentPoint,
    pub arrival: SegmentPoint,
    pub carrier_code: String,
    /// Numeric part of the flight number, e.g. `"100"`.
    pub number: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPoint {
    pub iata_code: String,
    #[serde(default)]
    pub terminal: Option<String>,
    /// Local timestamp, e.g. `"2026-11-02T08:15:00"`.
    #[serde(default)]
    pub at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPrice {
    pub currency: String,
    /// Decimal string; kept verbatim.
    pub total: String,
}

/// Side table of human-readable metadata for the codes used in `data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryInfo {
    #[serde(default)]
    pub locations: HashMap<String, LocationInfo>,
    #[serde(default)]
    pub carriers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    #[serde(default)]
    pub city_code: String,
    #[serde(default)]
    pub country_code: String,
}

// ---------------------------------------------------------------------------
// Flight destinations (inspiration search)
// ---------------------------------------------------------------------------

/// Top-level body of `/v1/shopping/flight-destinations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestinationsResponse {
    /// Undecoded entries, each expected to match [`RawDestination`].
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDestination {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    pub price: DestinationPrice,
    #[serde(default)]
    pub links: Option<DestinationLinks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationPrice {
    pub total: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationLinks {
    #[serde(default)]
    pub flight_dates: Option<String>,
    #[serde(default)]
    pub flight_offers: Option<String>,
}

/// Treats an explicit `null` list the same as an absent one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
