//! HTTP client for the Amadeus self-service REST APIs.
//!
//! Every call goes through [`AmadeusClient::fetch_json`], which sends the
//! request, checks the status, and decodes a typed body. Token requests and
//! data requests differ only in endpoint, auth, and response type.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::AmadeusError;
use crate::types::{
    AccessToken, ApiErrorBody, DestinationsResponse, FlightOffersResponse, TokenErrorBody,
};

const TOKEN_PATH: &str = "v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "v2/shopping/flight-offers";
const FLIGHT_DESTINATIONS_PATH: &str = "v1/shopping/flight-destinations";

/// Longest upstream error body echoed back in an error message.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// API key and secret for the client-credentials grant.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// How a request authenticates against Amadeus.
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    /// Credentials travel in the request body (token endpoint).
    None,
    Bearer(&'a AccessToken),
}

/// Parameters for a one-way flight-offers search.
#[derive(Debug, Clone)]
pub struct FlightSearch {
    /// Origin IATA code, upper-case.
    pub origin: String,
    /// Destination IATA code, upper-case.
    pub destination: String,
    pub departure_date: NaiveDate,
    pub adults: u8,
    pub max_results: u32,
}

/// Client for the Amadeus REST API.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct AmadeusClient {
    client: Client,
    base_url: Url,
}

impl AmadeusClient {
    /// Creates a client rooted at `base_url` (the Amadeus test or production
    /// host, or a wiremock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`AmadeusError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`AmadeusError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, AmadeusError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| AmadeusError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Exchanges client credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// - [`AmadeusError::Auth`] if the token endpoint answers with a non-2xx status.
    /// - [`AmadeusError::Http`] on network failure.
    /// - [`AmadeusError::Deserialize`] if the token body is not the expected shape.
    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken, AmadeusError> {
        let url = self.endpoint_url(TOKEN_PATH, &[])?;
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];
        let request = self.client.post(url).form(&form);

        match self.fetch_json(request, Auth::None, "oauth2 token").await {
            Err(AmadeusError::UpstreamStatus {
                status, message, ..
            }) => Err(AmadeusError::Auth { status, message }),
            other => other,
        }
    }

    /// Searches one-way flight offers for a route and departure date.
    ///
    /// # Errors
    ///
    /// - [`AmadeusError::UpstreamStatus`] on a non-2xx response.
    /// - [`AmadeusError::Http`] on network failure.
    /// - [`AmadeusError::Deserialize`] if the body does not match
    ///   [`FlightOffersResponse`].
    pub async fn search_flight_offers(
        &self,
        token: &AccessToken,
        search: &FlightSearch,
    ) -> Result<FlightOffersResponse, AmadeusError> {
        let departure_date = search.departure_date.format("%Y-%m-%d").to_string();
        let adults = search.adults.to_string();
        let max = search.max_results.to_string();
        let url = self.endpoint_url(
            FLIGHT_OFFERS_PATH,
            &[
                ("originLocationCode", search.origin.as_str()),
                ("destinationLocationCode", search.destination.as_str()),
                ("departureDate", departure_date.as_str()),
                ("adults", adults.as_str()),
                ("max", max.as_str()),
            ],
        )?;

        let context = format!(
            "flight-offers({}->{} on {departure_date})",
            search.origin, search.destination
        );
        self.fetch_json(self.client.get(url), Auth::Bearer(token), &context)
            .await
    }

    /// Lists the cheapest destinations reachable from `origin` under `max_price`.
    ///
    /// # Errors
    ///
    /// Same as [`AmadeusClient::search_flight_offers`].
    pub async fn search_destinations(
        &self,
        token: &AccessToken,
        origin: &str,
        max_price: u32,
    ) -> Result<DestinationsResponse, AmadeusError> {
        let max_price = max_price.to_string();
        let url = self.endpoint_url(
            FLIGHT_DESTINATIONS_PATH,
            &[("origin", origin), ("maxPrice", max_price.as_str())],
        )?;

        let context = format!("flight-destinations(origin={origin})");
        self.fetch_json(self.client.get(url), Auth::Bearer(token), &context)
            .await
    }

    /// Joins `path` onto the base URL and appends percent-encoded query pairs.
    fn endpoint_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AmadeusError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| AmadeusError::InvalidBaseUrl(format!("joining '{path}': {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends `request` with the given auth, asserts a 2xx status, and decodes
    /// the body as `T`.
    ///
    /// # Errors
    ///
    /// - [`AmadeusError::UpstreamStatus`] on a non-2xx status, with the
    ///   upstream's own error text when it can be extracted.
    /// - [`AmadeusError::Http`] on network failure.
    /// - [`AmadeusError::Deserialize`] if the body does not decode as `T`.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: Auth<'_>,
        context: &str,
    ) -> Result<T, AmadeusError> {
        let request = match auth {
            Auth::None => request,
            Auth::Bearer(token) => request.bearer_auth(&token.access_token),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), context, "amadeus request failed");
            return Err(AmadeusError::UpstreamStatus {
                status: status.as_u16(),
                context: context.to_owned(),
                message: describe_error_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| AmadeusError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Extracts a readable message from an Amadeus error body.
///
/// Understands both the data-API envelope (`errors[].title/detail`) and the
/// OAuth2 shape (`error`, `error_description`); anything else is returned
/// truncated.
fn describe_error_body(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(first) = envelope.errors.first() {
            let title = first.title.as_deref().unwrap_or("error");
            return match (&first.detail, first.code) {
                (Some(detail), Some(code)) => format!("{title} ({code}): {detail}"),
                (Some(detail), None) => format!("{title}: {detail}"),
                (None, Some(code)) => format!("{title} ({code})"),
                (None, None) => title.to_owned(),
            };
        }
    }

    if let Ok(token_error) = serde_json::from_str::<TokenErrorBody>(body) {
        if let Some(description) = token_error.error_description {
            return description;
        }
        if let Some(error) = token_error.error {
            return error;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_owned();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
