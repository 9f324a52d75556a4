use thiserror::Error;

/// Errors returned by the Amadeus API client.
#[derive(Debug, Error)]
pub enum AmadeusError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint refused the client credentials.
    #[error("Amadeus authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    /// A data endpoint answered with a non-2xx status.
    #[error("Amadeus returned HTTP {status} for {context}: {message}")]
    UpstreamStatus {
        status: u16,
        context: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Amadeus base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Why a flight offer could not be reduced to a single representative leg.
///
/// Never surfaced to callers: the batch normalizer drops the offer and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    #[error("flight offer has no itineraries")]
    NoItineraries,

    #[error("first itinerary has no segments")]
    EmptyItinerary,

    #[error("flight offer does not match the expected shape")]
    Undecodable,
}
