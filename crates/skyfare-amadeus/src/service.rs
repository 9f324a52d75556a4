//! Request-scoped operations: authenticate, query upstream, normalize.

use skyfare_core::{DestinationSummary, SimplifiedFlight};

use crate::auth::CredentialProvider;
use crate::client::{AmadeusClient, FlightSearch};
use crate::error::AmadeusError;
use crate::normalize::{normalize, normalize_destinations};

/// Fetches a fresh token, runs the flight-offers search, and returns the
/// simplified flights in upstream order.
///
/// # Errors
///
/// Returns any [`AmadeusError`] raised while obtaining the token or calling
/// the search endpoint. Normalization itself never fails.
pub async fn find_flights<P: CredentialProvider>(
    client: &AmadeusClient,
    provider: &P,
    search: &FlightSearch,
) -> Result<Vec<SimplifiedFlight>, AmadeusError> {
    let token = provider.access_token().await?;
    let response = client.search_flight_offers(&token, search).await?;
    let flights = normalize(&response);

    tracing::info!(
        origin = %search.origin,
        destination = %search.destination,
        departure_date = %search.departure_date,
        received = response.data.len(),
        returned = flights.len(),
        "flight search complete"
    );
    Ok(flights)
}

/// Fetches a fresh token and lists cheapest destinations from `origin`.
///
/// # Errors
///
/// Returns any [`AmadeusError`] raised while obtaining the token or calling
/// the destinations endpoint.
pub async fn find_destinations<P: CredentialProvider>(
    client: &AmadeusClient,
    provider: &P,
    origin: &str,
    max_price: u32,
) -> Result<Vec<DestinationSummary>, AmadeusError> {
    let token = provider.access_token().await?;
    let response = client.search_destinations(&token, origin, max_price).await?;
    let destinations = normalize_destinations(&response);

    tracing::info!(
        origin,
        max_price,
        returned = destinations.len(),
        "destination search complete"
    );
    Ok(destinations)
}
