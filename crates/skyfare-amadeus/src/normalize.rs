//! Normalization of Amadeus API types into the flat shapes served to clients.

use serde::Deserialize;
use serde_json::Value;
use skyfare_core::{DestinationSummary, FlightEndpoint, FlightPrice, SimplifiedFlight};

use crate::error::MalformedRecord;
use crate::flatten::flatten;
use crate::types::{
    DestinationsResponse, DictionaryInfo, FlightOffersResponse, RawDestination, RawFlight,
};

/// Converts one [`RawFlight`] into a [`SimplifiedFlight`], resolving codes
/// through `dictionaries`.
///
/// Price fields are copied verbatim; `total` is never parsed.
///
/// # Errors
///
/// Returns a [`MalformedRecord`] when the flight has no usable itinerary or
/// segment. The caller is expected to skip the flight.
pub fn simplify(
    flight: &RawFlight,
    dictionaries: &DictionaryInfo,
) -> Result<SimplifiedFlight, MalformedRecord> {
    let leg = flatten(&flight.itineraries)?;

    let origin = FlightEndpoint {
        code: leg.departure_code.to_owned(),
        country: dictionaries.resolve_location(leg.departure_code).country_code,
    };
    let destination = FlightEndpoint {
        code: leg.arrival_code.to_owned(),
        country: dictionaries.resolve_location(leg.arrival_code).country_code,
    };
    let airline = dictionaries.resolve_carrier(leg.carrier_code);

    Ok(SimplifiedFlight {
        id: flight.id.clone(),
        origin,
        destination,
        airline,
        flight_number: leg.flight_number,
        price: FlightPrice {
            currency: flight.price.currency.clone(),
            total: flight.price.total.clone(),
        },
    })
}

/// Decodes one raw offer and simplifies it.
///
/// # Errors
///
/// Returns [`MalformedRecord::Undecodable`] if the JSON does not have the
/// offer shape, or whatever [`simplify`] reports.
pub fn decode_offer(
    raw: &Value,
    dictionaries: &DictionaryInfo,
) -> Result<SimplifiedFlight, MalformedRecord> {
    let flight = RawFlight::deserialize(raw).map_err(|e| {
        tracing::debug!(error = %e, "flight offer failed to decode");
        MalformedRecord::Undecodable
    })?;
    simplify(&flight, dictionaries)
}

/// Simplifies every flight in `response`, in input order, dropping malformed
/// offers.
#[must_use]
pub fn normalize(response: &FlightOffersResponse) -> Vec<SimplifiedFlight> {
    let mut flights = Vec::with_capacity(response.data.len());

    for raw in &response.data {
        match decode_offer(raw, &response.dictionaries) {
            Ok(flight) => flights.push(flight),
            Err(reason) => {
                tracing::warn!(
                    flight_id = raw.get("id").and_then(serde_json::Value::as_str).unwrap_or("<none>"),
                    %reason,
                    "skipping malformed flight offer"
                );
            }
        }
    }

    flights
}

/// Converts an inspiration-search response into [`DestinationSummary`]
/// entries, in input order. Entries that do not decode are skipped.
#[must_use]
pub fn normalize_destinations(response: &DestinationsResponse) -> Vec<DestinationSummary> {
    response
        .data
        .iter()
        .filter_map(|raw| match RawDestination::deserialize(raw) {
            Ok(d) => Some(d),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed destination entry");
                None
            }
        })
        .map(|d| DestinationSummary {
            origin: d.origin,
            destination: d.destination,
            departure_date: d.departure_date,
            price: d.price.total,
            flight_offers: d.links.and_then(|l| l.flight_offers),
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
