use serde::{Deserialize, Serialize};

/// A flight offer flattened for clients: one representative leg, with codes
/// already resolved into display values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedFlight {
    /// Upstream offer ID. Omitted from JSON when the upstream did not send one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub origin: FlightEndpoint,
    pub destination: FlightEndpoint,
    /// Airline display name; empty when the carrier is not in the upstream dictionary.
    pub airline: String,
    /// Carrier code followed by the flight number, e.g. `"AA100"`.
    pub flight_number: String,
    pub price: FlightPrice,
}

/// One end of a flight: the IATA code plus the country it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightEndpoint {
    pub code: String,
    /// ISO country code, or `""` when the location is unknown upstream.
    pub country: String,
}

/// Price exactly as the upstream quoted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPrice {
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency: String,
    /// Decimal string, never parsed or rounded, e.g. `"199.99"`.
    pub total: String,
}

/// A cheapest-destination entry from an inspiration search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSummary {
    pub origin: String,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    /// Total price as a decimal string.
    pub price: String,
    /// Upstream link to the matching flight-offers search, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_offers: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_flight() -> SimplifiedFlight {
        SimplifiedFlight {
            id: Some("1".to_string()),
            origin: FlightEndpoint {
                code: "JFK".to_string(),
                country: "US".to_string(),
            },
            destination: FlightEndpoint {
                code: "LAX".to_string(),
                country: "US".to_string(),
            },
            airline: "American Airlines".to_string(),
            flight_number: "AA100".to_string(),
            price: FlightPrice {
                currency: "USD".to_string(),
                total: "199.99".to_string(),
            },
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(make_flight()).expect("serialize");
        assert_eq!(json["flightNumber"], "AA100");
        assert_eq!(json["origin"]["country"], "US");
        assert_eq!(json["price"]["total"], "199.99");
        assert!(json.get("flight_number").is_none());
    }

    #[test]
    fn omits_id_when_absent() {
        let mut flight = make_flight();
        flight.id = None;
        let json = serde_json::to_value(flight).expect("serialize");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn destination_summary_skips_missing_link() {
        let summary = DestinationSummary {
            origin: "MAD".to_string(),
            destination: "OPO".to_string(),
            departure_date: Some("2026-11-02".to_string()),
            price: "54.31".to_string(),
            flight_offers: None,
        };
        let json = serde_json::to_value(summary).expect("serialize");
        assert_eq!(json["departureDate"], "2026-11-02");
        assert!(json.get("flightOffers").is_none());
    }
}
