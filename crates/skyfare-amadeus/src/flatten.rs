//! Picks the representative leg out of an offer's itinerary tree.
//!
//! The upstream orders itineraries outbound-first and segments in flying
//! order, so the first segment of the first itinerary is the primary
//! outbound leg.

use crate::error::MalformedRecord;
use crate::types::{Itinerary, Segment};

/// Route and flight fields extracted from the representative segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatLeg<'a> {
    pub departure_code: &'a str,
    pub arrival_code: &'a str,
    pub carrier_code: &'a str,
    /// Carrier code concatenated with the numeric flight number, e.g. `"AA123"`.
    pub flight_number: String,
}

/// Returns the first segment of the first itinerary.
///
/// # Errors
///
/// - [`MalformedRecord::NoItineraries`] if `itineraries` is empty.
/// - [`MalformedRecord::EmptyItinerary`] if the first itinerary has no segments.
pub fn select_representative_segment(
    itineraries: &[Itinerary],
) -> Result<&Segment, MalformedRecord> {
    match itineraries {
        [] => Err(MalformedRecord::NoItineraries),
        [first, ..] => match first.segments.as_slice() {
            [] => Err(MalformedRecord::EmptyItinerary),
            [segment, ..] => Ok(segment),
        },
    }
}

/// Flattens an itinerary tree into the fields of its representative leg.
///
/// # Errors
///
/// Propagates the [`MalformedRecord`] from [`select_representative_segment`].
pub fn flatten(itineraries: &[Itinerary]) -> Result<FlatLeg<'_>, MalformedRecord> {
    let segment = select_representative_segment(itineraries)?;
    Ok(FlatLeg {
        departure_code: &segment.departure.iata_code,
        arrival_code: &segment.arrival.iata_code,
        carrier_code: &segment.carrier_code,
        flight_number: format!("{}{}", segment.carrier_code, segment.number),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentPoint;

    fn point(code: &str) -> SegmentPoint {
        SegmentPoint {
            iata_code: code.to_string(),
            terminal: None,
            at: None,
        }
    }

    fn segment(from: &str, to: &str, carrier: &str, number: &str) -> Segment {
        Segment {
            departure: point(from),
            arrival: point(to),
            carrier_code: carrier.to_string(),
            number: number.to_string(),
        }
    }

    fn itinerary(segments: Vec<Segment>) -> Itinerary {
        Itinerary {
            duration: None,
            segments,
        }
    }

    #[test]
    fn empty_itineraries_are_malformed() {
        let result = select_representative_segment(&[]);
        assert_eq!(result.unwrap_err(), MalformedRecord::NoItineraries);
    }

    #[test]
    fn first_itinerary_without_segments_is_malformed() {
        // A later itinerary with segments does not rescue an empty first one.
        let itineraries = vec![
            itinerary(vec![]),
            itinerary(vec![segment("LAX", "JFK", "AA", "200")]),
        ];
        let result = select_representative_segment(&itineraries);
        assert_eq!(result.unwrap_err(), MalformedRecord::EmptyItinerary);
    }

    #[test]
    fn picks_first_segment_of_multi_segment_itinerary() {
        let itineraries = vec![itinerary(vec![
            segment("JFK", "ORD", "AA", "100"),
            segment("ORD", "SFO", "UA", "900"),
        ])];
        let leg = flatten(&itineraries).unwrap();
        assert_eq!(leg.departure_code, "JFK");
        assert_eq!(leg.arrival_code, "ORD");
        assert_eq!(leg.carrier_code, "AA");
        assert_eq!(leg.flight_number, "AA100");
    }

    #[test]
    fn ignores_return_itinerary() {
        let itineraries = vec![
            itinerary(vec![segment("MAD", "OPO", "TP", "1019")]),
            itinerary(vec![segment("OPO", "MAD", "IB", "8711")]),
        ];
        let leg = flatten(&itineraries).unwrap();
        assert_eq!(leg.departure_code, "MAD");
        assert_eq!(leg.flight_number, "TP1019");
    }
}
