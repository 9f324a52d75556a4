pub mod auth;
pub mod client;
pub mod dictionary;
pub mod error;
pub mod flatten;
pub mod normalize;
pub mod service;
pub mod types;

pub use auth::{ClientCredentials, CredentialProvider};
pub use client::{AmadeusClient, Credentials, FlightSearch};
pub use error::{AmadeusError, MalformedRecord};
pub use normalize::{decode_offer, normalize, normalize_destinations, simplify};
pub use service::{find_destinations, find_flights};
pub use types::{AccessToken, DictionaryInfo, FlightOffersResponse, RawFlight};
