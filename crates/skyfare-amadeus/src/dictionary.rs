//! Code-to-display lookups against a response's [`DictionaryInfo`].
//!
//! Upstream dictionaries are not exhaustive (unlisted low-cost carriers are
//! common), so every `resolve_*` call falls back to an empty value instead of
//! failing. The plain `Option` lookups are there for callers that need to know
//! whether the entry existed.

use crate::types::{DictionaryInfo, LocationInfo};

impl DictionaryInfo {
    /// Looks up a location by IATA code.
    #[must_use]
    pub fn location(&self, code: &str) -> Option<&LocationInfo> {
        self.locations.get(code)
    }

    /// Looks up an airline name by carrier code.
    #[must_use]
    pub fn carrier(&self, code: &str) -> Option<&str> {
        self.carriers.get(code).map(String::as_str)
    }

    /// Resolves a location, returning empty city/country codes when the code
    /// is not in the dictionary.
    #[must_use]
    pub fn resolve_location(&self, code: &str) -> LocationInfo {
        if let Some(info) = self.location(code) {
            return info.clone();
        }
        tracing::debug!(code, "location missing from upstream dictionary");
        LocationInfo::default()
    }

    /// Resolves an airline name, returning `""` when the carrier is not in the
    /// dictionary.
    #[must_use]
    pub fn resolve_carrier(&self, code: &str) -> String {
        if let Some(name) = self.carrier(code) {
            return name.to_owned();
        }
        tracing::debug!(code, "carrier missing from upstream dictionary");
        String::new()
    }
}
