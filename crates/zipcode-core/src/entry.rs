//! Postal record type definitions

use serde::{Deserialize, Serialize};

/// One postal-code record.
///
/// Every field is kept as the text found in the dataset. Latitude and
/// longitude are not parsed and zip codes are not validated, so a record
/// round-trips to clients exactly as it was loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub zipcode: String,
    pub city: String,
    pub state: String,
    pub state_code: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

impl Entry {
    /// Number of positional fields in a dataset record
    pub const FIELD_COUNT: usize = 7;

    pub fn builder() -> EntryBuilder {
        EntryBuilder::new()
    }

    /// All field values in dataset column order
    pub fn fields(&self) -> [&str; Self::FIELD_COUNT] {
        [
            self.zipcode.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.state_code.as_str(),
            self.country.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
        ]
    }

    /// Returns true if any field of this entry equals `value` exactly
    pub fn has_field_value(&self, value: &str) -> bool {
        self.fields().iter().any(|field| *field == value)
    }
}

/// Builder for [`Entry`], mostly useful for tests and fixtures.
#[derive(Debug, Default)]
pub struct EntryBuilder {
    entry: Entry,
}

impl EntryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zipcode(mut self, zipcode: impl Into<String>) -> Self {
        self.entry.zipcode = zipcode.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.entry.city = city.into();
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.entry.state = state.into();
        self
    }

    pub fn state_code(mut self, state_code: impl Into<String>) -> Self {
        self.entry.state_code = state_code.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.entry.country = country.into();
        self
    }

    pub fn coordinates(mut self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.entry.latitude = latitude.into();
        self.entry.longitude = longitude.into();
        self
    }

    pub fn build(self) -> Entry {
        self.entry
    }
}
