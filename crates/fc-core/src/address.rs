//! Postal addresses parsed from free text

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Shortest free-text input accepted by the coverage check
pub const MIN_ADDRESS_LEN: usize = 5;

pub const UNKNOWN_SUBURB: &str = "Unknown Suburb";
pub const UNKNOWN_CITY: &str = "Unknown City";

pub const INVALID_ADDRESS: &str = "Please enter a valid address.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suburb: String,
    pub city: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        suburb: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            suburb: suburb.into(),
            city: city.into(),
        }
    }

    /// Split `"street, suburb, city"` on commas. Missing parts fall back to
    /// placeholders; the street falls back to the whole input.
    pub fn parse(input: &str) -> Self {
        let mut parts = input.split(',').map(str::trim);
        let street = match parts.next() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => input.to_string(),
        };
        let suburb = parts.next().filter(|s| !s.is_empty()).unwrap_or(UNKNOWN_SUBURB);
        let city = parts.next().filter(|s| !s.is_empty()).unwrap_or(UNKNOWN_CITY);

        Self::new(street, suburb, city)
    }

    /// Validate raw input before it is parsed and sent anywhere.
    pub fn from_input(input: &str) -> CoreResult<Self> {
        if input.trim().is_empty() || input.chars().count() < MIN_ADDRESS_LEN {
            return Err(CoreError::Validation(INVALID_ADDRESS.to_string()));
        }
        Ok(Self::parse(input))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.street, self.suburb, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let address = Address::parse(" 12 Main Rd ,  Claremont, Cape Town ");
        assert_eq!(address, Address::new("12 Main Rd", "Claremont", "Cape Town"));
    }

    #[test]
    fn test_parse_sparse() {
        let address = Address::parse("15 Fibre Way");
        assert_eq!(address.street, "15 Fibre Way");
        assert_eq!(address.suburb, UNKNOWN_SUBURB);
        assert_eq!(address.city, UNKNOWN_CITY);

        let address = Address::parse("1 Long St, , Durban");
        assert_eq!(address.suburb, UNKNOWN_SUBURB);
        assert_eq!(address.city, "Durban");
    }

    #[test]
    fn test_parse_leading_comma_keeps_input_as_street() {
        let address = Address::parse(", Sandton");
        assert_eq!(address.street, ", Sandton");
        assert_eq!(address.suburb, "Sandton");
    }

    #[test]
    fn test_from_input_rejects_short() {
        assert!(Address::from_input("").unwrap_err().is_validation());
        assert!(Address::from_input("    ").is_err());
        assert!(Address::from_input("1 Rd").is_err());
        assert!(Address::from_input("1 Road").is_ok());
    }
}
