use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, DomainResult, ValueObject};

/// Postal address (value object).
///
/// Immutable once built; two addresses with the same fields are equal.
/// Renders as `"{street}, {number} {zip} {city}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl ValueObject for Address {}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> DomainResult<Self> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> DomainResult<()> {
        if self.street.trim().is_empty() {
            return Err(DomainError::validation("street cannot be empty"));
        }
        if self.number == 0 {
            return Err(DomainError::validation("number must be positive"));
        }
        if self.zip.trim().is_empty() {
            return Err(DomainError::validation("zip cannot be empty"));
        }
        if self.city.trim().is_empty() {
            return Err(DomainError::validation("city cannot be empty"));
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {} {} {}", self.street, self.number, self.zip, self.city)
    }
}
