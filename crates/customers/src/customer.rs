use serde::{Deserialize, Serialize};

use orderdesk_core::{AggregateRoot, CustomerId, DomainError, DomainResult, Entity};
use orderdesk_events::{CustomerAddressChanged, CustomerCreated, Event};

use crate::Address;

/// Aggregate root: Customer.
///
/// Invariants:
/// - `name` is never empty
/// - an active customer always has an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl Customer {
    /// Create an inactive customer without an address.
    pub fn new(id: CustomerId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        ensure_name(&name)?;

        Ok(Self {
            id,
            name,
            address: None,
            active: false,
            reward_points: 0,
        })
    }

    pub fn id_typed(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        ensure_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replace the address and describe the change as an event.
    ///
    /// The caller decides whether (and where) to dispatch the returned event.
    pub fn change_address(&mut self, address: Address) -> Event {
        self.address = Some(address);
        Event::new(self.address_changed())
    }

    fn address_changed(&self) -> CustomerAddressChanged {
        CustomerAddressChanged {
            id: self.id.clone(),
            name: self.name.clone(),
            address: self
                .address
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }

    /// Mark the customer active. Requires an address.
    pub fn activate(&mut self) -> DomainResult<()> {
        if self.address.is_none() {
            return Err(DomainError::validation(
                "address is mandatory to activate a customer",
            ));
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Credit reward points. Zero is rejected; the balance only ever grows.
    pub fn add_reward_points(&mut self, points: u64) -> DomainResult<()> {
        if points == 0 {
            return Err(DomainError::validation("reward points must be positive"));
        }
        self.reward_points = self.reward_points.saturating_add(points);
        Ok(())
    }

    /// Event describing this customer's creation.
    pub fn created_event(&self) -> Event {
        Event::new(CustomerCreated {
            id: self.id.clone(),
            name: self.name.clone(),
        })
    }
}

fn ensure_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Customer {
    fn validate(&self) -> DomainResult<()> {
        ensure_name(&self.name)?;
        if self.active && self.address.is_none() {
            return Err(DomainError::validation(
                "active customer must have an address",
            ));
        }
        Ok(())
    }
}

/// Flat persistence shape of a [`Customer`].
///
/// Address columns are either all present or all absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub number: Option<u32>,
    pub zipcode: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub reward_points: u64,
}

impl Customer {
    pub fn to_record(&self) -> CustomerRecord {
        let address = self.address.as_ref();
        CustomerRecord {
            id: self.id.to_string(),
            name: self.name.clone(),
            street: address.map(|a| a.street().to_string()),
            number: address.map(Address::number),
            zipcode: address.map(|a| a.zip().to_string()),
            city: address.map(|a| a.city().to_string()),
            active: self.active,
            reward_points: self.reward_points,
        }
    }

    /// Rebuild a customer from its flat record, re-checking every invariant.
    pub fn from_record(record: CustomerRecord) -> DomainResult<Self> {
        let address = match (record.street, record.number, record.zipcode, record.city) {
            (Some(street), Some(number), Some(zip), Some(city)) => {
                Some(Address::new(street, number, zip, city)?)
            }
            (None, None, None, None) => None,
            _ => {
                return Err(DomainError::validation(
                    "address columns must be all present or all absent",
                ));
            }
        };

        let customer = Self {
            id: CustomerId::new(record.id)?,
            name: record.name,
            address,
            active: record.active,
            reward_points: record.reward_points,
        };
        customer.validate()?;
        Ok(customer)
    }
}
