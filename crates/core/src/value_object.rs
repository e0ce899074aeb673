//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances holding the same values
/// are the same value. They are immutable; "changing" one means building a new
/// one and handing it to the owning entity (e.g. `Customer::change_address`).
///
/// ```ignore
/// let a = Address::new("Street 1", 1, "Zipcode 1", "City 1")?;
/// let b = Address::new("Street 1", 1, "Zipcode 1", "City 1")?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
