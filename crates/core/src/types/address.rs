//! Delivery address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`DeliveryAddress`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    /// A required field is empty.
    #[error("Please fill in \"{0}\"")]
    Missing(AddressField),
}

/// One field of the delivery form.
///
/// [`AddressField::ALL`] fixes the order in which fields are checked, so the
/// first empty field reported is always the same for a given draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    FirstName,
    LastName,
    Email,
    Street,
    City,
    State,
    Zipcode,
    Country,
    Phone,
}

impl AddressField {
    /// Every field, in form order.
    pub const ALL: [Self; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Street,
        Self::City,
        Self::State,
        Self::Zipcode,
        Self::Country,
        Self::Phone,
    ];

    /// Wire name of the field (also used in validation messages).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Zipcode => "zipcode",
            Self::Country => "country",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AddressField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown address field: {s}"))
    }
}

/// Delivery information collected at checkout.
///
/// Fields are edited one at a time with no validation; completeness is only
/// checked when a cash-on-delivery order is submitted.
///
/// ## Examples
///
/// ```
/// use food_store_core::{AddressError, AddressField, DeliveryAddress};
///
/// let mut address = DeliveryAddress::default();
/// address.set(AddressField::FirstName, "Asha");
///
/// // The first empty field in form order is reported.
/// assert_eq!(
///     address.validate(),
///     Err(AddressError::Missing(AddressField::LastName))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
    pub phone: String,
}

impl DeliveryAddress {
    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::FirstName => &self.first_name,
            AddressField::LastName => &self.last_name,
            AddressField::Email => &self.email,
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Zipcode => &self.zipcode,
            AddressField::Country => &self.country,
            AddressField::Phone => &self.phone,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::FirstName => &mut self.first_name,
            AddressField::LastName => &mut self.last_name,
            AddressField::Email => &mut self.email,
            AddressField::Street => &mut self.street,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Zipcode => &mut self.zipcode,
            AddressField::Country => &mut self.country,
            AddressField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }

    /// First empty field in form order, if any.
    #[must_use]
    pub fn first_missing(&self) -> Option<AddressField> {
        AddressField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
    }

    /// Check that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Missing`] naming the first empty field.
    pub fn validate(&self) -> Result<(), AddressError> {
        self.first_missing()
            .map_or(Ok(()), |field| Err(AddressError::Missing(field)))
    }
}
