//! Checkout order value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TransactionReference, ValidationError};

/// Default buyer country for the provider (it only operates in Mexico).
pub const DEFAULT_COUNTRY_ISO2: &str = "MX";

/// Buyer postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerAddress {
    pub street: String,
    pub city: String,
    /// State code or name; optional on the order side.
    pub state: Option<String>,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country_iso2: String,
}

/// Buyer identity as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: BuyerAddress,
}

/// Order data needed to open a hosted checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOrder {
    pub reference: TransactionReference,
    /// Amount in minor currency units (cents).
    pub amount_minor: i64,
    pub currency: String,
    pub buyer: Buyer,
}

impl CheckoutOrder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount_minor <= 0 {
            return Err(ValidationError::invalid_format(
                "amount",
                "must be a positive number of minor units",
            ));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "must be a three-letter ISO 4217 code",
            ));
        }
        if self.buyer.email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        Ok(())
    }
}

/// Where the provider sends the buyer after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackUrls {
    pub confirm_url: String,
    pub cancel_url: String,
}

/// A hosted checkout session created at the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub redirect_url: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY_ISO2.to_string()
}
