//! Nelo REST API payloads.
//!
//! Field names follow the provider's camelCase JSON. Address fields the
//! order side does not collect are sent as empty strings, which the
//! provider accepts.

use serde::{Deserialize, Serialize};

use crate::domain::payment::{CallbackUrls, CheckoutOrder};

// ════════════════════════════════════════════════════════════════════════════════
// POST /checkout
// ════════════════════════════════════════════════════════════════════════════════

/// Body of the session-creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeloCheckoutRequest {
    pub order: NeloOrder,
    pub customer: NeloCustomer,
    pub redirect_confirm_url: String,
    pub redirect_cancel_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeloOrder {
    pub id: String,
    pub total_amount: NeloAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeloAmount {
    /// Minor units.
    pub amount: i64,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeloCustomer {
    pub phone_number: NeloPhoneNumber,
    pub first_name: String,
    pub maternal_last_name: String,
    pub paternal_last_name: String,
    pub email: String,
    pub address: NeloAddress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeloPhoneNumber {
    pub number: String,
    pub country_iso2: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeloAddress {
    #[serde(rename = "addressMX")]
    pub address_mx: NeloAddressMx,
    pub country_iso2: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeloAddressMx {
    pub building_number: String,
    pub street: String,
    pub interior_number: String,
    pub city: String,
    pub delegation: String,
    pub state: String,
    pub colony: String,
    pub postal_code: String,
}

impl NeloCheckoutRequest {
    pub fn from_order(order: &CheckoutOrder, callbacks: &CallbackUrls) -> Self {
        let buyer = &order.buyer;
        let country = buyer.address.country_iso2.clone();

        Self {
            order: NeloOrder {
                id: order.reference.to_string(),
                total_amount: NeloAmount {
                    amount: order.amount_minor,
                    currency_code: order.currency.clone(),
                },
            },
            customer: NeloCustomer {
                phone_number: NeloPhoneNumber {
                    number: buyer.phone.clone(),
                    country_iso2: country.clone(),
                },
                first_name: buyer.first_name.clone(),
                maternal_last_name: String::new(),
                paternal_last_name: buyer.last_name.clone(),
                email: buyer.email.clone(),
                address: NeloAddress {
                    address_mx: NeloAddressMx {
                        building_number: String::new(),
                        street: buyer.address.street.clone(),
                        interior_number: String::new(),
                        city: buyer.address.city.clone(),
                        delegation: String::new(),
                        state: buyer.address.state.clone().unwrap_or_default(),
                        colony: String::new(),
                        postal_code: buyer.address.postal_code.clone(),
                    },
                    country_iso2: country,
                },
            },
            redirect_confirm_url: callbacks.confirm_url.clone(),
            redirect_cancel_url: callbacks.cancel_url.clone(),
        }
    }
}

/// Successful session-creation response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeloCheckoutResponse {
    pub redirect_url: String,
}
