use serde::{Deserialize, Serialize};

use shopfront_core::{StoreError, StoreResult};

/// How the shopper pays. Cash on delivery is the only supported method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "COD")]
    CashOnDelivery,
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PaymentMethod::CashOnDelivery => f.write_str("Cash on Delivery"),
        }
    }
}

/// Shipping details captured at checkout time.
///
/// Deliberately decoupled from any user-profile record: the order keeps its
/// own copy of where it shipped, whatever the account later says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub full_name: String,
    pub phone: String,
    pub city: String,
    pub province: String,
    pub address: String,
    pub payment_method: PaymentMethod,
}

impl ShippingInfo {
    pub fn validate(&self) -> StoreResult<()> {
        require_field("full_name", &self.full_name, 100)?;
        require_field("phone", &self.phone, 15)?;
        if !self
            .phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '))
        {
            return Err(StoreError::validation(
                "phone may only contain digits, '+', '-' and spaces",
            ));
        }
        require_field("city", &self.city, 50)?;
        require_field("province", &self.province, 50)?;
        require_field("address", &self.address, 500)?;
        Ok(())
    }
}

fn require_field(name: &str, value: &str, max_len: usize) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{name} is required")));
    }
    if value.chars().count() > max_len {
        return Err(StoreError::validation(format!(
            "{name} exceeds {max_len} characters"
        )));
    }
    Ok(())
}
