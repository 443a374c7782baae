use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    validation,
};

pub const DEFAULT_CURRENCY: &str = "INR";

/// Checkout request. `amount` is in whole currency units.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub pan: Option<String>,
}

#[derive(Debug)]
pub struct ValidOrder {
    pub amount: i64,
    pub amount_minor: i64,
    pub currency: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub pan: Option<String>,
}

impl CreateOrderRequest {
    pub fn validate(self) -> AppResult<ValidOrder> {
        let amount = match self.amount {
            Some(a) if a > 0 => a,
            Some(_) => return Err(AppError::validation("amount must be greater than zero")),
            None => return Err(AppError::validation("amount is required")),
        };
        let amount_minor = amount
            .checked_mul(100)
            .ok_or_else(|| AppError::validation("amount is too large"))?;
        let currency = validation::optional(self.currency.as_deref())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::validation("currency must be a 3-letter code"));
        }

        Ok(ValidOrder {
            amount,
            amount_minor,
            currency,
            name: validation::required(self.name.as_deref(), "name")?,
            email: validation::email(self.email.as_deref())?,
            phone: validation::optional(self.phone.as_deref()),
            address: validation::optional(self.address.as_deref()),
            pan: validation::optional(self.pan.as_deref()).map(|p| p.to_ascii_uppercase()),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Minor units, as the checkout widget expects.
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
    pub donation_id: Uuid,
}

/// Payment confirmation posted by the checkout callback. Accepts both the
/// provider's snake_case names and camelCase.
#[derive(Debug, Default, Deserialize)]
pub struct SaveDonationRequest {
    #[serde(alias = "razorpay_order_id", alias = "orderId")]
    pub order_id: Option<String>,
    #[serde(alias = "razorpay_payment_id", alias = "paymentId")]
    pub payment_id: Option<String>,
    #[serde(alias = "razorpay_signature")]
    pub signature: Option<String>,
}

pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl SaveDonationRequest {
    pub fn validate(self) -> AppResult<PaymentConfirmation> {
        Ok(PaymentConfirmation {
            order_id: validation::required(self.order_id.as_deref(), "orderId")?,
            payment_id: validation::required(self.payment_id.as_deref(), "paymentId")?,
            signature: validation::required(self.signature.as_deref(), "signature")?,
        })
    }
}
