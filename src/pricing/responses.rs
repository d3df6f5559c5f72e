//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::services::Quote;

/// Quote amounts as returned to the automation tool
#[derive(Debug, Clone, Serialize)]
pub struct PricingResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub base_no_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub t0: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub t5: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxes: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_with_vat: Decimal,
    pub currency: String,
}

impl From<Quote> for PricingResponse {
    fn from(quote: Quote) -> Self {
        Self {
            base_no_vat: quote.base_no_vat,
            t0: quote.t0,
            t5: quote.t5,
            taxes: quote.taxes,
            total_with_vat: quote.total_with_vat,
            currency: quote.currency.to_string(),
        }
    }
}

/// Successful estimate envelope
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub ok: bool,
    pub pricing: PricingResponse,
}

impl EstimateResponse {
    pub fn new(quote: Quote) -> Self {
        Self {
            ok: true,
            pricing: quote.into(),
        }
    }
}
