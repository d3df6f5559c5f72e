//! Berth quote engine.
//!
//! Combines the rate table lookup with the pure calculators to produce a
//! full quote. The engine holds nothing but a shared, read-only rate table,
//! so one instance serves every request.

use rust_decimal::Decimal;
use std::sync::Arc;

use super::calculators::{
    apply_vat, calculate_taxes, dynamic_price, resolve_effective_length, round_money,
    CATAMARAN_MULTIPLIER,
};
use super::models::{EffectiveLength, RateTable, StayType, Tier, VesselType};

/// Currency of every quote.
pub const CURRENCY: &str = "EUR";

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// The length/duration combination has no tariff entry and is not
    /// eligible for dynamic pricing.
    #[error("Error: Invalid length or rates not found.")]
    RateNotFound {
        effective_length: EffectiveLength,
        tier: Tier,
    },
}

/// A priced berth stay, every amount rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub base_no_vat: Decimal,
    pub t0: Decimal,
    pub t5: Decimal,
    pub taxes: Decimal,
    pub total_with_vat: Decimal,
    pub currency: &'static str,
}

/// Marina rate engine over an immutable tariff.
#[derive(Debug, Clone)]
pub struct RateEngine {
    rates: Arc<RateTable>,
}

impl RateEngine {
    pub fn new(rates: impl Into<Arc<RateTable>>) -> Self {
        Self {
            rates: rates.into(),
        }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Base berth price excluding taxes and VAT, unrounded.
    ///
    /// Oversized vessels with a known beam are priced dynamically. Everything
    /// else comes from the table: exactly 90, 180 or 365 days use that tier's
    /// flat price, other durations pro-rate the smallest covering tier.
    pub fn calculate_base_price(
        &self,
        length: Decimal,
        days: u32,
        vessel_type: VesselType,
        beam: Option<Decimal>,
    ) -> Result<Decimal, PricingError> {
        let effective = resolve_effective_length(length);

        let price = match (effective, beam) {
            (EffectiveLength::Oversized(len), Some(beam)) => dynamic_price(len, beam, days),
            _ => self.table_price(effective, days)?,
        };

        Ok(match vessel_type {
            VesselType::Catamaran => price * CATAMARAN_MULTIPLIER,
            _ => price,
        })
    }

    fn table_price(&self, effective: EffectiveLength, days: u32) -> Result<Decimal, PricingError> {
        let (tier, flat) = match Tier::flat_for(days) {
            Some(tier) => (tier, true),
            None => (Tier::covering(days), false),
        };

        let not_found = PricingError::RateNotFound {
            effective_length: effective,
            tier,
        };
        let bucket = match effective {
            EffectiveLength::Bucket(b) => b,
            EffectiveLength::Oversized(_) => return Err(not_found),
        };

        let tier_price = self
            .rates
            .price(tier, bucket)
            .filter(|p| !p.is_zero())
            .ok_or(not_found)?;

        if flat {
            Ok(tier_price)
        } else {
            let daily_rate = tier_price / Decimal::from(tier.period_days());
            Ok(daily_rate * Decimal::from(days))
        }
    }

    /// Full quote: base price, port taxes, and the VAT-inclusive total.
    pub fn get_final_quote(
        &self,
        length: Decimal,
        beam: Decimal,
        days: u32,
        vessel_type: VesselType,
        stay_type: StayType,
    ) -> Result<Quote, PricingError> {
        let base = self.calculate_base_price(length, days, vessel_type, Some(beam))?;
        let taxes = calculate_taxes(length, beam, days, stay_type, vessel_type);
        let total_taxes = taxes.total();
        let total_with_vat = apply_vat(base + total_taxes);

        tracing::debug!(
            %length, %beam, days, %vessel_type, %stay_type,
            base = %base, t0 = %taxes.t0, t5 = %taxes.t5,
            "Quote computed"
        );

        Ok(Quote {
            base_no_vat: round_money(base, 2),
            t0: taxes.t0,
            t5: taxes.t5,
            taxes: round_money(total_taxes, 2),
            total_with_vat: round_money(total_with_vat, 2),
            currency: CURRENCY,
        })
    }
}

impl Default for RateEngine {
    fn default() -> Self {
        Self::new(RateTable::standard())
    }
}
