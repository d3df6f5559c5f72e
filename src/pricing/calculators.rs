//! Core pricing calculation functions.
//!
//! Pure functions for berth pricing math - no table ownership, no I/O.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::{EffectiveLength, StayType, VesselType, BUCKETS, MIN_BUCKET};

/// Surcharge applied to catamaran base prices.
pub const CATAMARAN_MULTIPLIER: Decimal = dec!(1.7);

/// Spanish VAT (21%) as a multiplier.
pub const VAT_MULTIPLIER: Decimal = dec!(1.21);

/// T0 per square meter per day, short stays.
pub const T0_SHORT_RATE: Decimal = dec!(0.0250);
/// T0 per square meter for the whole stay, long stays.
pub const T0_LONG_FLAT: Decimal = dec!(9.12);

/// T5 per square meter per day below 12 m, short stays.
pub const T5_SMALL_SHORT_RATE: Decimal = dec!(0.186);
/// T5 per square meter per day below 12 m, long stays.
pub const T5_SMALL_LONG_RATE: Decimal = dec!(0.124);
/// T5 per square meter per day from 12 m, short stays.
pub const T5_LARGE_SHORT_RATE: Decimal = dec!(0.0397);
/// T5 per square meter per day from 12 m, long stays.
pub const T5_LARGE_LONG_RATE: Decimal = dec!(0.0397);

// T0 eligibility and T5 rate thresholds, meters
const SAIL_T0_MIN_LENGTH: Decimal = dec!(12);
const MOTOR_T0_MIN_LENGTH: Decimal = dec!(9);
const T5_LARGE_MIN_LENGTH: Decimal = dec!(12);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use marina_quote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(171.504), 2), dec!(171.50));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Map a vessel length onto a berth class.
///
/// Lengths strictly inside (20, 25) and (30, 35) are forced up to the next
/// class. Otherwise the smallest class at or above the rounded-up length is
/// used; anything beyond the largest class is returned as `Oversized` with
/// the raw length.
pub fn resolve_effective_length(length: Decimal) -> EffectiveLength {
    if length > dec!(20) && length < dec!(25) {
        return EffectiveLength::Bucket(25);
    }
    if length > dec!(30) && length < dec!(35) {
        return EffectiveLength::Bucket(35);
    }

    let ceiling = length.ceil();
    match BUCKETS.iter().find(|&&b| Decimal::from(b) >= ceiling) {
        Some(&bucket) => EffectiveLength::Bucket(bucket),
        None => EffectiveLength::Oversized(length.max(Decimal::from(MIN_BUCKET))),
    }
}

/// Share of `length * beam` charged per day for oversized vessels.
pub fn fixed_percentage(days: u32) -> Decimal {
    if days <= 90 {
        dec!(0.36)
    } else if days <= 180 {
        dec!(0.29)
    } else if days <= 365 {
        dec!(0.26)
    } else {
        dec!(0.25)
    }
}

/// Percentage-of-value price for vessels above the largest berth class.
pub fn dynamic_price(effective_length: Decimal, beam: Decimal, days: u32) -> Decimal {
    fixed_percentage(days) * effective_length * beam * Decimal::from(days)
}

/// Port tax components, each rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
    /// Occupancy tax; zero for non-qualifying vessels.
    pub t0: Decimal,
    /// General mooring tax.
    pub t5: Decimal,
}

impl TaxBreakdown {
    pub fn total(&self) -> Decimal {
        self.t0 + self.t5
    }
}

/// Whether the occupancy tax applies to this vessel.
pub fn t0_applies(length: Decimal, vessel_type: VesselType) -> bool {
    match vessel_type {
        VesselType::Monohull | VesselType::Catamaran => length >= SAIL_T0_MIN_LENGTH,
        VesselType::Motorboat => length >= MOTOR_T0_MIN_LENGTH,
        VesselType::Other => false,
    }
}

/// Compute T0 and T5 for a stay.
///
/// The long-stay T0 is a flat per-stay charge independent of `days`, and from
/// 12 m T5 uses the same rate for both stay types.
pub fn calculate_taxes(
    length: Decimal,
    beam: Decimal,
    days: u32,
    stay_type: StayType,
    vessel_type: VesselType,
) -> TaxBreakdown {
    let area = length * beam;
    let days = Decimal::from(days);

    let t0 = if t0_applies(length, vessel_type) {
        match stay_type {
            StayType::Short => area * days * T0_SHORT_RATE,
            StayType::Long => area * T0_LONG_FLAT,
        }
    } else {
        Decimal::ZERO
    };

    let t5_rate = if length < T5_LARGE_MIN_LENGTH {
        match stay_type {
            StayType::Short => T5_SMALL_SHORT_RATE,
            StayType::Long => T5_SMALL_LONG_RATE,
        }
    } else {
        match stay_type {
            StayType::Short => T5_LARGE_SHORT_RATE,
            StayType::Long => T5_LARGE_LONG_RATE,
        }
    };
    let t5 = area * days * t5_rate;

    TaxBreakdown {
        t0: round_money(t0, 2),
        t5: round_money(t5, 2),
    }
}

/// Apply VAT to a pre-tax total.
pub fn apply_vat(total_no_vat: Decimal) -> Decimal {
    total_no_vat * VAT_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.125), 2), dec!(2.12));
        assert_eq!(round_money(dec!(2.135), 2), dec!(2.14));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(171.504), 2), dec!(171.50));
        assert_eq!(round_money(dec!(1913.1915), 2), dec!(1913.19));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
    }

    // ==================== resolve_effective_length tests ====================

    #[test]
    fn test_resolve_override_bands() {
        for len in [dec!(20.01), dec!(21), dec!(22.5), dec!(24), dec!(24.99)] {
            assert_eq!(resolve_effective_length(len), EffectiveLength::Bucket(25), "{}", len);
        }
        for len in [dec!(30.01), dec!(31), dec!(33.3), dec!(34.99)] {
            assert_eq!(resolve_effective_length(len), EffectiveLength::Bucket(35), "{}", len);
        }
    }

    #[test]
    fn test_resolve_band_edges_use_ceiling_lookup() {
        assert_eq!(resolve_effective_length(dec!(20)), EffectiveLength::Bucket(20));
        assert_eq!(resolve_effective_length(dec!(25)), EffectiveLength::Bucket(25));
        assert_eq!(resolve_effective_length(dec!(25.5)), EffectiveLength::Bucket(30));
        assert_eq!(resolve_effective_length(dec!(30)), EffectiveLength::Bucket(30));
        assert_eq!(resolve_effective_length(dec!(35)), EffectiveLength::Bucket(35));
    }

    #[test]
    fn test_resolve_rounds_up_to_next_bucket() {
        assert_eq!(resolve_effective_length(dec!(12)), EffectiveLength::Bucket(12));
        assert_eq!(resolve_effective_length(dec!(12.1)), EffectiveLength::Bucket(13));
        assert_eq!(resolve_effective_length(dec!(19.5)), EffectiveLength::Bucket(20));
    }

    #[test]
    fn test_resolve_floors_short_vessels() {
        assert_eq!(resolve_effective_length(dec!(5)), EffectiveLength::Bucket(7));
        assert_eq!(resolve_effective_length(dec!(3)), EffectiveLength::Bucket(7));
        assert_eq!(resolve_effective_length(dec!(6.2)), EffectiveLength::Bucket(7));
    }

    #[test]
    fn test_resolve_oversized_passes_raw_length() {
        assert_eq!(resolve_effective_length(dec!(40)), EffectiveLength::Oversized(dec!(40)));
        assert_eq!(
            resolve_effective_length(dec!(35.2)),
            EffectiveLength::Oversized(dec!(35.2))
        );
        assert_eq!(resolve_effective_length(dec!(35.2)).meters(), dec!(35.2));
    }

    // ==================== fixed_percentage tests ====================

    #[test]
    fn test_fixed_percentage_steps() {
        assert_eq!(fixed_percentage(1), dec!(0.36));
        assert_eq!(fixed_percentage(90), dec!(0.36));
        assert_eq!(fixed_percentage(91), dec!(0.29));
        assert_eq!(fixed_percentage(180), dec!(0.29));
        assert_eq!(fixed_percentage(181), dec!(0.26));
        assert_eq!(fixed_percentage(365), dec!(0.26));
        assert_eq!(fixed_percentage(366), dec!(0.25));
    }

    #[test]
    fn test_dynamic_price() {
        assert_eq!(dynamic_price(dec!(40), dec!(8), 30), dec!(3456.00));
        assert_eq!(dynamic_price(dec!(50), dec!(10), 365), dec!(47450.00));
    }

    // ==================== calculate_taxes tests ====================

    #[test]
    fn test_taxes_large_monohull_short_stay() {
        let taxes = calculate_taxes(dec!(12), dec!(4), 90, StayType::Short, VesselType::Monohull);
        assert_eq!(taxes.t0, dec!(108.00));
        assert_eq!(taxes.t5, dec!(171.50));
        assert_eq!(taxes.total(), dec!(279.50));
    }

    #[test]
    fn test_taxes_small_vessel_has_no_t0() {
        let taxes = calculate_taxes(dec!(5), dec!(2), 10, StayType::Short, VesselType::Monohull);
        assert_eq!(taxes.t0, Decimal::ZERO);
        assert_eq!(taxes.t5, dec!(18.60));
    }

    #[test]
    fn test_t0_eligibility_thresholds() {
        assert!(!t0_applies(dec!(11.99), VesselType::Monohull));
        assert!(t0_applies(dec!(12), VesselType::Monohull));
        assert!(!t0_applies(dec!(11.5), VesselType::Catamaran));
        assert!(t0_applies(dec!(12), VesselType::Catamaran));
        assert!(!t0_applies(dec!(8.9), VesselType::Motorboat));
        assert!(t0_applies(dec!(9), VesselType::Motorboat));
        assert!(!t0_applies(dec!(50), VesselType::Other));
    }

    #[test]
    fn test_motorboat_t0_between_nine_and_twelve_meters() {
        let taxes = calculate_taxes(dec!(10), dec!(3), 20, StayType::Short, VesselType::Motorboat);
        // 10 * 3 * 20 * 0.025
        assert_eq!(taxes.t0, dec!(15.00));
        // 10 * 3 * 20 * 0.186
        assert_eq!(taxes.t5, dec!(111.60));
    }

    #[test]
    fn test_long_stay_t0_is_flat_per_stay() {
        let short_run = calculate_taxes(dec!(15), dec!(5), 200, StayType::Long, VesselType::Monohull);
        let long_run = calculate_taxes(dec!(15), dec!(5), 365, StayType::Long, VesselType::Monohull);
        // 15 * 5 * 9.12
        assert_eq!(short_run.t0, dec!(684.00));
        assert_eq!(long_run.t0, dec!(684.00));
    }

    #[test]
    fn test_t5_ignores_stay_type_from_twelve_meters() {
        let short = calculate_taxes(dec!(14), dec!(4), 100, StayType::Short, VesselType::Other);
        let long = calculate_taxes(dec!(14), dec!(4), 100, StayType::Long, VesselType::Other);
        assert_eq!(short.t5, long.t5);
        // 14 * 4 * 100 * 0.0397
        assert_eq!(short.t5, dec!(222.32));
    }

    #[test]
    fn test_t5_small_vessel_long_stay_rate() {
        let taxes = calculate_taxes(dec!(8), dec!(3), 200, StayType::Long, VesselType::Monohull);
        // 8 * 3 * 200 * 0.124
        assert_eq!(taxes.t5, dec!(595.20));
        assert_eq!(taxes.t0, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_vessel_never_pays_t0() {
        for stay in [StayType::Short, StayType::Long] {
            let taxes = calculate_taxes(dec!(30), dec!(8), 200, stay, VesselType::Other);
            assert_eq!(taxes.t0, Decimal::ZERO);
        }
    }

    #[test]
    fn test_apply_vat() {
        assert_eq!(apply_vat(dec!(100)), dec!(121.00));
        assert_eq!(round_money(apply_vat(dec!(1581.15)), 2), dec!(1913.19));
    }
}
