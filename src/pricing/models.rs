//! Rate table and request-side pricing types.
//!
//! The rate table is loaded once at startup and shared read-only between
//! request handlers. Everything else here is a small value type parsed at the
//! HTTP boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Tabulated berth-length classes in meters, ascending.
pub const BUCKETS: [u32; 17] = [7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 25, 30, 35];

/// Smallest tabulated bucket; shorter vessels are priced at this class.
pub const MIN_BUCKET: u32 = 7;

/// Largest tabulated bucket; longer vessels fall through to dynamic pricing.
pub const MAX_BUCKET: u32 = 35;

/// Duration-based pricing tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Daily,
    ThreeMonth,
    SixMonth,
    Annual,
}

impl Tier {
    /// Nominal period covered by one tier price, in days.
    pub fn period_days(self) -> u32 {
        match self {
            Tier::Daily => 1,
            Tier::ThreeMonth => 90,
            Tier::SixMonth => 180,
            Tier::Annual => 365,
        }
    }

    /// Tier whose flat price is used as-is for exactly this many days.
    pub fn flat_for(days: u32) -> Option<Tier> {
        match days {
            90 => Some(Tier::ThreeMonth),
            180 => Some(Tier::SixMonth),
            365 => Some(Tier::Annual),
            _ => None,
        }
    }

    /// Smallest tier covering `days`, used to derive a pro-rated daily rate.
    pub fn covering(days: u32) -> Tier {
        if days <= 90 {
            Tier::Daily
        } else if days <= 180 {
            Tier::ThreeMonth
        } else if days <= 365 {
            Tier::SixMonth
        } else {
            Tier::Annual
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Daily => "DAILY",
            Tier::ThreeMonth => "3_MONTHS",
            Tier::SixMonth => "6_MONTHS",
            Tier::Annual => "ANNUAL",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vessel category, resolved once from the free-form request string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VesselType {
    #[default]
    Monohull,
    Catamaran,
    Motorboat,
    /// Anything unrecognized: no catamaran surcharge, never T0-eligible.
    Other,
}

impl VesselType {
    /// Case-insensitive parse; unknown names map to `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "monohull" => VesselType::Monohull,
            "catamaran" => VesselType::Catamaran,
            "motorboat" => VesselType::Motorboat,
            _ => VesselType::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VesselType::Monohull => "monohull",
            VesselType::Catamaran => "catamaran",
            VesselType::Motorboat => "motorboat",
            VesselType::Other => "other",
        }
    }
}

impl From<&str> for VesselType {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for VesselType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stay classification used by the tax rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayType {
    Short,
    Long,
}

impl StayType {
    /// First day count classified as a long stay.
    pub const LONG_STAY_DAYS: u32 = 183;

    pub fn for_days(days: u32) -> Self {
        if days < Self::LONG_STAY_DAYS {
            StayType::Short
        } else {
            StayType::Long
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StayType::Short => "short",
            StayType::Long => "long",
        }
    }
}

impl fmt::Display for StayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of mapping a continuous vessel length onto the rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveLength {
    /// A tabulated berth class.
    Bucket(u32),
    /// Longer than the largest class; carries the raw length.
    Oversized(Decimal),
}

impl EffectiveLength {
    /// Effective length in meters.
    pub fn meters(self) -> Decimal {
        match self {
            EffectiveLength::Bucket(b) => Decimal::from(b),
            EffectiveLength::Oversized(len) => len,
        }
    }
}

/// Errors raised while loading a rate table from disk
#[derive(Debug, thiserror::Error)]
pub enum RateTableError {
    #[error("Failed to read rate table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rate table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Tier {tier} has unknown bucket {bucket}")]
    UnknownBucket { tier: Tier, bucket: u32 },

    #[error("Tier {tier} has negative price for bucket {bucket}")]
    NegativePrice { tier: Tier, bucket: u32 },
}

/// Immutable berth tariff, prices excluding VAT.
///
/// Daily prices are per day; every other tier holds the price for its whole
/// period.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateTable {
    #[serde(rename = "DAILY")]
    daily: BTreeMap<u32, Decimal>,
    #[serde(rename = "3_MONTHS")]
    three_month: BTreeMap<u32, Decimal>,
    #[serde(rename = "6_MONTHS")]
    six_month: BTreeMap<u32, Decimal>,
    #[serde(rename = "ANNUAL")]
    annual: BTreeMap<u32, Decimal>,
}

impl RateTable {
    /// Build a table from per-tier bucket prices, rejecting invalid entries.
    pub fn new(
        daily: BTreeMap<u32, Decimal>,
        three_month: BTreeMap<u32, Decimal>,
        six_month: BTreeMap<u32, Decimal>,
        annual: BTreeMap<u32, Decimal>,
    ) -> Result<Self, RateTableError> {
        let table = Self {
            daily,
            three_month,
            six_month,
            annual,
        };
        table.validate()?;
        Ok(table)
    }

    /// The marina's published tariff.
    pub fn standard() -> Self {
        let rows: [(u32, Decimal, Decimal, Decimal, Decimal); 17] = [
            (7, dec!(8.18), dec!(681.82), dec!(1239.67), dec!(2272.73)),
            (8, dec!(9.26), dec!(739.67), dec!(1392.56), dec!(2493.39)),
            (9, dec!(10.33), dec!(805.75), dec!(1487.60), dec!(2561.98)),
            (10, dec!(13.22), dec!(929.75), dec!(1776.86), dec!(3016.53)),
            (11, dec!(15.29), dec!(1117.36), dec!(2045.45), dec!(3574.38)),
            (12, dec!(16.94), dec!(1301.65), dec!(2396.69), dec!(4132.23)),
            (13, dec!(18.79), dec!(1383.50), dec!(2520.66), dec!(4561.98)),
            (14, dec!(20.47), dec!(1512.40), dec!(2735.54), dec!(4851.24)),
            (15, dec!(26.05), dec!(1652.89), dec!(3123.97), dec!(5454.55)),
            (16, dec!(28.10), dec!(1776.69), dec!(3264.46), dec!(5892.56)),
            (17, dec!(30.39), dec!(1921.49), dec!(3636.36), dec!(6257.02)),
            (18, dec!(32.23), dec!(2066.12), dec!(3933.88), dec!(6735.54)),
            (19, dec!(33.50), dec!(2290.91), dec!(4132.23), dec!(7272.73)),
            (20, dec!(36.36), dec!(2602.48), dec!(4934.71), dec!(8483.47)),
            (25, dec!(48.76), dec!(3314.05), dec!(6297.52), dec!(11322.31)),
            (30, dec!(58.68), dec!(4545.45), dec!(8437.19), dec!(14235.54)),
            (35, dec!(71.07), dec!(5371.90), dec!(9722.31), dec!(16528.93)),
        ];

        Self {
            daily: rows.iter().map(|r| (r.0, r.1)).collect(),
            three_month: rows.iter().map(|r| (r.0, r.2)).collect(),
            six_month: rows.iter().map(|r| (r.0, r.3)).collect(),
            annual: rows.iter().map(|r| (r.0, r.4)).collect(),
        }
    }

    /// Parse a JSON tariff keyed by `DAILY`, `3_MONTHS`, `6_MONTHS`, `ANNUAL`.
    pub fn from_json(json: &str) -> Result<Self, RateTableError> {
        let table: RateTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a JSON tariff from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RateTableError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Price for a bucket in a tier, if tabulated.
    pub fn price(&self, tier: Tier, bucket: u32) -> Option<Decimal> {
        self.tier(tier).get(&bucket).copied()
    }

    fn tier(&self, tier: Tier) -> &BTreeMap<u32, Decimal> {
        match tier {
            Tier::Daily => &self.daily,
            Tier::ThreeMonth => &self.three_month,
            Tier::SixMonth => &self.six_month,
            Tier::Annual => &self.annual,
        }
    }

    fn validate(&self) -> Result<(), RateTableError> {
        for tier in [Tier::Daily, Tier::ThreeMonth, Tier::SixMonth, Tier::Annual] {
            for (&bucket, price) in self.tier(tier) {
                if !BUCKETS.contains(&bucket) {
                    return Err(RateTableError::UnknownBucket { tier, bucket });
                }
                if *price < Decimal::ZERO {
                    return Err(RateTableError::NegativePrice { tier, bucket });
                }
            }
        }
        Ok(())
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}
