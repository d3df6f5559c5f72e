//! Berth pricing engine.
//!
//! Quotes marina berth stays from vessel dimensions, stay length and vessel
//! type against an immutable tariff, then adds port taxes and VAT.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{round_money, TaxBreakdown};
pub use models::{EffectiveLength, RateTable, RateTableError, StayType, Tier, VesselType};
pub use routes::router;
pub use services::{PricingError, Quote, RateEngine};
