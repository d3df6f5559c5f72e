//! Request DTOs for pricing API endpoints.
//!
//! The automation tool posts loosely typed JSON: numbers may arrive as
//! strings, and a couple of fields have short aliases. Everything is parsed
//! and range-checked here before the engine sees it.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;

use super::models::{StayType, VesselType};

/// Raw estimate request as posted
#[derive(Debug, Default, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub length_m: Option<Value>,
    #[serde(default)]
    pub length: Option<Value>,
    #[serde(default)]
    pub beam_m: Option<Value>,
    #[serde(default)]
    pub beam: Option<Value>,
    #[serde(default)]
    pub days: Option<Value>,
    #[serde(default)]
    pub vessel_type: Option<Value>,
}

/// Rejected estimate input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("bad input")]
    BadInput,

    #[error("length_m out of range")]
    LengthOutOfRange,

    #[error("beam_m out of range")]
    BeamOutOfRange,

    #[error("days out of range")]
    DaysOutOfRange,
}

const LENGTH_RANGE: (Decimal, Decimal) = (dec!(3), dec!(200));
const BEAM_RANGE: (Decimal, Decimal) = (dec!(1), dec!(30));
const DAYS_RANGE: (i64, i64) = (1, 365);

/// Validated quote input, ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteInput {
    pub length: Decimal,
    pub beam: Decimal,
    pub days: u32,
    pub vessel_type: VesselType,
    pub stay_type: StayType,
}

impl EstimateRequest {
    /// Parse from a raw body. Anything that is not a JSON object is treated
    /// as an empty request, which then fails range validation.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Parse every field first, then range-check in field order.
    pub fn validate(self) -> Result<QuoteInput, InputError> {
        let length = parse_decimal(first_present(self.length_m, self.length))?;
        let beam = parse_decimal(first_present(self.beam_m, self.beam))?;
        let days = parse_days(self.days)?;
        let vessel_type = parse_vessel_type(self.vessel_type)?;

        if length < LENGTH_RANGE.0 || length > LENGTH_RANGE.1 {
            return Err(InputError::LengthOutOfRange);
        }
        if beam < BEAM_RANGE.0 || beam > BEAM_RANGE.1 {
            return Err(InputError::BeamOutOfRange);
        }
        if days < DAYS_RANGE.0 || days > DAYS_RANGE.1 {
            return Err(InputError::DaysOutOfRange);
        }

        let days = days as u32;
        Ok(QuoteInput {
            length,
            beam,
            days,
            vessel_type,
            stay_type: StayType::for_days(days),
        })
    }
}

/// Prefer the canonical field, falling back to its alias when the canonical
/// one is absent, null or zero.
fn first_present(primary: Option<Value>, alias: Option<Value>) -> Option<Value> {
    match primary {
        Some(v) if !is_blank(&v) => Some(v),
        _ => alias,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(b) => !b,
        _ => false,
    }
}

fn parse_decimal(value: Option<Value>) -> Result<Decimal, InputError> {
    match value {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(Decimal::from_f64)
            .ok_or(InputError::BadInput),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Some(Value::String(s)) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .map_err(|_| InputError::BadInput)
        }
        Some(_) => Err(InputError::BadInput),
    }
}

fn parse_vessel_type(value: Option<Value>) -> Result<VesselType, InputError> {
    match value {
        None | Some(Value::Null) => Ok(VesselType::Monohull),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(VesselType::Monohull),
        Some(Value::String(s)) => Ok(VesselType::parse(&s)),
        Some(_) => Err(InputError::BadInput),
    }
}

fn parse_days(value: Option<Value>) -> Result<i64, InputError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or(InputError::BadInput),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| InputError::BadInput),
        Some(_) => Err(InputError::BadInput),
    }
}
