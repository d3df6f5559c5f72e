//! Field extraction from free-text customer messages.
//!
//! Messages arrive in Spanish, English or French. Intent is decided by
//! keyword lists; boat size, dates and e-mail are captured with regexes.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::pricing::round_money;

/// Meters per foot
const FOOT: Decimal = dec!(0.3048);

/// At most an arrival and a departure date are reported.
const MAX_DATES: usize = 2;

const BOOKING_KEYWORDS: &[&str] = &[
    // es
    "reservar", "reserva", "reservas", "disponibilidad", "quiero amarrar",
    // en
    "book", "booking", "reserve", "reservation", "availability",
    // fr
    "réserver", "reserver", "réservation", "disponibilité",
];

const PRICE_KEYWORDS: &[&str] = &[
    // es
    "precio", "precios", "cuánto", "cuanto", "tarifa", "tarifas", "coste", "costo",
    "presupuesto",
    // en
    "price", "prices", "cost", "how much", "rate", "rates", "quote",
    // fr
    "prix", "tarif", "tarifs", "combien", "coût", "devis",
];

/// What the customer is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    BookingRequest,
    PriceInquiry,
    GeneralInfo,
}

/// Structured fields pulled from one message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedFields {
    pub intent: Intent,
    /// Boat length in meters
    #[serde(with = "rust_decimal::serde::float_option")]
    pub boat_size: Option<Decimal>,
    pub dates: Vec<NaiveDate>,
    pub email: Option<String>,
}

/// Compiled patterns, built once at startup.
#[derive(Debug, Clone)]
pub struct MessageExtractor {
    booking: Regex,
    price: Regex,
    boat_size: Regex,
    date_dmy: Regex,
    date_iso: Regex,
    email: Regex,
}

impl MessageExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            booking: keyword_regex(BOOKING_KEYWORDS)?,
            price: keyword_regex(PRICE_KEYWORDS)?,
            boat_size: Regex::new(
                r"(?i)\b(\d{1,3}(?:[.,]\d{1,2})?)\s*(m|mts?|metros?|meters?|metres?|mètres?|ft|feet|foot|pies|pieds)\b",
            )?,
            date_dmy: Regex::new(r"\b(\d{1,2})[/.-](\d{1,2})[/.-](\d{4})\b")?,
            date_iso: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b")?,
            email: Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b")?,
        })
    }

    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            intent: self.intent(text),
            boat_size: self.boat_size(text),
            dates: self.dates(text),
            email: self.email(text),
        }
    }

    /// Booking keywords win over price keywords.
    pub fn intent(&self, text: &str) -> Intent {
        if self.booking.is_match(text) {
            Intent::BookingRequest
        } else if self.price.is_match(text) {
            Intent::PriceInquiry
        } else {
            Intent::GeneralInfo
        }
    }

    /// First stated length, converted to meters when given in feet.
    pub fn boat_size(&self, text: &str) -> Option<Decimal> {
        let caps = self.boat_size.captures(text)?;
        let value = Decimal::from_str(&caps[1].replace(',', ".")).ok()?;
        let unit = caps[2].to_lowercase();
        let meters = match unit.as_str() {
            "ft" | "feet" | "foot" | "pies" | "pieds" => round_money(value * FOOT, 2),
            _ => value,
        };
        Some(meters)
    }

    /// Calendar-valid dates in order of appearance.
    pub fn dates(&self, text: &str) -> Vec<NaiveDate> {
        let dmy = self.date_dmy.captures_iter(text).filter_map(|c| {
            let date = ymd(&c[3], &c[2], &c[1])?;
            Some((c.get(0)?.start(), date))
        });
        let iso = self.date_iso.captures_iter(text).filter_map(|c| {
            let date = ymd(&c[1], &c[2], &c[3])?;
            Some((c.get(0)?.start(), date))
        });

        let mut found: Vec<(usize, NaiveDate)> = dmy.chain(iso).collect();
        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, d)| d).take(MAX_DATES).collect()
    }

    pub fn email(&self, text: &str) -> Option<String> {
        self.email.find(text).map(|m| m.as_str().to_lowercase())
    }
}

fn keyword_regex(keywords: &[&str]) -> Result<Regex, regex::Error> {
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
