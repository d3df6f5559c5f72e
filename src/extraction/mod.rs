//! Free-text message extraction.
//!
//! Independent of the pricing engine; the automation tool may feed an
//! extracted boat size into a later `/estimate` call.

pub mod fields;
pub mod routes;

pub use fields::{ExtractedFields, Intent, MessageExtractor};
pub use routes::router;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("text is required")]
    MissingText,
}
