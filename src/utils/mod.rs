//! Utility functions for record processing.
//!
//! - [`record_normalizer`] - Raw record to [`crate::domain::entities::QrCode`] conversion
//! - [`markup`] - Style markup and delimiter cleanup for text fields

pub mod markup;
pub mod record_normalizer;
