//! License string normalization and trust rating.
//!
//! - [`normalize`] — maps free-form registry license text to a canonical
//!   identifier via an ordered lookup table with a fuzzy fallback.
//! - [`classifier`] — assigns a [`TrustRating`](crate::models::TrustRating)
//!   by keyword containment.

pub mod classifier;
pub mod normalize;
