//! Filter module for nps.
//!
//! Provides fuzzy matching and filtering for picker choices.

mod fuzzy;

pub use fuzzy::{filter_choices, get_match_indices};
