//! Shared building blocks for HXC Stats.
//!
//! Holds the error taxonomy, the typed roster model, exact fractions,
//! console formatting helpers and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
