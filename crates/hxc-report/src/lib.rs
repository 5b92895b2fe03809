//! Console report layer for HXC Stats.
//!
//! Renders metric results as titled, value-sorted text tables and composes
//! them into the by-player, death and by-class report sections, with a JSON
//! alternative for machine consumers.

pub mod report;
pub mod table_view;

pub use hxc_core as core;
pub use hxc_data as data;
