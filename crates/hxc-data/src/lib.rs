//! Data layer for HXC Stats.
//!
//! Responsible for loading roster CSV exports, grouping character records by
//! column and computing the per-player, death and per-class metrics.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use hxc_core as core;
