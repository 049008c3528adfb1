//! Cleaning and aggregation pipeline for real-estate listings
//!
//! Five ordered stages, each a pure function of its input plus fixed
//! configuration: dedup, normalize, region join, validity filters,
//! aggregation. `run::run` wires them into a single streaming pass.

pub mod aggregate;
pub mod dedup;
pub mod filter;
pub mod normalize;
pub mod parse;
pub mod regions;
pub mod run;
pub mod types;
pub mod write;

pub use types::*;
