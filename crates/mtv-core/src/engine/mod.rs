//! # Engine Module
//!
//! Builds the penalty objective for a linker-assignment problem and turns solver output
//! back into per-site assignments.
//!
//! - **Configuration** ([`config`]) - Input catalogue, targets, lengths and penalty weights
//! - **Formulation** ([`formulation`]) - Composition, balance and occupancy terms
//! - **Interpretation** ([`interpret`]) - Decoding of raw binary vectors
//! - **Ranking** ([`ranking`]) - Probability ordering of candidate ensembles
//! - **Penalty Breakdown** ([`term`]) - Per-term objective contributions
//! - **Error Handling** ([`error`]) - Formulation and decoding errors

pub mod config;
pub mod error;
pub mod formulation;
pub mod interpret;
pub mod ranking;
pub mod term;
