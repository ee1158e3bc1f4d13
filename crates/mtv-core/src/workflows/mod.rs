//! # Workflows Module
//!
//! Top-level entry points that tie problem loading, formulation and decoding together.
//!
//! - **Problem Files** ([`problem`]) - TOML problem definitions
//! - **Formulation Workflow** ([`formulate`]) - Problem definition to quadratic program
//! - **Analysis Workflow** ([`analyze`]) - Decoding and ranking of solver output

pub mod analyze;
pub mod formulate;
pub mod problem;
