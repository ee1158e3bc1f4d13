//! # MTV-QUBO Core Library
//!
//! Casts the assignment of linker types to the sites of a multivariate (MTV) porous
//! framework as a quadratic unconstrained binary optimization problem, and decodes solver
//! output back into per-site linker assignments.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Site graphs, the linker catalogue and variable layout,
//!   expression algebra, quadratic programs and file I/O.
//!
//! - **[`engine`]: The Logic Core.** The penalty formulation (composition, balance,
//!   occupancy), solution interpretation and candidate ranking.
//!
//! - **[`presentation`]: Display Mapping.** Colours, legends and histogram series for
//!   rendering decoded results.
//!
//! - **[`workflows`]: The Public API.** End-to-end formulation and analysis of a problem
//!   definition.

pub mod core;
pub mod engine;
pub mod presentation;
pub mod workflows;
