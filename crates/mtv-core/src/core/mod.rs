//! # Core Module
//!
//! Stateless building blocks for the linker-assignment QUBO: the site graph supplied by
//! the caller, the ordered linker catalogue together with the variable layout shared by
//! formulation and decoding, the expression algebra the objective is assembled from, and
//! the quadratic program handed to solvers.
//!
//! - **Site Graph** ([`graph`]) - Sites as a dense index range with weighted edges
//! - **Linkers** ([`linkers`]) - Ordered linker catalogue and the flat variable layout
//! - **Expressions** ([`expression`]) - Linear and quadratic expressions over binary variables
//! - **Programs** ([`program`]) - Binary quadratic programs and their evaluation
//! - **Solutions** ([`solution`]) - Solver candidates and bitstring parsing
//! - **File I/O** ([`io`]) - CSV sample ensembles and LP-format export

pub mod expression;
pub mod graph;
pub mod io;
pub mod linkers;
pub mod program;
pub mod solution;
