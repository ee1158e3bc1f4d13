//! Display-ready mappings of decoded assignments: node colours, legends and histogram bars.

pub mod palette;
