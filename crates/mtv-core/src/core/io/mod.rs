pub mod lp;
pub mod samples;
