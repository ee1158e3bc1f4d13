pub mod decode;
pub mod formulate;
pub mod rank;
