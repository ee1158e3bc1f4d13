use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("Invalid character '{found}' at position {position} of bitstring; expected '0' or '1'")]
pub struct InvalidBit {
    pub position: usize,
    pub found: char,
}

/// One member of a solver's output ensemble: a raw binary vector and its reported probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub bits: Vec<u8>,
    pub probability: f64,
}

impl Candidate {
    pub fn new(bits: Vec<u8>, probability: f64) -> Self {
        Self { bits, probability }
    }
}

/// Parses a string such as `"1001"` into a binary vector, first character first.
pub fn parse_bitstring(s: &str) -> Result<Vec<u8>, InvalidBit> {
    s.trim()
        .chars()
        .enumerate()
        .map(|(position, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            found => Err(InvalidBit { position, found }),
        })
        .collect()
}

pub fn format_bitstring(bits: &[u8]) -> String {
    bits.iter().map(|&b| if b == 1 { '1' } else { '0' }).collect()
}
