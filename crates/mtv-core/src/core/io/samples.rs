use crate::core::solution::{Candidate, InvalidBit, parse_bitstring};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleLoadError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid bitstring in record {record} of '{path}': {source}")]
    Bits {
        path: String,
        record: usize,
        source: InvalidBit,
    },
}

#[derive(Debug, Deserialize)]
struct SampleRecord {
    bitstring: String,
    probability: f64,
}

/// Reads a solver ensemble from CSV with a `bitstring,probability` header.
pub fn load_samples(path: &Path) -> Result<Vec<Candidate>, SampleLoadError> {
    let label = path.to_string_lossy().to_string();
    let reader = csv::Reader::from_path(path).map_err(|e| SampleLoadError::Csv {
        path: label.clone(),
        source: e,
    })?;
    read_records(reader, &label)
}

fn read_records<R: Read>(
    mut reader: csv::Reader<R>,
    label: &str,
) -> Result<Vec<Candidate>, SampleLoadError> {
    let mut candidates = Vec::new();
    for (record, result) in reader.deserialize::<SampleRecord>().enumerate() {
        let row = result.map_err(|e| SampleLoadError::Csv {
            path: label.to_string(),
            source: e,
        })?;
        let bits = parse_bitstring(&row.bitstring).map_err(|e| SampleLoadError::Bits {
            path: label.to_string(),
            record,
            source: e,
        })?;
        candidates.push(Candidate::new(bits, row.probability));
    }
    Ok(candidates)
}
