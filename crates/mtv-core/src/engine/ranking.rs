use super::error::DecodingError;
use super::interpret::{self, Assignment};
use crate::core::linkers::LinkerCatalogue;
use crate::core::solution::Candidate;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedConfiguration {
    pub assignment: Assignment,
    pub probability: f64,
    pub bits: Vec<u8>,
}

/// Decodes every candidate and orders them by probability, highest first.
///
/// The sort is stable, so candidates with equal probability keep their input order.
/// Nothing is normalized, filtered or merged: two raw vectors that decode to the same
/// assignment remain two entries.
///
/// # Errors
///
/// * [`DecodingError::InvalidProbability`] if a probability is negative or NaN.
/// * [`DecodingError::LengthMismatch`] if a candidate vector has the wrong length.
pub fn rank(
    ensemble: &[Candidate],
    site_count: usize,
    catalogue: &LinkerCatalogue,
) -> Result<Vec<RankedConfiguration>, DecodingError> {
    let mut ranked = ensemble
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            if candidate.probability.is_nan() || candidate.probability < 0.0 {
                return Err(DecodingError::InvalidProbability {
                    index,
                    value: candidate.probability,
                });
            }
            Ok(RankedConfiguration {
                assignment: interpret::interpret(&candidate.bits, site_count, catalogue)?,
                probability: candidate.probability,
                bits: candidate.bits.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // NaN is rejected above, so `partial_cmp` is total here and `-0.0` ties with `0.0`.
    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    debug!(candidates = ranked.len(), "Ranked candidate ensemble.");
    Ok(ranked)
}
