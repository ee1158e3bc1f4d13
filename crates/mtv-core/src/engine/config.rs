use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_COMPOSITION_WEIGHT: f64 = 200.0;
pub const DEFAULT_OCCUPANCY_WEIGHT: f64 = 300.0;
pub const DEFAULT_BALANCE_WEIGHT: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Scalar multipliers of the three penalty terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyWeights {
    pub composition: f64,
    pub occupancy: f64,
    pub balance: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            composition: DEFAULT_COMPOSITION_WEIGHT,
            occupancy: DEFAULT_OCCUPANCY_WEIGHT,
            balance: DEFAULT_BALANCE_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormulationConfig {
    pub linker_types: Vec<String>,
    pub required_counts: HashMap<String, u64>,
    pub lengths: HashMap<String, f64>,
    pub weights: PenaltyWeights,
}

#[derive(Default)]
pub struct FormulationConfigBuilder {
    linker_types: Option<Vec<String>>,
    required_counts: Option<HashMap<String, u64>>,
    lengths: Option<HashMap<String, f64>>,
    composition_weight: Option<f64>,
    occupancy_weight: Option<f64>,
    balance_weight: Option<f64>,
}

impl FormulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn linker_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.linker_types = Some(types.into_iter().map(Into::into).collect());
        self
    }
    pub fn required_counts(mut self, counts: HashMap<String, u64>) -> Self {
        self.required_counts = Some(counts);
        self
    }
    pub fn lengths(mut self, lengths: HashMap<String, f64>) -> Self {
        self.lengths = Some(lengths);
        self
    }
    pub fn composition_weight(mut self, weight: f64) -> Self {
        self.composition_weight = Some(weight);
        self
    }
    pub fn occupancy_weight(mut self, weight: f64) -> Self {
        self.occupancy_weight = Some(weight);
        self
    }
    pub fn balance_weight(mut self, weight: f64) -> Self {
        self.balance_weight = Some(weight);
        self
    }

    pub fn build(self) -> Result<FormulationConfig, ConfigError> {
        let defaults = PenaltyWeights::default();
        Ok(FormulationConfig {
            linker_types: self
                .linker_types
                .ok_or(ConfigError::MissingParameter("linker_types"))?,
            required_counts: self
                .required_counts
                .ok_or(ConfigError::MissingParameter("required_counts"))?,
            lengths: self
                .lengths
                .ok_or(ConfigError::MissingParameter("lengths"))?,
            weights: PenaltyWeights {
                composition: self.composition_weight.unwrap_or(defaults.composition),
                occupancy: self.occupancy_weight.unwrap_or(defaults.occupancy),
                balance: self.balance_weight.unwrap_or(defaults.balance),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> HashMap<String, u64> {
        HashMap::from([("A".to_string(), 1), ("B".to_string(), 1)])
    }

    fn lengths() -> HashMap<String, f64> {
        HashMap::from([("A".to_string(), 1.0), ("B".to_string(), 2.0)])
    }

    #[test]
    fn build_applies_default_penalty_weights() {
        let config = FormulationConfigBuilder::new()
            .linker_types(["A", "B"])
            .required_counts(counts())
            .lengths(lengths())
            .build()
            .unwrap();
        assert_eq!(config.weights, PenaltyWeights::default());
        assert_eq!(config.weights.composition, 200.0);
        assert_eq!(config.weights.occupancy, 300.0);
        assert_eq!(config.weights.balance, 1.0);
        assert_eq!(config.linker_types, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn build_uses_explicit_weights() {
        let config = FormulationConfigBuilder::new()
            .linker_types(["A", "B"])
            .required_counts(counts())
            .lengths(lengths())
            .composition_weight(10.0)
            .occupancy_weight(20.0)
            .balance_weight(0.0)
            .build()
            .unwrap();
        assert_eq!(
            config.weights,
            PenaltyWeights {
                composition: 10.0,
                occupancy: 20.0,
                balance: 0.0
            }
        );
    }

    #[test]
    fn build_fails_without_linker_types() {
        let result = FormulationConfigBuilder::new()
            .required_counts(counts())
            .lengths(lengths())
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("linker_types")));
    }

    #[test]
    fn build_fails_without_lengths() {
        let result = FormulationConfigBuilder::new()
            .linker_types(["A"])
            .required_counts(counts())
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("lengths")));
    }
}
