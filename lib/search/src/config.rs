//! Engine configuration

use crate::beam::BeamConfig;
use drape_core::{slot, ClimateBand, Error, Result};
use drape_scoring::ScoringWeights;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RULESET_VERSION: &str = "ruleset-2025-06";

/// Tunables for recommendation. Every field has a default, so a partial
/// JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Recorded on each recommendation and mixed into its seed
    pub ruleset_version: String,
    pub weights: ScoringWeights,
    pub beam: BeamConfig,
    /// Slots whose colors sit close to the face
    pub near_face_slots: Vec<String>,
    /// Max candidates fetched per slot and scope
    pub candidate_limit: usize,
    pub default_climate_band: ClimateBand,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ruleset_version: DEFAULT_RULESET_VERSION.to_string(),
            weights: ScoringWeights::default(),
            beam: BeamConfig::default(),
            near_face_slots: [slot::TOP, slot::ONE_PIECE, slot::NECKWEAR, slot::SCARF, slot::HAT]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            candidate_limit: 50,
            default_climate_band: ClimateBand::Warm,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.beam.validate()?;
        if self.candidate_limit == 0 {
            return Err(Error::InvalidInput(
                "candidate_limit must be at least 1".to_string(),
            ));
        }
        if self.ruleset_version.trim().is_empty() {
            return Err(Error::InvalidInput("ruleset_version is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::TieBreak;
    use drape_scoring::Subscore;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.ruleset_version, "ruleset-2025-06");
        assert_eq!(config.beam.beam_width, 20);
        assert_eq!(config.beam.max_candidates_per_slot, 10);
        assert_eq!(config.candidate_limit, 50);
        assert_eq!(config.default_climate_band, ClimateBand::Warm);
        assert_eq!(config.near_face_slots.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = EngineConfig::from_json_str(
            r#"{
                "beam": {"beam_width": 5, "tie_break": "seeded"},
                "weights": {"palette": 0.5},
                "default_climate_band": "cold"
            }"#,
        )
        .unwrap();

        assert_eq!(config.beam.beam_width, 5);
        assert_eq!(config.beam.max_candidates_per_slot, 10);
        assert_eq!(config.beam.tie_break, TieBreak::Seeded);
        assert_eq!(config.weights.get(Subscore::Palette), 0.5);
        assert_eq!(config.default_climate_band, ClimateBand::Cold);
        assert_eq!(config.candidate_limit, 50);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(EngineConfig::from_json_str(r#"{"candidate_limit": 0}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"beam": {"beam_width": 0}}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"weights": {"sparkle": 1.0}}"#).is_err());
        assert!(EngineConfig::from_json_str("not json").is_err());
    }
}
