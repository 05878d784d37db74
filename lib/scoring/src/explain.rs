//! Explainability for outfit scores
//!
//! Breaks a [`ScoreCard`] down into per-factor weighted contributions so a
//! caller can show which factors carried or dragged an outfit.

use crate::engine::ScoreCard;
use crate::weights::{ScoringWeights, Subscore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One factor's part in the total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Unweighted sub-score
    pub raw: f64,
    pub weight: f64,
    /// raw * weight
    pub weighted: f64,
}

/// Per-factor breakdown of a score card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub contributions: BTreeMap<Subscore, Contribution>,
    /// Factor with the largest weighted contribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_contributor: Option<Subscore>,
    /// Factor that lost the most weight relative to a perfect 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest: Option<Subscore>,
    pub explanations: Vec<String>,
}

impl ScoreBreakdown {
    pub fn from_card(card: &ScoreCard, weights: &ScoringWeights) -> Self {
        let contributions: BTreeMap<Subscore, Contribution> = card
            .subscores
            .iter()
            .map(|(subscore, raw)| {
                let weight = weights.get(*subscore);
                (
                    *subscore,
                    Contribution {
                        raw: *raw,
                        weight,
                        weighted: raw * weight,
                    },
                )
            })
            .collect();

        // Ties resolve to the first factor in Subscore order
        let top_contributor = contributions
            .iter()
            .filter(|(_, c)| c.weighted > 0.0)
            .fold(None::<(Subscore, f64)>, |best, (s, c)| match best {
                Some((_, w)) if w >= c.weighted => best,
                _ => Some((*s, c.weighted)),
            })
            .map(|(s, _)| s);

        let weakest = contributions
            .iter()
            .map(|(s, c)| (*s, (1.0 - c.raw).max(0.0) * c.weight))
            .filter(|(_, loss)| *loss > 0.0)
            .fold(None::<(Subscore, f64)>, |worst, (s, loss)| match worst {
                Some((_, l)) if l >= loss => worst,
                _ => Some((s, loss)),
            })
            .map(|(s, _)| s);

        Self {
            total: card.total,
            contributions,
            top_contributor,
            weakest,
            explanations: card.explanations.clone(),
        }
    }

    pub fn contribution(&self, subscore: Subscore) -> Option<&Contribution> {
        self.contributions.get(&subscore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(values: &[(Subscore, f64)]) -> ScoreCard {
        let subscores: BTreeMap<Subscore, f64> = Subscore::ALL
            .iter()
            .map(|s| {
                let v = values.iter().find(|(k, _)| k == s).map(|(_, v)| *v).unwrap_or(1.0);
                (*s, v)
            })
            .collect();
        ScoreCard {
            total: 0.0,
            subscores,
            explanations: vec!["note".to_string()],
        }
    }

    #[test]
    fn test_breakdown_contributions() {
        let weights = ScoringWeights::default();
        let breakdown = ScoreBreakdown::from_card(&card(&[(Subscore::Pattern, 0.5)]), &weights);

        assert_eq!(breakdown.contributions.len(), 10);
        let pattern = breakdown.contribution(Subscore::Pattern).unwrap();
        assert_eq!(pattern.raw, 0.5);
        assert_eq!(pattern.weight, 0.12);
        assert!((pattern.weighted - 0.06).abs() < 1e-12);
        assert_eq!(breakdown.explanations, vec!["note".to_string()]);
    }

    #[test]
    fn test_top_and_weakest() {
        let weights = ScoringWeights::default();
        let breakdown = ScoreBreakdown::from_card(&card(&[(Subscore::Formality, 0.5)]), &weights);

        assert_eq!(breakdown.top_contributor, Some(Subscore::Palette));
        assert_eq!(breakdown.weakest, Some(Subscore::Formality));
    }

    #[test]
    fn test_zero_weights_have_no_top() {
        let breakdown = ScoreBreakdown::from_card(&card(&[]), &ScoringWeights::zero());
        assert_eq!(breakdown.top_contributor, None);
        assert_eq!(breakdown.weakest, None);

        let json = serde_json::to_value(&breakdown).unwrap();
        assert!(json.get("top_contributor").is_none());
        assert!(json["contributions"]["palette"]["raw"].is_number());
    }
}
