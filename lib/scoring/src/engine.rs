//! Outfit scorer
//!
//! Combines the per-factor functions into a weighted total with named
//! sub-scores and human-readable explanations.

use crate::factors;
use crate::weights::{ScoringWeights, Subscore, WeightError};
use drape_core::{AccessoryMode, AppearanceSignature, BodySignature, ClimateBand, ItemAttributes};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Everything besides the items themselves that a score depends on
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub target_formality: u8,
    pub climate_band: ClimateBand,
    pub profile_style_tags: &'a [String],
    /// Item ids worn recently
    pub recently_worn: &'a [String],
    pub accessory_mode: AccessoryMode,
    pub appearance: Option<&'a AppearanceSignature>,
    pub body: Option<&'a BodySignature>,
    pub near_face_slots: &'a [String],
}

impl<'a> ScoringContext<'a> {
    /// Context with no profile data: no style tags, no history, no signatures
    pub fn new(target_formality: u8, climate_band: ClimateBand) -> Self {
        Self {
            target_formality,
            climate_band,
            profile_style_tags: &[],
            recently_worn: &[],
            accessory_mode: AccessoryMode::Off,
            appearance: None,
            body: None,
            near_face_slots: &[],
        }
    }

    #[must_use]
    pub fn with_accessory_mode(mut self, mode: AccessoryMode) -> Self {
        self.accessory_mode = mode;
        self
    }

    #[must_use]
    pub fn with_style_tags(mut self, tags: &'a [String]) -> Self {
        self.profile_style_tags = tags;
        self
    }

    #[must_use]
    pub fn with_recently_worn(mut self, item_ids: &'a [String]) -> Self {
        self.recently_worn = item_ids;
        self
    }

    #[must_use]
    pub fn with_appearance(mut self, appearance: Option<&'a AppearanceSignature>) -> Self {
        self.appearance = appearance;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Option<&'a BodySignature>) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_near_face_slots(mut self, slots: &'a [String]) -> Self {
        self.near_face_slots = slots;
        self
    }
}

/// Result of scoring one item set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Unnormalized weighted sum of the sub-scores
    pub total: f64,
    /// Raw (unweighted) value of every sub-score
    pub subscores: BTreeMap<Subscore, f64>,
    /// Skin-synergy explanations first, then proportion ones
    pub explanations: Vec<String>,
}

impl ScoreCard {
    #[inline]
    pub fn get(&self, subscore: Subscore) -> f64 {
        self.subscores.get(&subscore).copied().unwrap_or(0.0)
    }
}

/// Weighted multi-factor scorer
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score an item set from scratch
    pub fn score(&self, items: &[&ItemAttributes], ctx: &ScoringContext<'_>) -> ScoreCard {
        let (skin, mut explanations) =
            factors::skin_synergy(items, ctx.appearance, ctx.near_face_slots);
        let (proportion, proportion_explanations) = factors::proportion_fit(items, ctx.body);
        explanations.extend(proportion_explanations);

        let subscores = BTreeMap::from([
            (Subscore::Palette, factors::palette_harmony(items)),
            (Subscore::Pattern, factors::pattern_mix(items)),
            (Subscore::Silhouette, factors::silhouette_balance(items)),
            (
                Subscore::Formality,
                factors::formality_closeness(items, ctx.target_formality),
            ),
            (Subscore::Climate, factors::climate_fit(items, ctx.climate_band)),
            (
                Subscore::Style,
                factors::style_tag_match(items, ctx.profile_style_tags),
            ),
            (Subscore::Novelty, factors::novelty(items, ctx.recently_worn)),
            (
                Subscore::Consistency,
                factors::accessory_consistency(items, ctx.accessory_mode),
            ),
            (Subscore::SkinSynergy, skin),
            (Subscore::Proportion, proportion),
        ]);

        // Summed in Subscore order so totals are reproducible bit for bit
        let total = subscores
            .iter()
            .map(|(subscore, value)| value * self.weights.get(*subscore))
            .sum();

        ScoreCard {
            total,
            subscores,
            explanations,
        }
    }

    /// A copy of this scorer with some weights replaced.
    ///
    /// Unlike a normalizing schema, the remaining weights are left untouched
    /// and unknown names are an error.
    pub fn with_weights(&self, overrides: &HashMap<String, f64>) -> Result<Scorer, WeightError> {
        let mut weights = self.weights.clone();
        for (name, value) in overrides {
            weights.set(name.parse()?, *value)?;
        }
        Ok(Scorer::new(weights))
    }
}
