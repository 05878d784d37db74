//! Scoring weights
//!
//! One non-negative weight per named sub-score. Weights are not normalized:
//! the total score is a plain weighted sum, and a sub-score without a weight
//! contributes nothing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

pub const SUBSCORE_COUNT: usize = 10;

/// The ten compatibility factors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Subscore {
    Palette,
    Pattern,
    Silhouette,
    Formality,
    #[serde(alias = "temperature")]
    Climate,
    Style,
    #[serde(alias = "variety")]
    Novelty,
    Consistency,
    SkinSynergy,
    Proportion,
}

impl Subscore {
    pub const ALL: [Subscore; SUBSCORE_COUNT] = [
        Subscore::Palette,
        Subscore::Pattern,
        Subscore::Silhouette,
        Subscore::Formality,
        Subscore::Climate,
        Subscore::Style,
        Subscore::Novelty,
        Subscore::Consistency,
        Subscore::SkinSynergy,
        Subscore::Proportion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subscore::Palette => "palette",
            Subscore::Pattern => "pattern",
            Subscore::Silhouette => "silhouette",
            Subscore::Formality => "formality",
            Subscore::Climate => "climate",
            Subscore::Style => "style",
            Subscore::Novelty => "novelty",
            Subscore::Consistency => "consistency",
            Subscore::SkinSynergy => "skin_synergy",
            Subscore::Proportion => "proportion",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Subscore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subscore {
    type Err = WeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "palette" => Ok(Subscore::Palette),
            "pattern" => Ok(Subscore::Pattern),
            "silhouette" => Ok(Subscore::Silhouette),
            "formality" => Ok(Subscore::Formality),
            "climate" | "temperature" => Ok(Subscore::Climate),
            "style" => Ok(Subscore::Style),
            "novelty" | "variety" => Ok(Subscore::Novelty),
            "consistency" => Ok(Subscore::Consistency),
            "skin_synergy" => Ok(Subscore::SkinSynergy),
            "proportion" => Ok(Subscore::Proportion),
            other => Err(WeightError::UnknownSubscore(other.to_string())),
        }
    }
}

/// Errors raised while building a weight set
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("Unknown sub-score '{0}'")]
    UnknownSubscore(String),

    #[error("Weight for '{name}' must be finite and non-negative, got {value}")]
    InvalidValue { name: String, value: f64 },

    #[error("Sub-score '{subscore}' is weighted more than once ('{first}' and '{second}')")]
    DuplicateSubscore {
        subscore: Subscore,
        first: String,
        second: String,
    },
}

impl From<WeightError> for drape_core::Error {
    fn from(err: WeightError) -> Self {
        drape_core::Error::InvalidWeights(err.to_string())
    }
}

/// Weight per sub-score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ScoringWeights {
    weights: [f64; SUBSCORE_COUNT],
}

impl ScoringWeights {
    /// All weights zero
    pub fn zero() -> Self {
        Self {
            weights: [0.0; SUBSCORE_COUNT],
        }
    }

    /// Build from named weights. Unknown names, negative or non-finite
    /// values, and a sub-score named twice (canonical name plus legacy
    /// alias) are rejected; names that are absent get weight 0.
    pub fn from_map(map: HashMap<String, f64>) -> Result<Self, WeightError> {
        let mut weights = Self::zero();
        let mut named: [Option<String>; SUBSCORE_COUNT] = Default::default();
        for (name, value) in map {
            let subscore = name.parse::<Subscore>()?;
            let slot = &mut named[subscore.index()];
            if let Some(first) = slot.take() {
                // Sort the pair so the error does not depend on map order
                let (first, second) = if first <= name { (first, name) } else { (name, first) };
                return Err(WeightError::DuplicateSubscore {
                    subscore,
                    first,
                    second,
                });
            }
            weights.set(subscore, value)?;
            *slot = Some(name);
        }
        Ok(weights)
    }

    pub fn set(&mut self, subscore: Subscore, value: f64) -> Result<(), WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::InvalidValue {
                name: subscore.as_str().to_string(),
                value,
            });
        }
        self.weights[subscore.index()] = value;
        Ok(())
    }

    /// Builder form of [`ScoringWeights::set`]
    pub fn with(mut self, subscore: Subscore, value: f64) -> Result<Self, WeightError> {
        self.set(subscore, value)?;
        Ok(self)
    }

    #[inline]
    pub fn get(&self, subscore: Subscore) -> f64 {
        self.weights[subscore.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subscore, f64)> + '_ {
        Subscore::ALL.iter().map(move |s| (*s, self.get(*s)))
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

impl Default for ScoringWeights {
    /// The standard ruleset weights
    fn default() -> Self {
        Self {
            weights: [0.22, 0.12, 0.12, 0.14, 0.10, 0.08, 0.05, 0.07, 0.08, 0.10],
        }
    }
}

impl TryFrom<HashMap<String, f64>> for ScoringWeights {
    type Error = WeightError;

    fn try_from(map: HashMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_map(map)
    }
}

impl From<ScoringWeights> for BTreeMap<String, f64> {
    fn from(weights: ScoringWeights) -> Self {
        weights
            .iter()
            .map(|(s, w)| (s.as_str().to_string(), w))
            .collect()
    }
}
