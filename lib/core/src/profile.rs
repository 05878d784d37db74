//! Wearer descriptors: appearance and body signatures, and the user profile
//! the recommender reads them from.

use crate::color::ColorLch;
use crate::item::FORMALITY_MIN;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    Warm,
    Cool,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SynergyStyle {
    Contrast,
    Harmonize,
    Auto,
}

/// Wearer coloring. All fields are optional; without a skin color the
/// skin-synergy factor is disabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppearanceSignature {
    #[serde(default, alias = "skin_lch", skip_serializing_if = "Option::is_none")]
    pub skin: Option<ColorLch>,
    #[serde(default, alias = "hair_lch", skip_serializing_if = "Option::is_none")]
    pub hair: Option<ColorLch>,
    #[serde(default, alias = "eye_lch", skip_serializing_if = "Option::is_none")]
    pub eye: Option<ColorLch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undertone: Option<Undertone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synergy_style: Option<SynergyStyle>,
}

impl AppearanceSignature {
    pub fn with_skin(skin: ColorLch) -> Self {
        Self {
            skin: Some(skin),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HeightClass {
    Petite,
    Average,
    Tall,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TorsoLegRatio {
    LongTorso,
    Balanced,
    LongLegs,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShoulderToHipRatio {
    BroadShoulders,
    Balanced,
    BroadHips,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WaistDefinition {
    Defined,
    Straight,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FitPreference {
    Slim,
    Regular,
    Relaxed,
}

/// Wearer proportions. Absent entirely, proportion scoring is disabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BodySignature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_class: Option<HeightClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torso_leg_ratio: Option<TorsoLegRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder_to_hip_ratio: Option<ShoulderToHipRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_definition: Option<WaistDefinition>,
    #[serde(default, alias = "fit_pref", skip_serializing_if = "Option::is_none")]
    pub fit_preference: Option<FitPreference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Everything the recommender needs to know about a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default = "default_baseline_formality", alias = "baseline_dressiness")]
    pub baseline_formality: u8,
    #[serde(default = "default_occasion")]
    pub default_occasion: String,
    #[serde(default)]
    pub style_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<AppearanceSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodySignature>,
}

fn default_baseline_formality() -> u8 {
    FORMALITY_MIN + 2
}

fn default_occasion() -> String {
    "casual_day".to_string()
}

impl UserProfile {
    /// Profile used when the profile source knows nothing about the user
    pub fn fallback(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            baseline_formality: default_baseline_formality(),
            default_occasion: default_occasion(),
            style_tags: Vec::new(),
            appearance: None,
            body: None,
        }
    }
}
