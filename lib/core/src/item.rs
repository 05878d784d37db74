use crate::color::ColorLch;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const FORMALITY_MIN: u8 = 1;
pub const FORMALITY_MAX: u8 = 5;

/// Well-known slot names. Slots are open-ended strings; these are the ones
/// the template catalog and the hard constraints refer to.
pub mod slot {
    pub const TOP: &str = "top";
    pub const BOTTOM: &str = "bottom";
    pub const ONE_PIECE: &str = "one_piece";
    pub const FOOTWEAR: &str = "footwear";
    pub const OUTERWEAR: &str = "outerwear";
    pub const ACCESSORY: &str = "accessory";
    pub const LEGWEAR: &str = "legwear";
    pub const NECKWEAR: &str = "neckwear";
    pub const SCARF: &str = "scarf";
    pub const HAT: &str = "hat";
}

/// Where an item comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    #[default]
    Wardrobe,
    Catalog,
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSource::Wardrobe => write!(f, "wardrobe"),
            ItemSource::Catalog => write!(f, "catalog"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ClimateBand {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl ClimateBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateBand::Hot => "hot",
            ClimateBand::Warm => "warm",
            ClimateBand::Cool => "cool",
            ClimateBand::Cold => "cold",
        }
    }
}

impl fmt::Display for ClimateBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClimateBand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hot" => Ok(ClimateBand::Hot),
            "warm" => Ok(ClimateBand::Warm),
            "cool" => Ok(ClimateBand::Cool),
            "cold" => Ok(ClimateBand::Cold),
            other => Err(Error::InvalidInput(format!("unknown climate band '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FitProfile {
    Slim,
    Regular,
    Relaxed,
    Oversized,
    Cropped,
}

impl FitProfile {
    #[inline]
    pub fn is_slim_or_regular(&self) -> bool {
        matches!(self, FitProfile::Slim | FitProfile::Regular)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GenderMarket {
    Mens,
    Womens,
    Unisex,
}

/// How strictly items of one coordinated set must agree on their role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SetCohesionPolicy {
    Strict,
    PreferStrict,
    Loose,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pattern {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
}

impl Pattern {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            scale: None,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    /// A pattern counts only when it names a type
    #[inline]
    pub fn is_patterned(&self) -> bool {
        self.kind.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Descriptors of one wardrobe or catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemAttributes {
    pub item_id: String,
    #[serde(default)]
    pub source: ItemSource,
    /// Functional slot this item fills
    pub slot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_formality")]
    pub formality: u8,
    #[serde(default, alias = "seasonality", skip_serializing_if = "Vec::is_empty")]
    pub climate_bands: Vec<ClimateBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorLch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presentation_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_profile: Option<FitProfile>,

    // Proportion and structure classifiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_length_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_rise_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder_structure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_emphasis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skirt_silhouette: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_orientation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_opening_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footwear_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jewelry_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intended_market: Option<GenderMarket>,

    // Coordinated sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord_set_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_cohesion_policy: Option<SetCohesionPolicy>,

    // Accessory materials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leather_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metal_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metal_finish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag_material: Option<String>,
}

fn default_formality() -> u8 {
    3
}

impl ItemAttributes {
    /// Create a wardrobe item with only the required descriptors set
    #[must_use]
    pub fn new(item_id: impl Into<String>, slot: impl Into<String>, formality: u8) -> Self {
        Self {
            item_id: item_id.into(),
            source: ItemSource::Wardrobe,
            slot: slot.into(),
            category: None,
            formality,
            climate_bands: Vec::new(),
            color: None,
            pattern: None,
            material: None,
            style_tags: Vec::new(),
            presentation_tags: Vec::new(),
            fit_profile: None,
            top_length_class: None,
            bottom_rise_class: None,
            shoulder_structure: None,
            waist_emphasis: None,
            skirt_silhouette: None,
            pattern_orientation: None,
            leg_opening_cm: None,
            footwear_class: None,
            bag_kind: None,
            jewelry_kind: None,
            intended_market: None,
            group_id: None,
            set_role: None,
            coord_set_kind: None,
            set_cohesion_policy: None,
            leather_family: None,
            metal_family: None,
            metal_finish: None,
            bag_material: None,
        }
    }

    /// Check formality bounds and color finiteness
    pub fn validate(&self) -> Result<()> {
        if !(FORMALITY_MIN..=FORMALITY_MAX).contains(&self.formality) {
            return Err(Error::InvalidItem {
                item_id: self.item_id.clone(),
                reason: format!(
                    "formality {} outside {}..={}",
                    self.formality, FORMALITY_MIN, FORMALITY_MAX
                ),
            });
        }
        if let Some(color) = &self.color {
            color.validate().map_err(|e| Error::InvalidItem {
                item_id: self.item_id.clone(),
                reason: e.to_string(),
            })?;
        }
        if self.slot.is_empty() {
            return Err(Error::InvalidItem {
                item_id: self.item_id.clone(),
                reason: "slot must not be empty".to_string(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_patterned(&self) -> bool {
        self.pattern.as_ref().is_some_and(Pattern::is_patterned)
    }

    /// Non-empty coordinated-set group id, if any
    #[inline]
    pub fn group(&self) -> Option<&str> {
        self.group_id.as_deref().filter(|g| !g.is_empty())
    }

    #[inline]
    #[must_use]
    pub fn with_source(mut self, source: ItemSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_color(mut self, color: ColorLch) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_climate_bands(mut self, bands: impl IntoIterator<Item = ClimateBand>) -> Self {
        self.climate_bands = bands.into_iter().collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_style_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.style_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_fit(mut self, fit: FitProfile) -> Self {
        self.fit_profile = Some(fit);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_top_length(mut self, class: impl Into<String>) -> Self {
        self.top_length_class = Some(class.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_bottom_rise(mut self, class: impl Into<String>) -> Self {
        self.bottom_rise_class = Some(class.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_waist_emphasis(mut self, emphasis: impl Into<String>) -> Self {
        self.waist_emphasis = Some(emphasis.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_leather(mut self, family: impl Into<String>) -> Self {
        self.leather_family = Some(family.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_metal(mut self, family: impl Into<String>) -> Self {
        self.metal_family = Some(family.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_set(
        mut self,
        group_id: impl Into<String>,
        role: impl Into<String>,
        policy: SetCohesionPolicy,
    ) -> Self {
        self.group_id = Some(group_id.into());
        self.set_role = Some(role.into());
        self.set_cohesion_policy = Some(policy);
        self
    }
}
