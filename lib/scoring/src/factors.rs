//! Per-factor compatibility functions
//!
//! Each function scores a candidate item set on one axis. Scores sit roughly
//! in [0.0, 1.0] where 1.0 means no objection; the skin-synergy and
//! proportion factors may multiply above 1.0 internally but are capped on return.

use ahash::AHashSet;
use drape_core::{
    slot, AccessoryMode, AppearanceSignature, BodySignature, ClimateBand, ColorLch, FitProfile,
    ItemAttributes, TorsoLegRatio, WaistDefinition,
};

const WAIST_EMPHASIS_KINDS: [&str; 4] = ["belted", "darted", "wrap", "empire"];

/// Harmony of a single pair of colors, bucketed by circular hue distance
#[inline]
pub fn pair_harmony(a: &ColorLch, b: &ColorLch) -> f64 {
    let hue_diff = a.hue_distance(b);
    if hue_diff <= 30.0 {
        // analogous
        1.0
    } else if (150.0..=210.0).contains(&hue_diff) {
        // complementary
        0.9
    } else if (110.0..=130.0).contains(&hue_diff) {
        // triadic
        0.85
    } else {
        0.6
    }
}

/// Mean pairwise harmony over all colored items
pub fn palette_harmony(items: &[&ItemAttributes]) -> f64 {
    let colors: Vec<&ColorLch> = items.iter().filter_map(|item| item.color.as_ref()).collect();
    if colors.len() < 2 {
        return 1.0;
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1..] {
            total += pair_harmony(a, b);
            pairs += 1;
        }
    }

    total / pairs as f64
}

pub fn pattern_mix(items: &[&ItemAttributes]) -> f64 {
    match items.iter().filter(|item| item.is_patterned()).count() {
        0 | 1 => 1.0,
        2 => 0.9,
        3 => 0.7,
        _ => 0.5,
    }
}

/// Fit balance over (top or one-piece, bottom) pairs with known fits
pub fn silhouette_balance(items: &[&ItemAttributes]) -> f64 {
    let uppers = items
        .iter()
        .filter(|item| item.slot == slot::TOP || item.slot == slot::ONE_PIECE);

    let mut total = 0.0;
    let mut pairs = 0usize;
    for upper in uppers {
        for lower in items.iter().filter(|item| item.slot == slot::BOTTOM) {
            let (Some(top_fit), Some(bottom_fit)) = (upper.fit_profile, lower.fit_profile) else {
                continue;
            };
            total += if top_fit == FitProfile::Oversized && bottom_fit.is_slim_or_regular() {
                1.0
            } else if top_fit.is_slim_or_regular() && bottom_fit == FitProfile::Relaxed {
                0.9
            } else {
                0.8
            };
            pairs += 1;
        }
    }

    if pairs == 0 {
        1.0
    } else {
        total / pairs as f64
    }
}

/// Mean absolute formality deviation mapped onto four steps
pub fn formality_closeness(items: &[&ItemAttributes], target_formality: u8) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let target = f64::from(target_formality);
    let deviation = items
        .iter()
        .map(|item| (f64::from(item.formality) - target).abs())
        .sum::<f64>()
        / items.len() as f64;

    if deviation <= 0.5 {
        1.0
    } else if deviation <= 1.0 {
        0.9
    } else if deviation <= 1.5 {
        0.7
    } else {
        0.5
    }
}

pub fn climate_fit(items: &[&ItemAttributes], band: ClimateBand) -> f64 {
    let mut total = 0.0;
    let mut declared = 0usize;
    for item in items.iter().filter(|item| !item.climate_bands.is_empty()) {
        total += if item.climate_bands.contains(&band) { 1.0 } else { 0.5 };
        declared += 1;
    }

    if declared == 0 {
        0.8
    } else {
        total / declared as f64
    }
}

/// Fraction of all item style tags that the user also carries
pub fn style_tag_match(items: &[&ItemAttributes], profile_style_tags: &[String]) -> f64 {
    if profile_style_tags.is_empty() {
        return 1.0;
    }

    let wanted: AHashSet<&str> = profile_style_tags.iter().map(String::as_str).collect();
    let mut total = 0usize;
    let mut matched = 0usize;
    for tag in items.iter().flat_map(|item| item.style_tags.iter()) {
        total += 1;
        if wanted.contains(tag.as_str()) {
            matched += 1;
        }
    }

    if total == 0 {
        0.8
    } else {
        matched as f64 / total as f64
    }
}

/// Penalty for re-using recently worn items
pub fn novelty(items: &[&ItemAttributes], recently_worn: &[String]) -> f64 {
    if recently_worn.is_empty() {
        return 1.0;
    }

    let chosen: AHashSet<&str> = items.iter().map(|item| item.item_id.as_str()).collect();
    let overlap = recently_worn
        .iter()
        .filter(|id| chosen.contains(id.as_str()))
        .count();

    (1.0 - 0.15 * overlap as f64).max(0.5)
}

/// Penalty for mixing more than two leather or metal families
pub fn accessory_consistency(items: &[&ItemAttributes], mode: AccessoryMode) -> f64 {
    let penalty = match mode {
        AccessoryMode::Off => return 1.0,
        AccessoryMode::Soft => 0.8,
        AccessoryMode::Hard => 0.5,
    };

    let leather: AHashSet<&str> = items
        .iter()
        .filter_map(|item| item.leather_family.as_deref())
        .collect();
    let metal: AHashSet<&str> = items
        .iter()
        .filter_map(|item| item.metal_family.as_deref())
        .collect();

    let mut score = 1.0;
    if leather.len() > 2 {
        score *= penalty;
    }
    if metal.len() > 2 {
        score *= penalty;
    }
    score
}

/// How near-face colors sit against the wearer's skin
pub fn skin_synergy(
    items: &[&ItemAttributes],
    appearance: Option<&AppearanceSignature>,
    near_face_slots: &[String],
) -> (f64, Vec<String>) {
    let Some(skin) = appearance.and_then(|a| a.skin.as_ref()) else {
        return (1.0, Vec::new());
    };

    let mut explanations = Vec::new();
    let mut score: f64 = 1.0;
    for item in items {
        if !near_face_slots.iter().any(|s| *s == item.slot) {
            continue;
        }
        let Some(color) = item.color.as_ref() else {
            continue;
        };

        let hue_diff = skin.hue_distance(color);
        if hue_diff <= 20.0 {
            score *= 0.95;
            explanations.push(format!("Near-face color harmonious (Δh {hue_diff:.0}°)"));
        } else if (160.0..=200.0).contains(&hue_diff) {
            score *= 1.05;
            explanations.push(format!("Near-face color complementary (Δh {hue_diff:.0}°)"));
        }

        let lightness_diff = skin.lightness_distance(color);
        if lightness_diff >= 18.0 {
            score *= 1.02;
        } else if lightness_diff < 10.0 {
            score *= 0.93;
        }
    }

    (score.min(1.0), explanations)
}

/// How the chosen cuts suit the wearer's proportions
pub fn proportion_fit(
    items: &[&ItemAttributes],
    body: Option<&BodySignature>,
) -> (f64, Vec<String>) {
    let Some(body) = body else {
        return (1.0, Vec::new());
    };

    let mut explanations = Vec::new();
    let mut score: f64 = 1.0;
    for item in items {
        let rise = item.bottom_rise_class.as_deref();
        let longline = item.top_length_class.as_deref() == Some("longline");

        match body.torso_leg_ratio {
            Some(TorsoLegRatio::LongTorso) => {
                if rise == Some("high") {
                    score *= 1.05;
                    explanations.push("High-rise bottoms balance long torso".to_string());
                }
                if longline {
                    score *= 0.95;
                }
            }
            Some(TorsoLegRatio::LongLegs) => {
                if matches!(rise, Some("mid") | Some("low")) {
                    score *= 1.03;
                }
                if longline {
                    score *= 1.02;
                }
            }
            _ => {}
        }

        if body.waist_definition == Some(WaistDefinition::Defined)
            && item
                .waist_emphasis
                .as_deref()
                .is_some_and(|w| WAIST_EMPHASIS_KINDS.contains(&w))
        {
            score *= 1.03;
            explanations.push("Waist emphasis complements defined waist".to_string());
        }
    }

    (score.min(1.0), explanations)
}
