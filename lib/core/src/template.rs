//! Outfit templates and the occasion → template lookup

use crate::item::{slot, FORMALITY_MAX, FORMALITY_MIN};
use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strictly mixed leather/metal families are penalized
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessoryMode {
    Hard,
    Soft,
    #[default]
    Off,
}

/// Inclusive formality bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FormalityRange {
    pub low: u8,
    pub high: u8,
}

impl FormalityRange {
    pub const FULL: FormalityRange = FormalityRange {
        low: FORMALITY_MIN,
        high: FORMALITY_MAX,
    };

    pub const fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    #[inline]
    pub fn contains(&self, formality: u8) -> bool {
        self.low <= formality && formality <= self.high
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    pub template_id: String,
    /// Required slots, in search order
    pub slots: Vec<String>,
    /// Optional slots, searched after the required ones
    pub optional_slots: Vec<String>,
    pub formality_range: FormalityRange,
    pub accessory_mode: AccessoryMode,
}

impl Template {
    pub fn new(
        template_id: &str,
        slots: &[&str],
        optional_slots: &[&str],
        formality_range: FormalityRange,
        accessory_mode: AccessoryMode,
    ) -> Self {
        Self {
            template_id: template_id.to_string(),
            slots: slots.iter().map(|s| s.to_string()).collect(),
            optional_slots: optional_slots.iter().map(|s| s.to_string()).collect(),
            formality_range,
            accessory_mode,
        }
    }

    /// Required slots followed by optional slots
    pub fn all_slots(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .chain(self.optional_slots.iter())
            .map(String::as_str)
    }

    pub fn is_required(&self, slot_name: &str) -> bool {
        self.slots.iter().any(|s| s == slot_name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    WorkOffice,
    WorkCasual,
    CasualDay,
    DateNight,
    FormalEvent,
    CocktailEvening,
    WeddingGuest,
    Streetwear,
    Athleisure,
    ActiveGym,
    BeachResort,
    FestivalConcert,
    TravelAirport,
    WinterLayering,
    RainwearTechnical,
    CreativeProfessional,
}

impl Occasion {
    pub const ALL: [Occasion; 16] = [
        Occasion::WorkOffice,
        Occasion::WorkCasual,
        Occasion::CasualDay,
        Occasion::DateNight,
        Occasion::FormalEvent,
        Occasion::CocktailEvening,
        Occasion::WeddingGuest,
        Occasion::Streetwear,
        Occasion::Athleisure,
        Occasion::ActiveGym,
        Occasion::BeachResort,
        Occasion::FestivalConcert,
        Occasion::TravelAirport,
        Occasion::WinterLayering,
        Occasion::RainwearTechnical,
        Occasion::CreativeProfessional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::WorkOffice => "work_office",
            Occasion::WorkCasual => "work_casual",
            Occasion::CasualDay => "casual_day",
            Occasion::DateNight => "date_night",
            Occasion::FormalEvent => "formal_event",
            Occasion::CocktailEvening => "cocktail_evening",
            Occasion::WeddingGuest => "wedding_guest",
            Occasion::Streetwear => "streetwear",
            Occasion::Athleisure => "athleisure",
            Occasion::ActiveGym => "active_gym",
            Occasion::BeachResort => "beach_resort",
            Occasion::FestivalConcert => "festival_concert",
            Occasion::TravelAirport => "travel_airport",
            Occasion::WinterLayering => "winter_layering",
            Occasion::RainwearTechnical => "rainwear_technical",
            Occasion::CreativeProfessional => "creative_professional",
        }
    }

    /// Template id for this occasion. Occasions without a dedicated
    /// template fall back to the casual one.
    pub fn template_id(&self) -> &'static str {
        match self {
            Occasion::WorkOffice => "business_smart_separates",
            Occasion::FormalEvent => "business_suit",
            Occasion::CasualDay => "casual_day",
            Occasion::Streetwear => "streetwear",
            Occasion::WinterLayering => "winter_layering",
            _ => DEFAULT_TEMPLATE_ID,
        }
    }
}

impl FromStr for Occasion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.to_ascii_lowercase();
        Occasion::ALL
            .into_iter()
            .find(|occasion| occasion.as_str() == name)
            .ok_or_else(|| Error::InvalidInput(format!("unknown occasion '{s}'")))
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_TEMPLATE_ID: &str = "casual_day";

/// Read-only table of outfit templates keyed by id
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: AHashMap<String, Template>,
}

impl TemplateCatalog {
    /// Build a catalog from arbitrary templates. The default template must be present.
    pub fn new(templates: impl IntoIterator<Item = Template>) -> Result<Self> {
        let templates: AHashMap<String, Template> = templates
            .into_iter()
            .map(|t| (t.template_id.clone(), t))
            .collect();

        if !templates.contains_key(DEFAULT_TEMPLATE_ID) {
            return Err(Error::TemplateNotFound(DEFAULT_TEMPLATE_ID.to_string()));
        }
        for template in templates.values() {
            if template.slots.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "template '{}' has no required slots",
                    template.template_id
                )));
            }
            let range = template.formality_range;
            if range.low > range.high || range.low < FORMALITY_MIN || range.high > FORMALITY_MAX {
                return Err(Error::InvalidInput(format!(
                    "template '{}' has invalid formality range {}..={}",
                    template.template_id, range.low, range.high
                )));
            }
        }

        Ok(Self { templates })
    }

    /// The built-in template table
    pub fn standard() -> Self {
        use slot::*;

        let core = [TOP, BOTTOM, FOOTWEAR];
        let extras = [OUTERWEAR, ACCESSORY];
        let templates = [
            Template::new("business_suit", &core, &extras, FormalityRange::new(4, 5), AccessoryMode::Hard),
            Template::new(
                "business_smart_separates",
                &core,
                &extras,
                FormalityRange::new(3, 4),
                AccessoryMode::Soft,
            ),
            Template::new("casual_day", &core, &extras, FormalityRange::new(1, 3), AccessoryMode::Off),
            Template::new("streetwear", &core, &extras, FormalityRange::new(1, 2), AccessoryMode::Off),
            Template::new(
                "winter_layering",
                &[TOP, BOTTOM, FOOTWEAR, OUTERWEAR],
                &[ACCESSORY, LEGWEAR],
                FormalityRange::new(2, 4),
                AccessoryMode::Soft,
            ),
            Template::new(
                "black_tie_dress",
                &[ONE_PIECE, FOOTWEAR],
                &[ACCESSORY, OUTERWEAR],
                FormalityRange::new(5, 5),
                AccessoryMode::Hard,
            ),
        ];

        Self {
            templates: templates
                .into_iter()
                .map(|t| (t.template_id.clone(), t))
                .collect(),
        }
    }

    pub fn get(&self, template_id: &str) -> Result<&Template> {
        self.templates
            .get(template_id)
            .ok_or_else(|| Error::TemplateNotFound(template_id.to_string()))
    }

    /// Resolve an occasion name; unknown occasions use the default template
    pub fn for_occasion(&self, occasion: &str) -> Result<&Template> {
        let template_id = occasion
            .parse::<Occasion>()
            .map(|o| o.template_id())
            .unwrap_or(DEFAULT_TEMPLATE_ID);
        self.get(template_id)
    }

    /// Template ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = TemplateCatalog::standard();
        assert_eq!(catalog.len(), 6);
        assert_eq!(
            catalog.ids(),
            vec![
                "black_tie_dress",
                "business_smart_separates",
                "business_suit",
                "casual_day",
                "streetwear",
                "winter_layering"
            ]
        );

        let casual = catalog.get("casual_day").unwrap();
        assert_eq!(casual.slots, vec!["top", "bottom", "footwear"]);
        assert_eq!(casual.optional_slots, vec!["outerwear", "accessory"]);
        assert_eq!(casual.formality_range, FormalityRange::new(1, 3));
        assert_eq!(casual.accessory_mode, AccessoryMode::Off);

        let dress = catalog.get("black_tie_dress").unwrap();
        assert_eq!(dress.accessory_mode, AccessoryMode::Hard);
        assert!(dress.is_required("one_piece"));
        assert!(!dress.is_required("top"));
    }

    #[test]
    fn test_all_slots_order() {
        let catalog = TemplateCatalog::standard();
        let winter = catalog.get("winter_layering").unwrap();
        let slots: Vec<&str> = winter.all_slots().collect();
        assert_eq!(slots, vec!["top", "bottom", "footwear", "outerwear", "accessory", "legwear"]);
    }

    #[test]
    fn test_unknown_template() {
        let catalog = TemplateCatalog::standard();
        let err = catalog.get("pajamas").unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound(ref id) if id == "pajamas"));
    }

    #[test]
    fn test_occasion_mapping() {
        let catalog = TemplateCatalog::standard();
        assert_eq!(catalog.for_occasion("work_office").unwrap().template_id, "business_smart_separates");
        assert_eq!(catalog.for_occasion("formal_event").unwrap().template_id, "business_suit");
        assert_eq!(catalog.for_occasion("winter_layering").unwrap().template_id, "winter_layering");
        // Known occasion without a dedicated template
        assert_eq!(catalog.for_occasion("date_night").unwrap().template_id, "casual_day");
        // Unknown occasion
        assert_eq!(catalog.for_occasion("moon_landing").unwrap().template_id, "casual_day");
    }

    #[test]
    fn test_occasion_names_match_serde() {
        for occasion in Occasion::ALL {
            let json = serde_json::to_string(&occasion).unwrap();
            assert_eq!(json, format!("\"{occasion}\""));
            assert_eq!(occasion.as_str().parse::<Occasion>().unwrap(), occasion);
        }
        assert_eq!("Date_Night".parse::<Occasion>().unwrap(), Occasion::DateNight);
        assert!(matches!("gala".parse::<Occasion>(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_accessory_mode_serialization() {
        assert_eq!(serde_json::to_string(&AccessoryMode::Hard).unwrap(), "\"HARD\"");
        let mode: AccessoryMode = serde_json::from_str("\"SOFT\"").unwrap();
        assert_eq!(mode, AccessoryMode::Soft);
    }

    #[test]
    fn test_custom_catalog_requires_default() {
        let only = Template::new("gym", &["top"], &[], FormalityRange::new(1, 1), AccessoryMode::Off);
        assert!(TemplateCatalog::new([only]).is_err());

        let bad_range = Template::new("casual_day", &["top"], &[], FormalityRange::new(4, 2), AccessoryMode::Off);
        assert!(matches!(
            TemplateCatalog::new([bad_range]),
            Err(Error::InvalidInput(_))
        ));
    }
}
