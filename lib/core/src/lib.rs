//! # Drape Core
//!
//! Core value types for the Drape outfit engine.
//!
//! This crate provides the immutable descriptors every other crate works on:
//!
//! - [`ItemAttributes`] - one wardrobe or catalog item (slot, formality, color, fit, sets, materials)
//! - [`ColorLch`] - color in LCh space with hue/lightness distances
//! - [`AppearanceSignature`] / [`BodySignature`] - optional wearer descriptors
//! - [`Template`] / [`TemplateCatalog`] - outfit archetypes and the occasion lookup
//!
//! ## Example
//!
//! ```rust
//! use drape_core::{ColorLch, ItemAttributes, TemplateCatalog, slot};
//!
//! let catalog = TemplateCatalog::standard();
//! let template = catalog.for_occasion("work_office").unwrap();
//! assert_eq!(template.template_id, "business_smart_separates");
//!
//! let shirt = ItemAttributes::new("shirt-1", slot::TOP, 3)
//!     .with_color(ColorLch::new(62.0, 18.0, 215.0).unwrap());
//! shirt.validate().unwrap();
//! ```

pub mod color;
pub mod error;
pub mod item;
pub mod profile;
pub mod template;

pub use color::ColorLch;
pub use error::{Error, Result};
pub use item::{
    slot, ClimateBand, FitProfile, GenderMarket, ItemAttributes, ItemSource, Pattern,
    SetCohesionPolicy, FORMALITY_MAX, FORMALITY_MIN,
};
pub use profile::{
    AppearanceSignature, BodySignature, FitPreference, HeightClass, ShoulderToHipRatio,
    SynergyStyle, TorsoLegRatio, Undertone, UserProfile, WaistDefinition,
};
pub use template::{
    AccessoryMode, FormalityRange, Occasion, Template, TemplateCatalog, DEFAULT_TEMPLATE_ID,
};
