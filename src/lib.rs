//! # Drape
//!
//! A deterministic outfit recommender.
//!
//! Drape assembles an outfit by filling the slots of an occasion template
//! (top, bottom, footwear, ...) from a user's wardrobe and, optionally, a
//! shared catalog. A beam search explores combinations while a multi-factor
//! scorer rates each one on color harmony, pattern mix, silhouette, formality,
//! climate, style affinity, novelty, accessory consistency, skin synergy and
//! body proportions.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! drape templates
//! drape recommend --request request.json --config engine.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use drape::prelude::*;
//!
//! let index = InMemoryIndex::new();
//! let wardrobe = Scope::User("u1".to_string());
//! index.upsert(wardrobe.clone(), ItemAttributes::new("tee", slot::TOP, 2)).unwrap();
//! index.upsert(wardrobe.clone(), ItemAttributes::new("jeans", slot::BOTTOM, 2)).unwrap();
//! index.upsert(wardrobe, ItemAttributes::new("sneakers", slot::FOOTWEAR, 2)).unwrap();
//!
//! let recommender = Recommender::new(
//!     TemplateCatalog::standard(),
//!     EngineConfig::default(),
//!     index,
//!     InMemoryProfiles::new(),
//!     InMemoryOutfits::new(),
//! );
//!
//! let outfit = recommender.generate(&RecommendRequest::new("u1")).unwrap();
//! println!("{} scored {:.3}", outfit.template_id, outfit.total());
//! ```
//!
//! ## Crate Structure
//!
//! - `drape-core` - Items, profiles, templates, colors and the error type
//! - `drape-scoring` - Scoring factors, weights and score explanations
//! - `drape-search` - Beam search, hard constraints, seeding and the recommender

pub mod document;

// Re-export core types
pub use drape_core::{
    slot, AccessoryMode, AppearanceSignature, BodySignature, ClimateBand, ColorLch, Error,
    FormalityRange, ItemAttributes, ItemSource, Occasion, Result, SetCohesionPolicy, Template,
    TemplateCatalog, UserProfile,
};

// Re-export scoring
pub use drape_scoring::{ScoreBreakdown, ScoreCard, Scorer, ScoringContext, ScoringWeights, Subscore};

// Re-export search
pub use drape_search::{
    Alternative, BeamConfig, BeamSearch, CandidateQuery, CandidateSource, DeterminismSeed,
    EngineConfig, InMemoryIndex, InMemoryOutfits, InMemoryProfiles, OutfitStore, ProfileSource,
    RecommendRequest, Recommendation, Recommender, Scope, TieBreak,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        slot, ClimateBand, ColorLch, EngineConfig, Error, InMemoryIndex, InMemoryOutfits,
        InMemoryProfiles, ItemAttributes, RecommendRequest, Recommendation, Recommender, Result,
        Scope, Scorer, ScoringContext, ScoringWeights, Subscore, TemplateCatalog, UserProfile,
    };
}

/// Individual scoring factors
pub mod factors {
    pub use drape_scoring::factors::*;
}
