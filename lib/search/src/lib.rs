//! # Drape Search
//!
//! Outfit assembly and recommendation.
//!
//! - [`BeamSearch`] fills a template's slots from ranked candidates, keeping
//!   the best partial outfits at each step and rejecting combinations that
//!   break a hard constraint.
//! - [`Recommender`] resolves the profile, occasion and template, retrieves
//!   candidates through [`CandidateSource`], runs the search and stores the
//!   result through [`OutfitStore`].
//!
//! ## Example
//!
//! ```rust
//! use drape_core::{slot, ItemAttributes, TemplateCatalog};
//! use drape_search::{
//!     EngineConfig, InMemoryIndex, InMemoryOutfits, InMemoryProfiles, RecommendRequest,
//!     Recommender, Scope,
//! };
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
//! let outfit = recommender.generate(&RecommendRequest::new("u1")).unwrap();
//! assert_eq!(outfit.item_ids(), vec!["tee", "jeans", "sneakers"]);
//! ```

pub mod beam;
pub mod config;
pub mod constraints;
pub mod memory;
pub mod recommend;
pub mod seed;

pub use beam::{
    BeamConfig, BeamSearch, CandidatesBySlot, PartialAssignment, SearchOutcome, SearchStats,
    SlotAssignment, TieBreak,
};
pub use config::{EngineConfig, DEFAULT_RULESET_VERSION};
pub use constraints::{check_hard_constraints, ConstraintViolation};
pub use memory::{InMemoryIndex, InMemoryOutfits, InMemoryProfiles};
pub use recommend::{
    Alternative, CandidateQuery, CandidateSource, OutfitSlot, OutfitStore, ProfileSource,
    RecommendRequest, Recommendation, Recommender, Scope,
};
pub use seed::DeterminismSeed;
