//! Request documents
//!
//! A self-contained JSON file holding a user's wardrobe, an optional catalog
//! and profile, and the request itself:
//!
//! ```json
//! {
//!   "user_id": "u1",
//!   "occasion": "casual_day",
//!   "profile": { "user_id": "u1", "style_tags": ["minimal"] },
//!   "items": [ { "item_id": "tee", "slot": "top", "formality": 2 } ],
//!   "catalog": []
//! }
//! ```

use drape_core::{ItemAttributes, Result, TemplateCatalog, UserProfile};
use drape_search::{
    EngineConfig, InMemoryIndex, InMemoryOutfits, InMemoryProfiles, RecommendRequest, Recommender,
    Scope,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recommender wired to in-memory collaborators
pub type InMemoryRecommender = Recommender<InMemoryIndex, InMemoryProfiles, InMemoryOutfits>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDocument {
    #[serde(flatten)]
    pub request: RecommendRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    /// The user's wardrobe
    #[serde(default)]
    pub items: Vec<ItemAttributes>,
    #[serde(default)]
    pub catalog: Vec<ItemAttributes>,
}

impl RequestDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load the document's items and profile into fresh in-memory stores
    pub fn into_recommender(
        self,
        catalog: TemplateCatalog,
        config: EngineConfig,
    ) -> Result<(InMemoryRecommender, RecommendRequest)> {
        let index = InMemoryIndex::new();
        index.upsert_many(Scope::User(self.request.user_id.clone()), self.items)?;
        index.upsert_many(Scope::Catalog, self.catalog)?;

        let profiles = InMemoryProfiles::new();
        if let Some(mut profile) = self.profile {
            profile.user_id = self.request.user_id.clone();
            profiles.upsert(profile);
        }

        let recommender = Recommender::new(catalog, config, index, profiles, InMemoryOutfits::new());
        Ok((recommender, self.request))
    }
}
