//! Recommendation orchestration
//!
//! Ties profile lookup, template resolution, candidate retrieval, seeding and
//! beam search together. Storage is reached only through the collaborator
//! traits, so the recommender itself holds no state between calls.

use crate::beam::{BeamSearch, CandidatesBySlot};
use crate::config::EngineConfig;
use crate::constraints::check_hard_constraints;
use crate::seed::DeterminismSeed;
use chrono::{DateTime, Utc};
use drape_core::{
    ClimateBand, Error, FormalityRange, ItemAttributes, ItemSource, Result, Template,
    TemplateCatalog, UserProfile, FORMALITY_MAX, FORMALITY_MIN,
};
use drape_scoring::{ScoreBreakdown, ScoreCard, Scorer, ScoringContext};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Whose items a query searches
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// One user's wardrobe
    User(String),
    /// The shared shopping catalog
    Catalog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pub scope: Scope,
    pub slot: String,
    pub formality: FormalityRange,
    pub limit: usize,
}

/// Retrieves ranked candidate items
pub trait CandidateSource: Send + Sync {
    /// Items for `query.slot` within `query.formality`, best first, at most `query.limit`
    fn candidates(&self, query: &CandidateQuery) -> Result<Vec<ItemAttributes>>;
}

pub trait ProfileSource: Send + Sync {
    fn profile(&self, user_id: &str) -> Option<UserProfile>;
}

/// Persists generated outfits
pub trait OutfitStore: Send + Sync {
    fn save(&self, outfit: &Recommendation) -> Result<()>;
    fn get(&self, user_id: &str, outfit_id: &Uuid) -> Option<Recommendation>;
}

impl<T: CandidateSource + ?Sized> CandidateSource for Arc<T> {
    fn candidates(&self, query: &CandidateQuery) -> Result<Vec<ItemAttributes>> {
        (**self).candidates(query)
    }
}

impl<T: ProfileSource + ?Sized> ProfileSource for Arc<T> {
    fn profile(&self, user_id: &str) -> Option<UserProfile> {
        (**self).profile(user_id)
    }
}

impl<T: OutfitStore + ?Sized> OutfitStore for Arc<T> {
    fn save(&self, outfit: &Recommendation) -> Result<()> {
        (**self).save(outfit)
    }

    fn get(&self, user_id: &str, outfit_id: &Uuid) -> Option<Recommendation> {
        (**self).get(user_id, outfit_id)
    }
}

/// Request for one outfit. Unset fields fall back to the user's profile,
/// then to engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(default, alias = "target_dressiness", skip_serializing_if = "Option::is_none")]
    pub target_formality: Option<u8>,
    #[serde(default, alias = "temperature_band", skip_serializing_if = "Option::is_none")]
    pub climate_band: Option<ClimateBand>,
    /// Also draw candidates from the shared catalog
    #[serde(default)]
    pub allow_catalog: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub determinism_key: Option<String>,
    #[serde(default)]
    pub recently_worn: Vec<String>,
}

impl RecommendRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    #[must_use]
    pub fn with_target_formality(mut self, formality: u8) -> Self {
        self.target_formality = Some(formality);
        self
    }

    #[must_use]
    pub fn with_climate_band(mut self, band: ClimateBand) -> Self {
        self.climate_band = Some(band);
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, allow: bool) -> Self {
        self.allow_catalog = allow;
        self
    }

    #[must_use]
    pub fn with_determinism_key(mut self, key: impl Into<String>) -> Self {
        self.determinism_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_recently_worn(mut self, item_ids: Vec<String>) -> Self {
        self.recently_worn = item_ids;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitSlot {
    pub slot: String,
    pub item_id: String,
    pub source: ItemSource,
}

/// A generated outfit with everything needed to explain or revisit it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub outfit_id: Uuid,
    pub user_id: String,
    pub ruleset_version: String,
    pub template_id: String,
    pub occasion: String,
    pub target_formality: u8,
    pub climate_band: ClimateBand,
    /// Hex SHA-256 of the request identity
    pub determinism_seed: String,
    /// Filled slots in template order
    pub slots: Vec<OutfitSlot>,
    /// Full attributes of the chosen items, parallel to `slots`
    pub items: Vec<ItemAttributes>,
    pub scores: ScoreCard,
    pub breakdown: ScoreBreakdown,
    pub allow_catalog: bool,
    pub used_catalog_item: bool,
    pub generated_at: DateTime<Utc>,
}

impl Recommendation {
    pub fn item_ids(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.item_id.as_str()).collect()
    }

    pub fn item(&self, slot_name: &str) -> Option<&ItemAttributes> {
        self.slots
            .iter()
            .position(|s| s.slot == slot_name)
            .and_then(|i| self.items.get(i))
    }

    pub fn total(&self) -> f64 {
        self.scores.total
    }
}

/// A replacement candidate for one slot of a stored outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub item_id: String,
    pub source: ItemSource,
    pub total: f64,
    /// Change in total against the outfit as stored
    pub delta: f64,
}

pub struct Recommender<C, P, O> {
    catalog: TemplateCatalog,
    config: EngineConfig,
    scorer: Scorer,
    candidates: C,
    profiles: P,
    outfits: O,
}

impl<C, P, O> Recommender<C, P, O>
where
    C: CandidateSource,
    P: ProfileSource,
    O: OutfitStore,
{
    pub fn new(
        catalog: TemplateCatalog,
        config: EngineConfig,
        candidates: C,
        profiles: P,
        outfits: O,
    ) -> Self {
        let scorer = Scorer::new(config.weights.clone());
        Self {
            catalog,
            config,
            scorer,
            candidates,
            profiles,
            outfits,
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Generate, store and return one outfit
    pub fn generate(&self, request: &RecommendRequest) -> Result<Recommendation> {
        if request.user_id.trim().is_empty() {
            return Err(Error::InvalidInput("user_id is empty".to_string()));
        }

        let profile = self.load_profile(&request.user_id);
        let occasion = request
            .occasion
            .clone()
            .unwrap_or_else(|| profile.default_occasion.clone());
        let template = self.catalog.for_occasion(&occasion)?;

        let target_formality = request.target_formality.unwrap_or(profile.baseline_formality);
        if !(FORMALITY_MIN..=FORMALITY_MAX).contains(&target_formality) {
            return Err(Error::InvalidInput(format!(
                "target formality {target_formality} outside {FORMALITY_MIN}..={FORMALITY_MAX}"
            )));
        }
        let climate_band = request.climate_band.unwrap_or(self.config.default_climate_band);

        let candidates = self.retrieve(&request.user_id, template, request.allow_catalog)?;

        let seed = DeterminismSeed::derive(
            &request.user_id,
            &self.config.ruleset_version,
            &template.template_id,
            request.determinism_key.as_deref(),
            profile.appearance.as_ref(),
            profile.body.as_ref(),
        )?;

        let ctx = self
            .context(&profile, template, target_formality, climate_band)
            .with_recently_worn(&request.recently_worn);

        let outcome = BeamSearch::new(self.config.beam.clone())
            .with_seed(seed)
            .search(template, &candidates, &self.scorer, &ctx)?;

        let breakdown = ScoreBreakdown::from_card(&outcome.card, self.scorer.weights());
        let slots: Vec<OutfitSlot> = outcome
            .assignment
            .iter()
            .map(|a| OutfitSlot {
                slot: a.slot.clone(),
                item_id: a.item.item_id.clone(),
                source: a.item.source,
            })
            .collect();
        let used_catalog_item = slots.iter().any(|s| s.source == ItemSource::Catalog);

        let recommendation = Recommendation {
            outfit_id: Uuid::new_v4(),
            user_id: request.user_id.clone(),
            ruleset_version: self.config.ruleset_version.clone(),
            template_id: template.template_id.clone(),
            occasion,
            target_formality,
            climate_band,
            determinism_seed: seed.to_hex(),
            slots,
            items: outcome.assignment.into_iter().map(|a| a.item).collect(),
            scores: outcome.card,
            breakdown,
            allow_catalog: request.allow_catalog,
            used_catalog_item,
            generated_at: Utc::now(),
        };

        self.outfits.save(&recommendation)?;

        info!(
            user = %recommendation.user_id,
            outfit = %recommendation.outfit_id,
            template = %recommendation.template_id,
            total = recommendation.scores.total,
            seed = %recommendation.determinism_seed,
            "outfit generated"
        );

        Ok(recommendation)
    }

    /// Rank replacements for one slot of a stored outfit.
    ///
    /// Candidates come from the whole formality scale. The stored outfit and
    /// every variant are rescored under the same context, so `delta` compares
    /// like with like.
    pub fn alternatives(
        &self,
        user_id: &str,
        outfit_id: &Uuid,
        slot_name: &str,
        max: usize,
    ) -> Result<Vec<Alternative>> {
        let outfit = self
            .outfits
            .get(user_id, outfit_id)
            .ok_or_else(|| Error::OutfitNotFound(outfit_id.to_string()))?;
        let template = self.catalog.get(&outfit.template_id)?;
        if !template.all_slots().any(|s| s == slot_name) {
            return Err(Error::InvalidInput(format!(
                "slot '{slot_name}' is not part of template '{}'",
                template.template_id
            )));
        }
        if max == 0 {
            return Ok(Vec::new());
        }

        let profile = self.load_profile(user_id);
        let ctx = self.context(&profile, template, outfit.target_formality, outfit.climate_band);

        let current: Vec<(&str, &ItemAttributes)> = outfit
            .slots
            .iter()
            .map(|s| s.slot.as_str())
            .zip(outfit.items.iter())
            .collect();
        let occupant = current
            .iter()
            .find(|(s, _)| *s == slot_name)
            .map(|(_, item)| item.item_id.as_str());
        let others: Vec<(&str, &ItemAttributes)> =
            current.iter().filter(|(s, _)| *s != slot_name).copied().collect();

        let baseline_items: Vec<&ItemAttributes> = current.iter().map(|(_, item)| *item).collect();
        let baseline = self.scorer.score(&baseline_items, &ctx).total;

        let candidates = self.fetch(user_id, slot_name, FormalityRange::FULL, outfit.allow_catalog)?;

        let mut alternatives = Vec::new();
        for candidate in &candidates {
            candidate.validate()?;
            if occupant == Some(candidate.item_id.as_str()) {
                continue;
            }
            if let Err(violation) = check_hard_constraints(&others, slot_name, candidate) {
                debug!(slot = slot_name, item = %candidate.item_id, %violation, "alternative rejected");
                continue;
            }

            let mut items: Vec<&ItemAttributes> = current
                .iter()
                .map(|(s, item)| if *s == slot_name { candidate } else { *item })
                .collect();
            if occupant.is_none() {
                items.push(candidate);
            }

            let total = self.scorer.score(&items, &ctx).total;
            alternatives.push(Alternative {
                item_id: candidate.item_id.clone(),
                source: candidate.source,
                total,
                delta: total - baseline,
            });
        }

        alternatives.sort_by_key(|a| Reverse(OrderedFloat(a.total)));
        alternatives.truncate(max);

        debug!(
            outfit = %outfit_id,
            slot = slot_name,
            found = alternatives.len(),
            "alternatives ranked"
        );
        Ok(alternatives)
    }

    fn load_profile(&self, user_id: &str) -> UserProfile {
        self.profiles.profile(user_id).unwrap_or_else(|| {
            debug!(user = user_id, "no profile stored, using defaults");
            UserProfile::fallback(user_id)
        })
    }

    fn context<'a>(
        &'a self,
        profile: &'a UserProfile,
        template: &Template,
        target_formality: u8,
        climate_band: ClimateBand,
    ) -> ScoringContext<'a> {
        ScoringContext::new(target_formality, climate_band)
            .with_accessory_mode(template.accessory_mode)
            .with_style_tags(&profile.style_tags)
            .with_appearance(profile.appearance.as_ref())
            .with_body(profile.body.as_ref())
            .with_near_face_slots(&self.config.near_face_slots)
    }

    fn retrieve(
        &self,
        user_id: &str,
        template: &Template,
        allow_catalog: bool,
    ) -> Result<CandidatesBySlot> {
        let mut by_slot = CandidatesBySlot::new();
        for slot_name in template.all_slots() {
            let items = self.fetch(user_id, slot_name, template.formality_range, allow_catalog)?;
            debug!(slot = slot_name, candidates = items.len(), "candidates retrieved");
            by_slot.insert(slot_name.to_string(), items);
        }
        Ok(by_slot)
    }

    /// User scope first, catalog appended after it
    fn fetch(
        &self,
        user_id: &str,
        slot_name: &str,
        formality: FormalityRange,
        allow_catalog: bool,
    ) -> Result<Vec<ItemAttributes>> {
        let query = |scope| CandidateQuery {
            scope,
            slot: slot_name.to_string(),
            formality,
            limit: self.config.candidate_limit,
        };
        let owned = self.candidates.candidates(&query(Scope::User(user_id.to_string())))?;
        if !allow_catalog {
            return Ok(owned);
        }
        let catalog = self.candidates.candidates(&query(Scope::Catalog))?;
        Ok(interleave(owned, catalog))
    }
}

/// Alternate owned and catalog items, owned first, so both sources reach
/// the head of the list the beam search draws from.
fn interleave(owned: Vec<ItemAttributes>, catalog: Vec<ItemAttributes>) -> Vec<ItemAttributes> {
    let mut merged = Vec::with_capacity(owned.len() + catalog.len());
    let mut owned = owned.into_iter();
    let mut catalog = catalog.into_iter();
    loop {
        match (owned.next(), catalog.next()) {
            (None, None) => break,
            (a, b) => merged.extend(a.into_iter().chain(b)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryIndex, InMemoryOutfits, InMemoryProfiles};
    use drape_core::{slot, ColorLch, SetCohesionPolicy};

    type TestRecommender =
        Recommender<Arc<InMemoryIndex>, Arc<InMemoryProfiles>, Arc<InMemoryOutfits>>;

    struct Fixture {
        index: Arc<InMemoryIndex>,
        profiles: Arc<InMemoryProfiles>,
        outfits: Arc<InMemoryOutfits>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                index: Arc::new(InMemoryIndex::new()),
                profiles: Arc::new(InMemoryProfiles::new()),
                outfits: Arc::new(InMemoryOutfits::new()),
            }
        }

        fn wardrobe(&self, user: &str, items: Vec<ItemAttributes>) {
            for item in items {
                self.index.upsert(Scope::User(user.to_string()), item).unwrap();
            }
        }

        fn recommender(&self, config: EngineConfig) -> TestRecommender {
            Recommender::new(
                TemplateCatalog::standard(),
                config,
                self.index.clone(),
                self.profiles.clone(),
                self.outfits.clone(),
            )
        }
    }

    fn basic_wardrobe() -> Vec<ItemAttributes> {
        vec![
            ItemAttributes::new("tee", slot::TOP, 2)
                .with_color(ColorLch::new(60.0, 20.0, 210.0).unwrap()),
            ItemAttributes::new("jeans", slot::BOTTOM, 2)
                .with_color(ColorLch::new(40.0, 25.0, 230.0).unwrap()),
            ItemAttributes::new("sneakers", slot::FOOTWEAR, 2),
            ItemAttributes::new("dress-shoes", slot::FOOTWEAR, 5),
        ]
    }

    #[test]
    fn test_generate_with_fallback_profile() {
        let fixture = Fixture::new();
        fixture.wardrobe("u1", basic_wardrobe());
        let recommender = fixture.recommender(EngineConfig::default());

        let rec = recommender.generate(&RecommendRequest::new("u1")).unwrap();

        assert_eq!(rec.template_id, "casual_day");
        assert_eq!(rec.occasion, "casual_day");
        assert_eq!(rec.target_formality, 3);
        assert_eq!(rec.climate_band, ClimateBand::Warm);
        assert_eq!(rec.ruleset_version, "ruleset-2025-06");
        // dress shoes sit outside casual_day's 1..=3 range
        assert_eq!(rec.item_ids(), vec!["tee", "jeans", "sneakers"]);
        assert_eq!(rec.determinism_seed.len(), 64);
        assert!(!rec.used_catalog_item);
        assert_eq!(rec.items.len(), rec.slots.len());

        let stored = fixture.outfits.get("u1", &rec.outfit_id).unwrap();
        assert_eq!(stored, rec);
    }

    #[test]
    fn test_profile_drives_occasion_and_formality() {
        let fixture = Fixture::new();
        fixture.wardrobe(
            "u1",
            vec![
                ItemAttributes::new("shirt", slot::TOP, 4),
                ItemAttributes::new("trousers", slot::BOTTOM, 4),
                ItemAttributes::new("loafers", slot::FOOTWEAR, 4),
            ],
        );
        let mut profile = UserProfile::fallback("u1");
        profile.default_occasion = "work_office".to_string();
        profile.baseline_formality = 4;
        fixture.profiles.upsert(profile);

        let rec = fixture
            .recommender(EngineConfig::default())
            .generate(&RecommendRequest::new("u1"))
            .unwrap();
        assert_eq!(rec.template_id, "business_smart_separates");
        assert_eq!(rec.target_formality, 4);
    }

    #[test]
    fn test_catalog_only_when_allowed() {
        let fixture = Fixture::new();
        fixture.wardrobe(
            "u1",
            vec![
                ItemAttributes::new("tee", slot::TOP, 3),
                ItemAttributes::new("jeans", slot::BOTTOM, 3),
            ],
        );
        fixture
            .index
            .upsert(Scope::Catalog, ItemAttributes::new("cat-sneakers", slot::FOOTWEAR, 3))
            .unwrap();
        let recommender = fixture.recommender(EngineConfig::default());

        let err = recommender.generate(&RecommendRequest::new("u1")).unwrap_err();
        assert!(err.is_infeasible());

        let rec = recommender
            .generate(&RecommendRequest::new("u1").with_catalog(true))
            .unwrap();
        assert!(rec.used_catalog_item);
        assert_eq!(rec.slots[2].source, ItemSource::Catalog);
    }

    #[test]
    fn test_catalog_candidates_reach_large_wardrobes() {
        let fixture = Fixture::new();
        fixture.wardrobe(
            "u1",
            (0..12)
                .map(|i| ItemAttributes::new(&format!("shoe-{i}"), slot::FOOTWEAR, 3))
                .collect(),
        );
        fixture
            .index
            .upsert_many(
                Scope::Catalog,
                vec![
                    ItemAttributes::new("cat-loafers", slot::FOOTWEAR, 3),
                    ItemAttributes::new("cat-boots", slot::FOOTWEAR, 3),
                ],
            )
            .unwrap();
        let config = EngineConfig::default();
        let head = config.beam.max_candidates_per_slot;
        let recommender = fixture.recommender(config);

        let merged = recommender
            .fetch("u1", slot::FOOTWEAR, FormalityRange::FULL, true)
            .unwrap();
        assert_eq!(merged.len(), 14);
        assert_eq!(merged[0].source, ItemSource::Wardrobe);
        assert_eq!(merged[1].source, ItemSource::Catalog);
        let catalog_in_head = merged[..head]
            .iter()
            .filter(|item| item.source == ItemSource::Catalog)
            .count();
        assert_eq!(catalog_in_head, 2);

        let owned_only = recommender
            .fetch("u1", slot::FOOTWEAR, FormalityRange::FULL, false)
            .unwrap();
        assert!(owned_only.iter().all(|item| item.source == ItemSource::Wardrobe));
    }

    #[test]
    fn test_interleave_uneven_sources() {
        let ids = |prefix: &str, n: usize| -> Vec<ItemAttributes> {
            (0..n)
                .map(|i| ItemAttributes::new(&format!("{prefix}{i}"), slot::TOP, 3))
                .collect()
        };
        let merged: Vec<String> = interleave(ids("w", 3), ids("c", 1))
            .into_iter()
            .map(|item| item.item_id)
            .collect();
        assert_eq!(merged, vec!["w0", "c0", "w1", "w2"]);

        let merged: Vec<String> = interleave(Vec::new(), ids("c", 2))
            .into_iter()
            .map(|item| item.item_id)
            .collect();
        assert_eq!(merged, vec!["c0", "c1"]);
    }

    #[test]
    fn test_invalid_target_formality() {
        let fixture = Fixture::new();
        fixture.wardrobe("u1", basic_wardrobe());
        let recommender = fixture.recommender(EngineConfig::default());

        for bad in [0, 6] {
            let err = recommender
                .generate(&RecommendRequest::new("u1").with_target_formality(bad))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
        assert!(matches!(
            recommender.generate(&RecommendRequest::new(" ")),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_same_request_same_outfit() {
        let fixture = Fixture::new();
        fixture.wardrobe("u1", basic_wardrobe());
        let recommender = fixture.recommender(EngineConfig::default());
        let request = RecommendRequest::new("u1").with_determinism_key("monday");

        let a = recommender.generate(&request).unwrap();
        let b = recommender.generate(&request).unwrap();
        assert_eq!(a.item_ids(), b.item_ids());
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.determinism_seed, b.determinism_seed);
        assert_ne!(a.outfit_id, b.outfit_id);
    }

    #[test]
    fn test_alternatives_ranked_and_filtered() {
        let fixture = Fixture::new();
        fixture.wardrobe("u1", basic_wardrobe());
        fixture.wardrobe(
            "u1",
            vec![
                ItemAttributes::new("polo", slot::TOP, 3)
                    .with_color(ColorLch::new(55.0, 20.0, 220.0).unwrap()),
                ItemAttributes::new("gown", slot::ONE_PIECE, 5),
            ],
        );
        let recommender = fixture.recommender(EngineConfig::default());
        let rec = recommender.generate(&RecommendRequest::new("u1")).unwrap();
        let current_top = rec.item(slot::TOP).unwrap().item_id.clone();

        let alternatives = recommender
            .alternatives("u1", &rec.outfit_id, slot::TOP, 5)
            .unwrap();
        assert!(!alternatives.is_empty());
        assert!(alternatives.iter().all(|a| a.item_id != current_top));
        assert!(alternatives.windows(2).all(|w| w[0].total >= w[1].total));

        // Stored outfit was generated without history, so its total is the baseline
        for alt in &alternatives {
            assert!((alt.delta - (alt.total - rec.total())).abs() < 1e-12);
        }
    }

    #[test]
    fn test_alternatives_respect_strict_sets() {
        let fixture = Fixture::new();
        fixture.wardrobe(
            "u1",
            vec![
                ItemAttributes::new("blazer", slot::TOP, 3)
                    .with_set("s1", "suit", SetCohesionPolicy::Strict),
                ItemAttributes::new("suit-trousers", slot::BOTTOM, 3)
                    .with_set("s1", "suit", SetCohesionPolicy::Strict),
                ItemAttributes::new("loafers", slot::FOOTWEAR, 3),
                ItemAttributes::new("odd-trousers", slot::BOTTOM, 3)
                    .with_set("s1", "separates", SetCohesionPolicy::Strict),
                ItemAttributes::new("chinos", slot::BOTTOM, 3),
            ],
        );
        let recommender = fixture.recommender(EngineConfig::default());
        let rec = recommender.generate(&RecommendRequest::new("u1")).unwrap();
        assert_eq!(rec.item(slot::TOP).unwrap().item_id, "blazer");

        let alternatives = recommender
            .alternatives("u1", &rec.outfit_id, slot::BOTTOM, 10)
            .unwrap();
        assert!(alternatives.iter().all(|a| a.item_id != "odd-trousers"));
    }

    #[test]
    fn test_alternatives_errors() {
        let fixture = Fixture::new();
        fixture.wardrobe("u1", basic_wardrobe());
        let recommender = fixture.recommender(EngineConfig::default());

        assert!(matches!(
            recommender.alternatives("u1", &Uuid::new_v4(), slot::TOP, 3),
            Err(Error::OutfitNotFound(_))
        ));

        let rec = recommender.generate(&RecommendRequest::new("u1")).unwrap();
        assert!(matches!(
            recommender.alternatives("u1", &rec.outfit_id, "cape", 3),
            Err(Error::InvalidInput(_))
        ));
        assert!(recommender
            .alternatives("u1", &rec.outfit_id, slot::TOP, 0)
            .unwrap()
            .is_empty());
        // Another user cannot read this outfit
        assert!(recommender
            .alternatives("u2", &rec.outfit_id, slot::TOP, 3)
            .is_err());
    }

    #[test]
    fn test_request_json_aliases() {
        let request: RecommendRequest = serde_json::from_str(
            r#"{"user_id": "u1", "target_dressiness": 4, "temperature_band": "cold"}"#,
        )
        .unwrap();
        assert_eq!(request.target_formality, Some(4));
        assert_eq!(request.climate_band, Some(ClimateBand::Cold));
        assert!(!request.allow_catalog);
    }
}
