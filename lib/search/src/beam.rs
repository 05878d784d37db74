//! Beam search over template slots
//!
//! Slots are filled in template order (required first, then optional). Each
//! step expands every partial outfit in the beam with every admissible
//! candidate of the slot, rescores the full item set and keeps the best
//! `beam_width` expansions.

use crate::constraints::check_hard_constraints;
use crate::seed::DeterminismSeed;
use ahash::AHashSet;
use drape_core::{Error, ItemAttributes, Result, Template};
use drape_scoring::{ScoreCard, Scorer, ScoringContext};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Candidate lists keyed by slot name, best first
pub type CandidatesBySlot = HashMap<String, Vec<ItemAttributes>>;

/// Below this many expansions a step is scored on the calling thread
const PARALLEL_THRESHOLD: usize = 64;

/// How expansions with equal scores are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the order in which expansions were generated
    #[default]
    InsertionOrder,
    /// Order ties by a key derived from the request seed
    Seeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    pub beam_width: usize,
    /// Only the first N candidates of each slot are considered
    pub max_candidates_per_slot: usize,
    /// Score expansions on the rayon pool
    pub parallel: bool,
    pub tie_break: TieBreak,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            beam_width: 20,
            max_candidates_per_slot: 10,
            parallel: true,
            tie_break: TieBreak::InsertionOrder,
        }
    }
}

impl BeamConfig {
    pub fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(Error::InvalidInput("beam_width must be at least 1".to_string()));
        }
        if self.max_candidates_per_slot == 0 {
            return Err(Error::InvalidInput(
                "max_candidates_per_slot must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial outfit held in the beam. Slots and items are parallel.
#[derive(Debug, Clone)]
pub struct PartialAssignment<'a> {
    slots: SmallVec<[&'a str; 8]>,
    items: SmallVec<[&'a ItemAttributes; 8]>,
    score: f64,
}

impl<'a> PartialAssignment<'a> {
    fn empty() -> Self {
        Self {
            slots: SmallVec::new(),
            items: SmallVec::new(),
            score: 0.0,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[&'a ItemAttributes] {
        &self.items
    }

    pub fn get(&self, slot_name: &str) -> Option<&'a ItemAttributes> {
        self.slots
            .iter()
            .position(|s| *s == slot_name)
            .map(|i| self.items[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a ItemAttributes)> + '_ {
        self.slots.iter().copied().zip(self.items.iter().copied())
    }

    fn chosen(&self) -> SmallVec<[(&'a str, &'a ItemAttributes); 8]> {
        self.iter().collect()
    }

    fn extend(&self, slot_name: &'a str, item: &'a ItemAttributes) -> Self {
        let mut next = self.clone();
        next.slots.push(slot_name);
        next.items.push(item);
        next
    }
}

/// One filled slot of the winning outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot: String,
    pub item: ItemAttributes,
}

/// Counters gathered over one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub expansions_scored: usize,
    pub constraint_rejections: usize,
    /// Optional slots left unfilled
    pub skipped_slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Filled slots in template order
    pub assignment: Vec<SlotAssignment>,
    pub card: ScoreCard,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn item(&self, slot_name: &str) -> Option<&ItemAttributes> {
        self.assignment
            .iter()
            .find(|a| a.slot == slot_name)
            .map(|a| &a.item)
    }

    pub fn item_ids(&self) -> Vec<&str> {
        self.assignment.iter().map(|a| a.item.item_id.as_str()).collect()
    }
}

/// Beam search driver
#[derive(Debug, Clone, Default)]
pub struct BeamSearch {
    config: BeamConfig,
    seed: Option<DeterminismSeed>,
}

impl BeamSearch {
    pub fn new(config: BeamConfig) -> Self {
        Self { config, seed: None }
    }

    /// Seed used for [`TieBreak::Seeded`]
    #[must_use]
    pub fn with_seed(mut self, seed: DeterminismSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &BeamConfig {
        &self.config
    }

    /// Find the best-scoring assignment of candidates to the template's slots.
    ///
    /// Fails with [`Error::Infeasible`] when a required slot has no candidates
    /// or when no candidate of a processed slot survives the hard constraints.
    /// An optional slot without candidates is left out.
    pub fn search<'a>(
        &self,
        template: &'a Template,
        candidates: &'a CandidatesBySlot,
        scorer: &Scorer,
        ctx: &ScoringContext<'_>,
    ) -> Result<SearchOutcome> {
        self.config.validate()?;
        validate_template(template)?;

        let missing: Vec<&str> = template
            .slots
            .iter()
            .map(String::as_str)
            .filter(|s| candidates.get(*s).map_or(true, Vec::is_empty))
            .collect();
        if !missing.is_empty() {
            return Err(Error::infeasible(
                &template.template_id,
                format!("no candidates for required slot(s): {}", missing.join(", ")),
            ));
        }

        let mut stats = SearchStats::default();
        let mut beam = vec![PartialAssignment::empty()];

        for slot_name in template.all_slots() {
            let offered = match candidates.get(slot_name) {
                Some(list) if !list.is_empty() => {
                    &list[..list.len().min(self.config.max_candidates_per_slot)]
                }
                _ => {
                    debug!(template = %template.template_id, slot = slot_name, "no candidates, slot skipped");
                    stats.skipped_slots.push(slot_name.to_string());
                    continue;
                }
            };
            for item in offered {
                item.validate()?;
            }

            let (expansions, rejected) = self.expand(&beam, slot_name, offered, scorer, ctx);
            stats.expansions_scored += expansions.len();
            stats.constraint_rejections += rejected;

            if expansions.is_empty() {
                warn!(template = %template.template_id, slot = slot_name, rejected, "no admissible expansion, search aborted");
                return Err(Error::infeasible(
                    &template.template_id,
                    format!("every candidate for slot '{slot_name}' violates a hard constraint"),
                ));
            }

            beam = self.prune(expansions);
            debug!(
                template = %template.template_id,
                slot = slot_name,
                beam = beam.len(),
                best = beam.first().map(|b| b.score).unwrap_or_default(),
                rejected,
                "slot expanded"
            );
        }

        let best = beam
            .into_iter()
            .next()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::infeasible(&template.template_id, "no slot could be filled"))?;

        let card = scorer.score(best.items(), ctx);
        let assignment = best
            .iter()
            .map(|(slot, item)| SlotAssignment {
                slot: slot.to_string(),
                item: item.clone(),
            })
            .collect();

        Ok(SearchOutcome {
            assignment,
            card,
            stats,
        })
    }

    /// All admissible (parent, candidate) expansions, in parent-major order.
    /// Returns the expansions and the number of rejected pairs.
    fn expand<'a>(
        &self,
        beam: &[PartialAssignment<'a>],
        slot_name: &'a str,
        offered: &'a [ItemAttributes],
        scorer: &Scorer,
        ctx: &ScoringContext<'_>,
    ) -> (Vec<PartialAssignment<'a>>, usize) {
        let expand_one = |(parent, candidate): (&PartialAssignment<'a>, &'a ItemAttributes)| {
            if let Err(violation) = check_hard_constraints(&parent.chosen(), slot_name, candidate) {
                debug!(slot = slot_name, item = %candidate.item_id, %violation, "candidate rejected");
                return None;
            }
            let mut next = parent.extend(slot_name, candidate);
            next.score = scorer.score(next.items(), ctx).total;
            Some(next)
        };

        let pairs: Vec<(&PartialAssignment<'a>, &'a ItemAttributes)> = beam
            .iter()
            .flat_map(|parent| offered.iter().map(move |candidate| (parent, candidate)))
            .collect();
        let total = pairs.len();

        // par_iter().map().collect() preserves input order
        let results: Vec<Option<PartialAssignment<'a>>> =
            if self.config.parallel && total >= PARALLEL_THRESHOLD {
                pairs.into_par_iter().map(expand_one).collect()
            } else {
                pairs.into_iter().map(expand_one).collect()
            };

        let expansions: Vec<PartialAssignment<'a>> = results.into_iter().flatten().collect();
        let rejected = total - expansions.len();
        (expansions, rejected)
    }

    /// Stable sort by score, descending, then keep the beam width
    fn prune<'a>(&self, mut expansions: Vec<PartialAssignment<'a>>) -> Vec<PartialAssignment<'a>> {
        match (self.config.tie_break, self.seed.as_ref()) {
            (TieBreak::Seeded, Some(seed)) => expansions.sort_by_cached_key(|e| {
                (
                    Reverse(OrderedFloat(e.score)),
                    seed.tie_key(e.items.iter().map(|item| item.item_id.as_str())),
                )
            }),
            _ => expansions.sort_by_key(|e| Reverse(OrderedFloat(e.score))),
        }
        expansions.truncate(self.config.beam_width);
        expansions
    }
}

fn validate_template(template: &Template) -> Result<()> {
    let mut seen = AHashSet::new();
    for slot_name in template.all_slots() {
        if slot_name.is_empty() {
            return Err(Error::InvalidInput(format!(
                "template '{}' has an empty slot name",
                template.template_id
            )));
        }
        if !seen.insert(slot_name) {
            return Err(Error::InvalidInput(format!(
                "template '{}' lists slot '{slot_name}' more than once",
                template.template_id
            )));
        }
    }
    Ok(())
}
