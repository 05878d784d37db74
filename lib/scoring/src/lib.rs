//! # Drape Scoring
//!
//! Multi-factor compatibility scoring for outfits.
//!
//! A candidate item set is scored on ten independent factors, each roughly in
//! `[0.0, 1.0]`, and the factors are combined into an unnormalized weighted sum.
//!
//! ## Factors
//!
//! | Sub-score      | Looks at                                            |
//! |----------------|-----------------------------------------------------|
//! | `palette`      | circular hue distance between every colored pair    |
//! | `pattern`      | how many items are patterned                        |
//! | `silhouette`   | top/bottom fit pairing                              |
//! | `formality`    | mean deviation from the target formality            |
//! | `climate`      | declared climate bands vs. the active band          |
//! | `style`        | item style tags shared with the user                |
//! | `novelty`      | overlap with recently worn items                    |
//! | `consistency`  | leather/metal family mixing, per accessory mode     |
//! | `skin_synergy` | near-face colors against skin (needs appearance)    |
//! | `proportion`   | rise/length/waist cuts against body (needs body)    |
//!
//! ## Example
//!
//! ```rust
//! use drape_core::{slot, ClimateBand, ItemAttributes};
//! use drape_scoring::{Scorer, ScoringContext, ScoringWeights, Subscore};
//!
//! let top = ItemAttributes::new("top-1", slot::TOP, 3);
//! let bottom = ItemAttributes::new("bottom-1", slot::BOTTOM, 3);
//!
//! let scorer = Scorer::new(ScoringWeights::default());
//! let card = scorer.score(&[&top, &bottom], &ScoringContext::new(3, ClimateBand::Warm));
//! assert_eq!(card.get(Subscore::Formality), 1.0);
//! ```

pub mod engine;
pub mod explain;
pub mod factors;
pub mod weights;

pub use engine::{ScoreCard, Scorer, ScoringContext};
pub use explain::{Contribution, ScoreBreakdown};
pub use weights::{ScoringWeights, Subscore, WeightError, SUBSCORE_COUNT};
