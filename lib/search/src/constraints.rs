//! Hard constraints
//!
//! Rules that exclude a candidate outright instead of lowering its score.
//! An item counts as a given kind when it fills a slot of that name or when
//! its own functional slot has that name.

use drape_core::{slot, ItemAttributes, SetCohesionPolicy};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintViolation {
    #[error("one-piece '{one_piece}' cannot be worn with top '{top}'")]
    OnePieceWithTop { one_piece: String, top: String },

    #[error("set '{group_id}' is strict: '{anchor}' requires role {expected:?}, candidate has {found:?}")]
    StrictSetRole {
        group_id: String,
        anchor: String,
        expected: Option<String>,
        found: Option<String>,
    },
}

#[inline]
fn is_kind(filled_slot: &str, item: &ItemAttributes, kind: &str) -> bool {
    filled_slot == kind || item.slot == kind
}

/// Check whether `candidate`, placed in `filling_slot`, may join `chosen`
pub fn check_hard_constraints(
    chosen: &[(&str, &ItemAttributes)],
    filling_slot: &str,
    candidate: &ItemAttributes,
) -> Result<(), ConstraintViolation> {
    let candidate_is_top = is_kind(filling_slot, candidate, slot::TOP);
    let candidate_is_one_piece = is_kind(filling_slot, candidate, slot::ONE_PIECE);

    if candidate_is_top || candidate_is_one_piece {
        for (placed_slot, item) in chosen {
            if candidate_is_top && is_kind(placed_slot, item, slot::ONE_PIECE) {
                return Err(ConstraintViolation::OnePieceWithTop {
                    one_piece: item.item_id.clone(),
                    top: candidate.item_id.clone(),
                });
            }
            if candidate_is_one_piece && is_kind(placed_slot, item, slot::TOP) {
                return Err(ConstraintViolation::OnePieceWithTop {
                    one_piece: candidate.item_id.clone(),
                    top: item.item_id.clone(),
                });
            }
        }
    }

    if let Some(group_id) = candidate.group() {
        let strict_anchor = chosen.iter().map(|(_, item)| *item).find(|item| {
            item.group() == Some(group_id)
                && item.set_cohesion_policy == Some(SetCohesionPolicy::Strict)
                && item.set_role != candidate.set_role
        });
        if let Some(anchor) = strict_anchor {
            return Err(ConstraintViolation::StrictSetRole {
                group_id: group_id.to_string(),
                anchor: anchor.item_id.clone(),
                expected: anchor.set_role.clone(),
                found: candidate.set_role.clone(),
            });
        }
    }

    Ok(())
}
