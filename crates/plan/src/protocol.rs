use std::str::FromStr;

use mealgrid_shared::{RecipeRef, Result};
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{Day, MealSlot, PlanEditor};

/// Serializable recipe payload captured when a drag gesture picks a recipe
/// up. The payload travels through whatever transfer channel the gesture
/// surface provides and is decoded again at drop time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferPayload {
    pub recipe: RecipeRef,
}

impl TransferPayload {
    pub fn pick_up(recipe: RecipeRef) -> Self {
        Self { recipe }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self).map_err(anyhow::Error::from)?)
    }

    /// Decode a raw transfer string. Malformed payloads yield `None` and
    /// are silently discarded by the drop path.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// A validated (day, slot) drop cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub day: Day,
    pub slot: MealSlot,
}

impl DropTarget {
    /// Parse the day/slot identifiers a gesture surface carries. Anything
    /// outside the closed enumerations is not a cell.
    pub fn parse(day: &str, slot: &str) -> Option<Self> {
        Some(Self {
            day: Day::from_str(day).ok()?,
            slot: MealSlot::from_str(slot).ok()?,
        })
    }
}

/// Menu-driven (day, slot) choice. Defaults to the first value of each
/// enumeration, matching the modal's initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSelection {
    pub day: Day,
    pub slot: MealSlot,
}

impl Default for SlotSelection {
    fn default() -> Self {
        Self {
            day: Day::VARIANTS[0],
            slot: MealSlot::VARIANTS[0],
        }
    }
}

/// The single entry point both transfer paths converge on. Always assigns:
/// once a target cell and a recipe are both present there is no rejection
/// path (overwrite semantics).
pub fn request_assignment(editor: &mut PlanEditor, day: Day, slot: MealSlot, recipe: RecipeRef) {
    editor.assign(day, slot, recipe);
}

/// Drop path. Drops outside any cell and malformed payloads are ignored;
/// returns whether an assignment was made.
pub fn drop_onto(editor: &mut PlanEditor, target: Option<DropTarget>, raw: &str) -> bool {
    let Some(target) = target else {
        return false;
    };
    let Some(payload) = TransferPayload::decode(raw) else {
        tracing::debug!("discarding malformed transfer payload");
        return false;
    };

    request_assignment(editor, target.day, target.slot, payload.recipe);
    true
}

/// Selection path: the confirmed modal choice.
pub fn confirm_selection(editor: &mut PlanEditor, selection: SlotSelection, recipe: RecipeRef) {
    request_assignment(editor, selection.day, selection.slot, recipe);
}
