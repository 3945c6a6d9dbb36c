use mealgrid_shared::RecipeRef;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

/// The record occupying one (day, slot) cell of a week plan.
///
/// Invariant: `day` and `slot` always equal the cell key the assignment is
/// stored under. Only [`crate::PlanEditor`] constructs assignments, and
/// [`crate::WeekPlan::set_assignment`] keys by these fields, so a mismatch
/// cannot be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAssignment {
    pub day: Day,
    pub slot: MealSlot,
    pub recipe: RecipeRef,
}

impl MealAssignment {
    pub fn new(day: Day, slot: MealSlot, recipe: RecipeRef) -> Self {
        Self { day, slot, recipe }
    }
}

/// Opaque user handle, used only to key the plan store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
