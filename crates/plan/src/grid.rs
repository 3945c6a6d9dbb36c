use std::collections::BTreeMap;

use mealgrid_shared::{RecipeRef, WeekKey};
use serde::{Deserialize, Serialize};

use crate::{Day, MealAssignment, MealSlot};

/// Sparse 7x3 assignment grid for one calendar week.
///
/// Absence of a day or slot key means "empty"; no explicit empty markers
/// are stored, and a day whose last slot is removed is pruned. Iteration
/// is calendar order (day, then slot), so rendering and shopping-list
/// aggregation over the same plan are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    #[serde(rename = "week_start")]
    week: WeekKey,
    #[serde(rename = "plan", default)]
    days: BTreeMap<Day, BTreeMap<MealSlot, MealAssignment>>,
}

impl WeekPlan {
    pub fn new(week: WeekKey) -> Self {
        Self {
            week,
            days: BTreeMap::new(),
        }
    }

    pub fn week(&self) -> WeekKey {
        self.week
    }

    pub fn assignment(&self, day: Day, slot: MealSlot) -> Option<&MealAssignment> {
        self.days.get(&day).and_then(|slots| slots.get(&slot))
    }

    /// Insert an assignment under its own (day, slot) key, replacing any
    /// previous occupant of that cell.
    pub fn set_assignment(&mut self, assignment: MealAssignment) {
        self.days
            .entry(assignment.day)
            .or_default()
            .insert(assignment.slot, assignment);
    }

    /// Remove and return the assignment at (day, slot) if present, pruning
    /// the day entry when it empties.
    pub fn remove_assignment(&mut self, day: Day, slot: MealSlot) -> Option<MealAssignment> {
        let slots = self.days.get_mut(&day)?;
        let removed = slots.remove(&slot);

        if slots.is_empty() {
            self.days.remove(&day);
        }

        removed
    }

    /// True iff no slot under the day holds an assignment.
    pub fn is_day_empty(&self, day: Day) -> bool {
        !self.days.contains_key(&day)
    }

    /// All assignments, flattened in day order then slot order.
    pub fn assignments(&self) -> impl Iterator<Item = &MealAssignment> {
        self.days.values().flat_map(|slots| slots.values())
    }

    /// The assigned recipes in grid iteration order.
    pub fn recipes(&self) -> impl Iterator<Item = &RecipeRef> {
        self.assignments().map(|assignment| &assignment.recipe)
    }

    pub fn len(&self) -> usize {
        self.days.values().map(|slots| slots.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }
}

#[cfg(test)]
mod tests {
    use mealgrid_shared::RecipeRef;
    use strum::VariantArray;

    use super::*;

    fn plan() -> WeekPlan {
        WeekPlan::new(WeekKey::parse("2025-01-20").unwrap())
    }

    fn assignment(day: Day, slot: MealSlot, title: &str) -> MealAssignment {
        MealAssignment::new(day, slot, RecipeRef::new(title))
    }

    #[test]
    fn test_assignment_fields_match_cell_for_every_pair() {
        let mut plan = plan();

        for day in Day::VARIANTS {
            for slot in MealSlot::VARIANTS {
                plan.set_assignment(assignment(*day, *slot, "Omelette"));
            }
        }

        for day in Day::VARIANTS {
            for slot in MealSlot::VARIANTS {
                let stored = plan.assignment(*day, *slot).unwrap();
                assert_eq!(stored.day, *day);
                assert_eq!(stored.slot, *slot);
            }
        }
        assert_eq!(plan.len(), 21);
    }

    #[test]
    fn test_set_assignment_overwrites_cell() {
        let mut plan = plan();

        plan.set_assignment(assignment(Day::Monday, MealSlot::Dinner, "Soup"));
        plan.set_assignment(assignment(Day::Monday, MealSlot::Dinner, "Stew"));

        let stored = plan.assignment(Day::Monday, MealSlot::Dinner).unwrap();
        assert_eq!(stored.recipe.title, "Stew");
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_removing_last_slot_prunes_day() {
        let mut plan = plan();
        plan.set_assignment(assignment(Day::Friday, MealSlot::Lunch, "Salad"));
        plan.set_assignment(assignment(Day::Friday, MealSlot::Dinner, "Pasta"));

        assert!(plan.remove_assignment(Day::Friday, MealSlot::Lunch).is_some());
        assert!(!plan.is_day_empty(Day::Friday));

        assert!(plan.remove_assignment(Day::Friday, MealSlot::Dinner).is_some());
        assert!(plan.is_day_empty(Day::Friday));
        assert!(plan.is_empty());
        assert_eq!(plan.assignments().count(), 0);
    }

    #[test]
    fn test_remove_on_empty_cell_is_none() {
        let mut plan = plan();

        assert!(plan.remove_assignment(Day::Tuesday, MealSlot::Breakfast).is_none());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_assignments_iterate_in_calendar_order() {
        let mut plan = plan();
        plan.set_assignment(assignment(Day::Sunday, MealSlot::Breakfast, "Pancakes"));
        plan.set_assignment(assignment(Day::Monday, MealSlot::Dinner, "Curry"));
        plan.set_assignment(assignment(Day::Monday, MealSlot::Breakfast, "Toast"));

        let titles: Vec<_> = plan
            .assignments()
            .map(|a| a.recipe.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Toast", "Curry", "Pancakes"]);
    }

    #[test]
    fn test_serializes_with_lowercase_keys() {
        let mut plan = plan();
        plan.set_assignment(assignment(Day::Monday, MealSlot::Dinner, "Curry"));

        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["week_start"], "2025-01-20");
        assert_eq!(json["plan"]["monday"]["dinner"]["recipe"]["title"], "Curry");
        assert!(json["plan"].get("tuesday").is_none());

        let restored: WeekPlan = serde_json::from_value(json).unwrap();
        assert_eq!(restored, plan);
    }
}
