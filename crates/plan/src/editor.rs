use std::sync::Arc;

use mealgrid_shared::{RecipeRef, Result, WeekKey};

use crate::{
    Day, MealAssignment, MealSlot, PlanStore, SaveScheduler, SaveState, SaveTrigger, SaveWindows,
    SessionGate, UserContext, WeekPlan,
};

/// Assignment engine for one week plan.
///
/// Owns the grid for the week being edited and the save scheduler that
/// persists it. One editor exists per active editing session; navigating
/// to another week means discarding this editor and opening a new one.
pub struct PlanEditor {
    plan: WeekPlan,
    scheduler: SaveScheduler,
}

impl PlanEditor {
    /// Open the editor for (user, week): the persisted plan when one
    /// exists, an empty plan otherwise. A store error (as opposed to
    /// absence) is returned to the caller.
    pub async fn open(
        user: UserContext,
        week: WeekKey,
        store: Arc<dyn PlanStore>,
        gate: Arc<dyn SessionGate>,
        windows: SaveWindows,
    ) -> Result<Self> {
        let plan = match store.load_plan(&user, week).await? {
            Some(plan) => {
                tracing::debug!(week = %week, assignments = plan.len(), "loaded persisted week plan");
                plan
            }
            None => WeekPlan::new(week),
        };

        Ok(Self {
            plan,
            scheduler: SaveScheduler::new(user, windows, store, gate),
        })
    }

    /// Open with an empty plan without consulting the store. Boundary
    /// fallback for when a load call errored and was surfaced.
    pub fn open_empty(
        user: UserContext,
        week: WeekKey,
        store: Arc<dyn PlanStore>,
        gate: Arc<dyn SessionGate>,
        windows: SaveWindows,
    ) -> Self {
        Self {
            plan: WeekPlan::new(week),
            scheduler: SaveScheduler::new(user, windows, store, gate),
        }
    }

    pub fn week(&self) -> WeekKey {
        self.plan.week()
    }

    pub fn plan(&self) -> &WeekPlan {
        &self.plan
    }

    pub fn assignment(&self, day: Day, slot: MealSlot) -> Option<&MealAssignment> {
        self.plan.assignment(day, slot)
    }

    pub fn assignments(&self) -> impl Iterator<Item = &MealAssignment> {
        self.plan.assignments()
    }

    /// The assigned recipes in grid iteration order, cloned for
    /// aggregation.
    pub fn assigned_recipes(&self) -> Vec<RecipeRef> {
        self.plan.recipes().cloned().collect()
    }

    /// Assign a recipe to a cell, unconditionally overwriting any existing
    /// assignment there (last-write-wins), and schedule a debounced save.
    pub fn assign(&mut self, day: Day, slot: MealSlot, recipe: RecipeRef) {
        tracing::debug!(%day, %slot, title = %recipe.title, "assigning recipe");
        self.plan
            .set_assignment(MealAssignment::new(day, slot, recipe));
        self.scheduler
            .schedule(SaveTrigger::Assign, self.plan.clone());
    }

    /// Remove the assignment at (day, slot). A save is scheduled only when
    /// a mutation actually occurred; removing from an empty cell is a
    /// silent no-op.
    pub fn remove(&mut self, day: Day, slot: MealSlot) -> bool {
        if self.plan.remove_assignment(day, slot).is_none() {
            return false;
        }

        tracing::debug!(%day, %slot, "removed assignment");
        self.scheduler
            .schedule(SaveTrigger::Remove, self.plan.clone());
        true
    }

    /// Empty the whole plan and persist immediately, bypassing the
    /// debounce window. Confirmation UX is the caller's concern.
    pub async fn clear_all(&mut self) {
        tracing::debug!(week = %self.plan.week(), "clearing week plan");
        self.plan.clear();
        self.scheduler.flush_now(self.plan.clone()).await;
    }

    pub fn save_state(&self) -> SaveState {
        self.scheduler.state()
    }

    /// Discard this editing session: any pending un-fired save is
    /// cancelled, an in-flight one completes fire-and-forget.
    pub fn discard(self) {
        self.scheduler.cancel();
    }
}
