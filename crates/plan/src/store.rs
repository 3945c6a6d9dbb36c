use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use mealgrid_shared::{RecipeRef, Result, WeekKey};
use tokio::sync::Mutex;

use crate::{UserContext, WeekPlan};

/// External key-value persistence for week plans, keyed by user and week.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Load the persisted plan, `None` when the user has never saved one
    /// for that week.
    async fn load_plan(&self, user: &UserContext, week: WeekKey) -> Result<Option<WeekPlan>>;

    async fn save_plan(&self, user: &UserContext, week: WeekKey, plan: &WeekPlan) -> Result<()>;
}

/// External recipe collection owning the user's saved recipes.
#[async_trait]
pub trait RecipeCollection: Send + Sync {
    async fn list_saved_recipes(&self, user: &UserContext) -> Result<Vec<RecipeRef>>;
}

/// Session/auth provider, consulted only as a save gate.
pub trait SessionGate: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

/// In-memory [`PlanStore`], used by tests and demos.
///
/// Counts outbound saves so debounce coalescing is observable.
#[derive(Default)]
pub struct MemoryPlanStore {
    plans: Mutex<HashMap<(String, WeekKey), WeekPlan>>,
    saves: AtomicU64,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of save calls that reached this store.
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn stored_plan(&self, user: &UserContext, week: WeekKey) -> Option<WeekPlan> {
        self.plans
            .lock()
            .await
            .get(&(user.user_id.clone(), week))
            .cloned()
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn load_plan(&self, user: &UserContext, week: WeekKey) -> Result<Option<WeekPlan>> {
        Ok(self
            .plans
            .lock()
            .await
            .get(&(user.user_id.clone(), week))
            .cloned())
    }

    async fn save_plan(&self, user: &UserContext, week: WeekKey, plan: &WeekPlan) -> Result<()> {
        self.plans
            .lock()
            .await
            .insert((user.user_id.clone(), week), plan.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
