use std::sync::Arc;

use mealgrid_plan::{
    PlanEditor, PlanStore, RecipeCollection, SaveWindows, SessionGate, UserContext,
};
use mealgrid_shared::{RecipeRef, Result, WeekKey};
use mealgrid_shopping::{IngredientCategorizer, ShoppingAggregator, ShoppingList};

/// Wires the engine's collaborators together for the presentation layer:
/// the plan store, session gate, recipe collection and ingredient
/// categorizer, plus the configured debounce windows.
pub struct Planner {
    store: Arc<dyn PlanStore>,
    gate: Arc<dyn SessionGate>,
    recipes: Arc<dyn RecipeCollection>,
    aggregator: ShoppingAggregator,
    windows: SaveWindows,
}

impl Planner {
    pub fn new(
        store: Arc<dyn PlanStore>,
        gate: Arc<dyn SessionGate>,
        recipes: Arc<dyn RecipeCollection>,
        categorizer: Arc<dyn IngredientCategorizer>,
        windows: SaveWindows,
    ) -> Self {
        Self {
            store,
            gate,
            recipes,
            aggregator: ShoppingAggregator::new(categorizer),
            windows,
        }
    }

    /// Open the editing session for one (user, week). The persisted plan
    /// is used when one exists, an empty plan otherwise.
    pub async fn open_week(&self, user: UserContext, week: WeekKey) -> Result<PlanEditor> {
        PlanEditor::open(
            user,
            week,
            self.store.clone(),
            self.gate.clone(),
            self.windows,
        )
        .await
    }

    pub async fn open_current_week(&self, user: UserContext) -> Result<PlanEditor> {
        self.open_week(user, WeekKey::current()).await
    }

    pub async fn saved_recipes(&self, user: &UserContext) -> Result<Vec<RecipeRef>> {
        self.recipes.list_saved_recipes(user).await
    }

    /// Shopping list for everything currently assigned in the week.
    pub async fn shopping_list_for_week(&self, editor: &PlanEditor) -> Result<ShoppingList> {
        self.aggregator.aggregate(&editor.assigned_recipes()).await
    }

    /// Shopping list for a single recipe.
    pub async fn shopping_list_for_recipe(&self, recipe: &RecipeRef) -> Result<ShoppingList> {
        self.aggregator.aggregate(std::slice::from_ref(recipe)).await
    }
}
