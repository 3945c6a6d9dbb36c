use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mealgrid::config::Config;
use mealgrid::Planner;
use mealgrid_plan::{
    confirm_selection, drop_onto, Day, DropTarget, MealSlot, MemoryPlanStore, RecipeCollection,
    SessionGate, SlotSelection, TransferPayload, UserContext,
};
use mealgrid_shared::{RecipeRef, Result, WeekKey};
use mealgrid_shopping::KeywordCategorizer;

struct Authenticated;

impl SessionGate for Authenticated {
    fn is_authenticated(&self) -> bool {
        true
    }
}

struct FixedCollection {
    recipes: Vec<RecipeRef>,
}

#[async_trait]
impl RecipeCollection for FixedCollection {
    async fn list_saved_recipes(&self, _user: &UserContext) -> Result<Vec<RecipeRef>> {
        Ok(self.recipes.clone())
    }
}

fn recipe(title: &str, ingredients: &[&str]) -> RecipeRef {
    RecipeRef {
        id: Some(format!("recipe-{}", title.to_lowercase().replace(' ', "-"))),
        title: title.to_string(),
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
        cooking_time: Some(30),
        servings: Some(4),
    }
}

fn planner(store: Arc<MemoryPlanStore>, recipes: Vec<RecipeRef>) -> Planner {
    Planner::new(
        store,
        Arc::new(Authenticated),
        Arc::new(FixedCollection { recipes }),
        Arc::new(KeywordCategorizer::new()),
        Config::default().save.windows(),
    )
}

fn user() -> UserContext {
    UserContext::new("john")
}

fn week() -> WeekKey {
    WeekKey::parse("2025-01-20").unwrap()
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_assign_then_clear_all_end_to_end() {
    let store = Arc::new(MemoryPlanStore::new());
    let planner = planner(store.clone(), vec![]);
    let mut editor = planner.open_week(user(), week()).await.unwrap();

    editor.assign(Day::Monday, MealSlot::Dinner, recipe("Lentil curry", &[]));

    let assignments: Vec<_> = editor.assignments().collect();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].day, Day::Monday);
    assert_eq!(assignments[0].slot, MealSlot::Dinner);
    assert_eq!(assignments[0].recipe.title, "Lentil curry");

    editor.clear_all().await;
    assert_eq!(editor.assignments().count(), 0);
    // Clearing persisted immediately, without waiting out a debounce
    // window.
    assert_eq!(store.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drag_and_selection_paths_persist_through_the_grid() {
    let store = Arc::new(MemoryPlanStore::new());
    let planner = planner(store.clone(), vec![]);
    let mut editor = planner.open_week(user(), week()).await.unwrap();

    // Drag path: pick up a serialized payload, drop it on a cell.
    let raw = TransferPayload::pick_up(recipe("Shakshuka", &[]))
        .encode()
        .unwrap();
    assert!(drop_onto(
        &mut editor,
        DropTarget::parse("tuesday", "breakfast"),
        &raw
    ));

    // Selection path: modal choice confirmed.
    confirm_selection(
        &mut editor,
        SlotSelection {
            day: Day::Tuesday,
            slot: MealSlot::Dinner,
        },
        recipe("Ragu", &[]),
    );

    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;

    assert_eq!(store.save_count(), 1);
    let stored = store.stored_plan(&user(), week()).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(
        stored
            .assignment(Day::Tuesday, MealSlot::Breakfast)
            .unwrap()
            .recipe
            .title,
        "Shakshuka"
    );
}

#[tokio::test(start_paused = true)]
async fn test_navigating_weeks_reopens_independent_plans() {
    let store = Arc::new(MemoryPlanStore::new());
    let planner = planner(store.clone(), vec![]);

    let mut editor = planner.open_week(user(), week()).await.unwrap();
    editor.assign(Day::Monday, MealSlot::Lunch, recipe("Minestrone", &[]));
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    editor.discard();

    // The next week starts empty; the previous week's plan is untouched
    // in the store.
    let next = planner.open_week(user(), week().next()).await.unwrap();
    assert!(next.plan().is_empty());
    assert_eq!(next.week(), week().next());

    let reopened = planner.open_week(user(), week()).await.unwrap();
    assert_eq!(reopened.plan().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_saved_recipes_come_from_the_collection() {
    let store = Arc::new(MemoryPlanStore::new());
    let planner = planner(
        store,
        vec![recipe("Pad thai", &[]), recipe("Caesar salad", &[])],
    );

    let recipes = planner.saved_recipes(&user()).await.unwrap();

    let titles: Vec<_> = recipes.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Pad thai", "Caesar salad"]);
}
