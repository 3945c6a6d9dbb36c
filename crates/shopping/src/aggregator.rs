use std::collections::HashSet;
use std::sync::Arc;

use mealgrid_shared::{RecipeRef, Result};

use crate::{CategorySection, IngredientCategorizer, ShoppingList};

/// Builds a categorized shopping list from one or many recipes.
///
/// The categorization itself belongs to the collaborator; this service is
/// purely structural: flatten ingredients in recipe order, keep category
/// order deterministic (first appearance in the merged input), collapse
/// byte-identical display items, and recount. Textually distinct
/// ingredient strings stay distinct entries even when they name the same
/// thing; no unit merging happens here.
pub struct ShoppingAggregator {
    categorizer: Arc<dyn IngredientCategorizer>,
}

impl ShoppingAggregator {
    pub fn new(categorizer: Arc<dyn IngredientCategorizer>) -> Self {
        Self { categorizer }
    }

    /// Aggregate the recipes into a shopping list. A categorization
    /// failure fails the whole call; no partial list is returned.
    pub async fn aggregate(&self, recipes: &[RecipeRef]) -> Result<ShoppingList> {
        let flattened: Vec<String> = recipes
            .iter()
            .flat_map(|recipe| recipe.ingredients.iter().cloned())
            .collect();

        if flattened.is_empty() {
            return Ok(ShoppingList::empty());
        }

        let context: String = recipes
            .iter()
            .filter(|recipe| !recipe.ingredients.is_empty())
            .map(|recipe| recipe.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let raw = self.categorizer.categorize(&flattened, &context).await?;
        let estimated_cost = raw.estimated_cost;

        let normalized_input: Vec<String> = flattened
            .iter()
            .map(|ingredient| ingredient.trim().to_lowercase())
            .collect();

        let mut ordered: Vec<(usize, usize, CategorySection)> = raw
            .categories
            .into_iter()
            .enumerate()
            .map(|(position, mut section)| {
                let mut seen = HashSet::new();
                section.items.retain(|item| seen.insert(item.clone()));

                let first_seen = section
                    .items
                    .iter()
                    .filter_map(|item| first_input_index(&normalized_input, item))
                    .min()
                    .unwrap_or(usize::MAX);

                (first_seen, position, section)
            })
            .collect();
        ordered.sort_by_key(|(first_seen, position, _)| (*first_seen, *position));

        let categories: Vec<CategorySection> = ordered
            .into_iter()
            .map(|(_, _, section)| section)
            .collect();
        let total_items = categories.iter().map(|section| section.items.len()).sum();

        tracing::debug!(
            recipes = recipes.len(),
            total_items,
            categories = categories.len(),
            "aggregated shopping list"
        );

        Ok(ShoppingList {
            categories,
            total_items,
            estimated_cost,
        })
    }
}

/// Position of the first flattened ingredient a display item plausibly
/// came from. Display items are often shortened forms of the free-text
/// ingredient ("Chicken breast" for "1 lb chicken breast"), so matching is
/// containment either way.
fn first_input_index(normalized_input: &[String], item: &str) -> Option<usize> {
    let needle = item.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    normalized_input
        .iter()
        .position(|ingredient| ingredient.contains(&needle) || needle.contains(ingredient.as_str()))
}
