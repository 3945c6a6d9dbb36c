use async_trait::async_trait;
use mealgrid_shared::Result;

use crate::CategorizedIngredients;

/// External service that groups free-text ingredient strings into purchase
/// categories. The grid and aggregation structure is this crate's concern;
/// the keyword-to-category mapping is content, owned behind this seam.
#[async_trait]
pub trait IngredientCategorizer: Send + Sync {
    /// Categorize one batch of ingredient strings. `context_name` labels
    /// the request (typically the recipe titles the batch came from).
    async fn categorize(
        &self,
        ingredients: &[String],
        context_name: &str,
    ) -> Result<CategorizedIngredients>;
}
