use serde::{Deserialize, Serialize};

/// Reference to a recipe as the grid and the aggregator see it.
///
/// Saved recipes carry their collection identifier in `id`; recipes that
/// have not been persisted yet (`id == None`) are carried as a full inline
/// copy instead. The denormalized fields are present in both cases so the
/// two variants flow through assignment and aggregation uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
}

impl RecipeRef {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            ingredients: Vec::new(),
            cooking_time: None,
            servings: None,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}
