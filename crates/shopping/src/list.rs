use serde::{Deserialize, Serialize};

/// One purchase category and its display items, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySection {
    pub name: String,
    pub items: Vec<String>,
}

/// Derived shopping list. Never persisted by this crate.
///
/// Sections are ordered by first appearance of their items in the
/// aggregated input, so repeated aggregation of the same recipes renders
/// identically. `estimated_cost` is whatever the categorization
/// collaborator supplied, passed through opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub categories: Vec<CategorySection>,
    pub total_items: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,
}

impl ShoppingList {
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            total_items: 0,
            estimated_cost: None,
        }
    }

    pub fn category(&self, name: &str) -> Option<&CategorySection> {
        self.categories.iter().find(|section| section.name == name)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|section| section.name.as_str())
    }
}

/// Inbound shape of one categorization call: grouped items, the
/// collaborator's own item count, and an opaque cost estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedIngredients {
    pub categories: Vec<CategorySection>,
    pub total_items: usize,
    #[serde(default)]
    pub estimated_cost: Option<String>,
}
