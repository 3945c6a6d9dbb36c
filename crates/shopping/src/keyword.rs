use async_trait::async_trait;
use mealgrid_shared::Result;

use crate::{CategorizedIngredients, CategorySection, IngredientCategorizer};

/// Grocery category for store-aisle organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Produce,
    MeatSeafood,
    Dairy,
    Bakery,
    Pantry,
    Spices,
    Other,
}

impl Category {
    fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::MeatSeafood => "Meat & Seafood",
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Pantry => "Pantry",
            Category::Spices => "Spices & Seasonings",
            Category::Other => "Other",
        }
    }
}

/// Built-in [`IngredientCategorizer`] backed by a keyword table.
///
/// Ingredient strings are free text ("2 large tomatoes, diced"), so
/// matching is normalized substring containment rather than exact lookup.
/// The display item is the trimmed ingredient as written; no quantity
/// parsing or unit merging happens here. Unmatched ingredients land in
/// Other, and no cost estimate is supplied.
#[derive(Debug, Default)]
pub struct KeywordCategorizer;

impl KeywordCategorizer {
    pub fn new() -> Self {
        Self
    }

    fn classify(normalized: &str) -> Category {
        // Specific blends first: "onion powder" must not match the
        // produce keyword "onion".
        if Self::matches_any(normalized, SPICE_BLENDS) {
            return Category::Spices;
        }
        if Self::matches_any(normalized, PRODUCE) {
            return Category::Produce;
        }
        if Self::matches_any(normalized, MEAT_SEAFOOD) {
            return Category::MeatSeafood;
        }
        if Self::matches_any(normalized, DAIRY) {
            return Category::Dairy;
        }
        if Self::matches_any(normalized, BAKERY) {
            return Category::Bakery;
        }
        if Self::matches_any(normalized, SPICES) {
            return Category::Spices;
        }
        if Self::matches_any(normalized, PANTRY) {
            return Category::Pantry;
        }

        Category::Other
    }

    fn matches_any(normalized: &str, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| normalized.contains(keyword))
    }
}

const SPICE_BLENDS: &[&str] = &[
    "garlic powder", "onion powder", "chili powder", "curry powder", "celery salt",
];

const PRODUCE: &[&str] = &[
    "tomato", "onion", "garlic", "lettuce", "carrot", "celery", "bell pepper",
    "cucumber", "zucchini", "broccoli", "cauliflower", "spinach", "kale", "cabbage", "potato",
    "mushroom", "green bean", "avocado", "lemon", "lime", "apple", "banana", "orange", "berry",
    "berries", "cilantro", "parsley", "ginger", "scallion", "leek", "eggplant", "corn",
];

const MEAT_SEAFOOD: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "turkey", "bacon", "sausage", "ham", "salmon", "tuna",
    "shrimp", "fish", "cod", "anchovy", "mussel", "crab",
];

const DAIRY: &[&str] = &[
    "milk", "cheese", "butter", "egg", "cream", "yogurt", "mozzarella", "parmesan", "cheddar",
    "feta", "ricotta",
];

const BAKERY: &[&str] = &[
    "bread", "baguette", "bun", "roll", "tortilla", "pita", "croissant", "bagel",
];

const SPICES: &[&str] = &[
    "salt", "pepper", "paprika", "cumin", "oregano", "basil", "thyme", "rosemary", "cinnamon",
    "nutmeg", "turmeric", "bay leaf", "cayenne", "seasoning",
];

const PANTRY: &[&str] = &[
    "rice", "pasta", "flour", "sugar", "oil", "vinegar", "soy sauce", "stock", "broth", "bean",
    "lentil", "chickpea", "noodle", "oat", "honey", "tomato paste", "canned", "quinoa", "couscous",
    "baking powder", "baking soda", "yeast", "nut", "almond", "walnut", "peanut",
];

#[async_trait]
impl IngredientCategorizer for KeywordCategorizer {
    async fn categorize(
        &self,
        ingredients: &[String],
        context_name: &str,
    ) -> Result<CategorizedIngredients> {
        let mut sections: Vec<(Category, CategorySection)> = Vec::new();

        for ingredient in ingredients {
            let display = ingredient.trim();
            if display.is_empty() {
                continue;
            }

            let category = Self::classify(&display.to_lowercase());
            match sections.iter_mut().find(|(c, _)| *c == category) {
                Some((_, section)) => section.items.push(display.to_string()),
                None => sections.push((
                    category,
                    CategorySection {
                        name: category.as_str().to_string(),
                        items: vec![display.to_string()],
                    },
                )),
            }
        }

        let categories: Vec<CategorySection> =
            sections.into_iter().map(|(_, section)| section).collect();
        let total_items = categories.iter().map(|s| s.items.len()).sum();

        tracing::debug!(
            context = context_name,
            total_items,
            "categorized ingredients by keyword table"
        );

        Ok(CategorizedIngredients {
            categories,
            total_items,
            estimated_cost: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn categorize(ingredients: &[&str]) -> CategorizedIngredients {
        KeywordCategorizer::new()
            .categorize(
                &ingredients.iter().map(|i| i.to_string()).collect::<Vec<_>>(),
                "test",
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_maps_representative_ingredients() {
        let result = categorize(&[
            "2 large tomatoes, diced",
            "1 lb chicken breast",
            "1 cup milk",
            "2 slices bread",
            "1 tsp smoked paprika",
            "200g rice",
        ])
        .await;

        let names: Vec<_> = result.categories.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Produce",
                "Meat & Seafood",
                "Dairy",
                "Bakery",
                "Spices & Seasonings",
                "Pantry"
            ]
        );
        assert_eq!(result.total_items, 6);
    }

    #[tokio::test]
    async fn test_unknown_text_lands_in_other() {
        let result = categorize(&["1 sheet nori", "  "]).await;

        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].name, "Other");
        assert_eq!(result.categories[0].items, vec!["1 sheet nori"]);
        assert_eq!(result.total_items, 1);
    }

    #[tokio::test]
    async fn test_display_item_is_trimmed_free_text() {
        let result = categorize(&["  3 carrots, peeled  "]).await;

        assert_eq!(result.categories[0].items, vec!["3 carrots, peeled"]);
    }

    #[tokio::test]
    async fn test_garlic_powder_is_a_seasoning() {
        let result = categorize(&["1 tsp garlic powder"]).await;

        assert_eq!(result.categories[0].name, "Spices & Seasonings");
    }

    #[tokio::test]
    async fn test_supplies_no_cost_estimate() {
        let result = categorize(&["1 cup milk"]).await;

        assert_eq!(result.estimated_cost, None);
    }
}
