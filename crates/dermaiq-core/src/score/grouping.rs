use crate::model::{Ingredient, IngredientCategory, RiskLevel};
use crate::score::outcome::{CategoryGroup, GroupedItem};

/// Partition ingredients into positive (green) and negative (yellow,
/// orange, red) display groups, in fixed vocabulary order.
///
/// Ingredients without a recognized category are omitted here; they still
/// contribute to the score.
pub fn group_ingredients(ingredients: &[Ingredient]) -> (Vec<CategoryGroup>, Vec<CategoryGroup>) {
    let positive = collect_groups(ingredients, true);
    let negative = collect_groups(ingredients, false);
    (positive, negative)
}

fn collect_groups(ingredients: &[Ingredient], positive: bool) -> Vec<CategoryGroup> {
    let mut groups = Vec::new();

    for &category in IngredientCategory::ALL {
        let items: Vec<GroupedItem> = ingredients
            .iter()
            .filter(|i| i.category == Some(category))
            .filter(|i| (i.risk_level == RiskLevel::Green) == positive)
            .map(|i| GroupedItem {
                name: i.name.clone(),
                risk_level: i.risk_level,
                note: if positive {
                    i.benefit.clone()
                } else {
                    i.concern.clone()
                },
            })
            .collect();

        if !items.is_empty() {
            groups.push(CategoryGroup { category, items });
        }
    }

    groups
}
