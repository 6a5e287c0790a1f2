//! Shopping-list aggregation.
//!
//! Pure, side-effect-free fold over the recipes in a user's cart:
//! per-ingredient amounts are summed into one consolidated list. No
//! concurrency, no I/O; easy to test in isolation.

use std::collections::HashMap;

/// One ingredient line of a recipe, as resolved by the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    /// Ingredient name. Matching across recipes is exact (no case or
    /// whitespace normalization).
    pub name: String,
    /// Amount of the ingredient used by the recipe.
    pub amount: u32,
    /// Measurement unit (e.g. `"г"`, `"pcs"`).
    pub unit: String,
}

/// A recipe currently in a user's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecipe {
    /// Recipe name, carried for log context only.
    pub name: String,
    /// Resolved ingredient lines in recipe order.
    pub ingredient_lines: Vec<IngredientLine>,
}

/// One consolidated line of the shopping list.
///
/// Built transiently per request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    /// Ingredient name (unique within the list).
    pub name: String,
    /// Sum of every matching ingredient amount across the input recipes.
    pub total_amount: u32,
    /// Unit taken from the first occurrence; assumed consistent, no
    /// unit conversion is attempted.
    pub unit: String,
}

/// Header line of the rendered shopping-list document.
pub const SHOPPING_LIST_HEADER: &str = "Список покупок:";

/// Consolidates the ingredient lines of `recipes` into one shopping list.
///
/// Recipes and their lines are folded in the order given; the output is
/// in first-occurrence order of ingredient names. Repeated names add to
/// the running amount (saturating) and keep the first line's unit.
#[must_use]
pub fn aggregate(recipes: &[CartRecipe]) -> Vec<ShoppingListLine> {
    let mut lines: Vec<ShoppingListLine> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for recipe in recipes {
        for ingredient in &recipe.ingredient_lines {
            match index.get(ingredient.name.as_str()) {
                Some(&i) => {
                    if let Some(line) = lines.get_mut(i) {
                        line.total_amount = line.total_amount.saturating_add(ingredient.amount);
                    }
                }
                None => {
                    index.insert(ingredient.name.clone(), lines.len());
                    lines.push(ShoppingListLine {
                        name: ingredient.name.clone(),
                        total_amount: ingredient.amount,
                        unit: ingredient.unit.clone(),
                    });
                }
            }
        }
    }

    lines
}

/// Renders a shopping list as the downloadable plain-text document:
/// a fixed header, a blank line, then `"<name> - <total> <unit>"` per line.
#[must_use]
pub fn render(lines: &[ShoppingListLine]) -> String {
    use std::fmt::Write;

    let mut out = String::from(SHOPPING_LIST_HEADER);
    out.push_str("\n\n");
    for line in lines {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{} - {} {}", line.name, line.total_amount, line.unit);
    }
    out
}
