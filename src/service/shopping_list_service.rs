//! Shopping-list service: cart fetch, aggregation, and rendering.

use std::sync::Arc;

use crate::auth::UserId;
use crate::domain::shopping_list;
use crate::error::GatewayError;
use crate::persistence::CartSource;

/// Builds the downloadable shopping-list document for a user.
///
/// Stateless coordinator: fetches the cart from the data-access
/// collaborator, runs the pure aggregation fold, and renders the text
/// document.
#[derive(Debug, Clone)]
pub struct ShoppingListService {
    cart_source: Arc<dyn CartSource>,
}

impl ShoppingListService {
    /// Creates a new `ShoppingListService`.
    #[must_use]
    pub fn new(cart_source: Arc<dyn CartSource>) -> Self {
        Self { cart_source }
    }

    /// Returns the rendered shopping-list document for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DataAccess`] if the cart cannot be fetched.
    pub async fn build_document(&self, user: UserId) -> Result<String, GatewayError> {
        let recipes = self.cart_source.cart_recipes(user).await?;
        let lines = shopping_list::aggregate(&recipes);
        tracing::info!(%user, recipes = recipes.len(), lines = lines.len(), "built shopping list");
        Ok(shopping_list::render(&lines))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{CartRecipe, IngredientLine};
    use crate::persistence::InMemoryCartSource;

    fn line(name: &str, amount: u32, unit: &str) -> IngredientLine {
        IngredientLine {
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
        }
    }

    #[tokio::test]
    async fn document_sums_across_cart_recipes() {
        let mut source = InMemoryCartSource::new();
        source.seed(
            UserId(1),
            vec![
                CartRecipe {
                    name: "omelette".to_string(),
                    ingredient_lines: vec![line("Egg", 2, "pcs")],
                },
                CartRecipe {
                    name: "pancakes".to_string(),
                    ingredient_lines: vec![line("Egg", 3, "pcs"), line("Milk", 1, "l")],
                },
            ],
        );
        let service = ShoppingListService::new(Arc::new(source));

        let Ok(doc) = service.build_document(UserId(1)).await else {
            panic!("document build failed");
        };
        assert_eq!(doc, "Список покупок:\n\nEgg - 5 pcs\nMilk - 1 l\n");
    }

    #[tokio::test]
    async fn empty_cart_yields_header_only_document() {
        let service = ShoppingListService::new(Arc::new(InMemoryCartSource::new()));
        let Ok(doc) = service.build_document(UserId(9)).await else {
            panic!("document build failed");
        };
        assert_eq!(doc, "Список покупок:\n\n");
    }
}
