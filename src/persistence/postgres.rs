//! PostgreSQL implementations of the data-access collaborators.
//!
//! Reads the CRUD service's relational schema directly: `shopping_carts`
//! joins recipes to users, `recipe_ingredients` resolves amounts, and
//! `auth_tokens` maps opaque token keys to users.

use async_trait::async_trait;
use sqlx::PgPool;

use super::CartSource;
use crate::auth::{AuthProvider, UserId};
use crate::domain::{CartRecipe, IngredientLine};
use crate::error::GatewayError;

/// Cart lookup backed by `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresCartSource {
    pool: PgPool,
}

impl PostgresCartSource {
    /// Creates a cart source with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartSource for PostgresCartSource {
    async fn cart_recipes(&self, user: UserId) -> Result<Vec<CartRecipe>, GatewayError> {
        // One joined query; rows arrive grouped by recipe (newest first)
        // with ingredient lines in their stored order.
        let rows = sqlx::query_as::<_, (i64, String, String, i32, String)>(
            "SELECT r.id, r.name, i.name, ri.amount, i.measurement_unit \
             FROM shopping_carts sc \
             JOIN recipes r ON r.id = sc.recipe_id \
             JOIN recipe_ingredients ri ON ri.recipe_id = r.id \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             WHERE sc.user_id = $1 \
             ORDER BY r.created_at DESC, r.id, ri.id",
        )
        .bind(user.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::DataAccess(e.to_string()))?;

        let mut recipes: Vec<CartRecipe> = Vec::new();
        let mut current_recipe: Option<i64> = None;

        for (recipe_id, recipe_name, ingredient_name, amount, unit) in rows {
            if current_recipe != Some(recipe_id) {
                current_recipe = Some(recipe_id);
                recipes.push(CartRecipe {
                    name: recipe_name,
                    ingredient_lines: Vec::new(),
                });
            }
            if let Some(recipe) = recipes.last_mut() {
                push_line(recipe, ingredient_name, amount, unit);
            }
        }

        Ok(recipes)
    }
}

/// Appends one resolved line, clamping negative amounts from the store to 0.
fn push_line(recipe: &mut CartRecipe, name: String, amount: i32, unit: String) {
    recipe.ingredient_lines.push(IngredientLine {
        name,
        amount: u32::try_from(amount).unwrap_or(0),
        unit,
    });
}

/// Token validation backed by the auth provider's `auth_tokens` table.
#[derive(Debug, Clone)]
pub struct PostgresAuthProvider {
    pool: PgPool,
}

impl PostgresAuthProvider {
    /// Creates an auth provider with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthProvider for PostgresAuthProvider {
    async fn authenticate(&self, token: &str) -> Result<UserId, GatewayError> {
        let row = sqlx::query_scalar::<_, i64>("SELECT user_id FROM auth_tokens WHERE key = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| GatewayError::DataAccess(e.to_string()))?;

        row.map(UserId).ok_or(GatewayError::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn negative_amounts_clamp_to_zero() {
        let mut recipe = CartRecipe {
            name: "soup".to_string(),
            ingredient_lines: Vec::new(),
        };
        push_line(&mut recipe, "Salt".to_string(), -3, "г".to_string());
        assert_eq!(
            recipe.ingredient_lines,
            vec![IngredientLine {
                name: "Salt".to_string(),
                amount: 0,
                unit: "г".to_string(),
            }]
        );
    }
}
