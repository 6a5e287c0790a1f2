//! In-memory cart source for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;

use super::CartSource;
use crate::auth::UserId;
use crate::domain::CartRecipe;
use crate::error::GatewayError;

/// Fixed per-user cart contents.
#[derive(Debug, Default)]
pub struct InMemoryCartSource {
    carts: HashMap<UserId, Vec<CartRecipe>>,
}

impl InMemoryCartSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the cart for one user, replacing any previous contents.
    pub fn seed(&mut self, user: UserId, recipes: Vec<CartRecipe>) {
        self.carts.insert(user, recipes);
    }
}

#[async_trait]
impl CartSource for InMemoryCartSource {
    async fn cart_recipes(&self, user: UserId) -> Result<Vec<CartRecipe>, GatewayError> {
        Ok(self.carts.get(&user).cloned().unwrap_or_default())
    }
}
