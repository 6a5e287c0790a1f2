//! Data-access collaborators.
//!
//! The CRUD resource layer (recipes, carts, users) lives in a separate
//! service; this module only reads the slices of its relational schema
//! that the gateway needs, behind traits so tests can inject in-memory
//! doubles.

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::auth::UserId;
use crate::domain::CartRecipe;
use crate::error::GatewayError;

pub use memory::InMemoryCartSource;
pub use postgres::{PostgresAuthProvider, PostgresCartSource};

/// Provides the recipes currently in a user's shopping cart, with
/// resolved ingredient lines, newest recipe first.
#[async_trait]
pub trait CartSource: Send + Sync + fmt::Debug {
    /// Fetches the user's cart recipes.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::DataAccess`] if the underlying store fails.
    async fn cart_recipes(&self, user: UserId) -> Result<Vec<CartRecipe>, GatewayError>;
}
