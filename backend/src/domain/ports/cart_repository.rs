//! Port for session-scoped cart lines.
//!
//! Every operation takes the owning [`CartSessionId`]. Mutations match on
//! both the row id and the session, so a row owned by another session is
//! indistinguishable from a missing one.

use async_trait::async_trait;

use crate::domain::{CartItem, CartSessionId, NewCartItem, Quantity};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Lines owned by `session`, oldest first.
    async fn list(&self, session: &CartSessionId) -> Result<Vec<CartItem>, RepositoryError>;

    /// Append a line. An unknown part raises
    /// [`RepositoryError::InvalidReference`].
    async fn add(&self, item: &NewCartItem) -> Result<CartItem, RepositoryError>;

    /// Set the quantity of one line. `Ok(None)` when `session` owns no line `id`.
    async fn update_quantity(
        &self,
        session: &CartSessionId,
        id: i32,
        quantity: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError>;

    /// Remove one line, reporting whether a row was deleted.
    async fn remove(&self, session: &CartSessionId, id: i32) -> Result<bool, RepositoryError>;

    /// Remove every line owned by `session`, returning how many went.
    async fn clear(&self, session: &CartSessionId) -> Result<usize, RepositoryError>;
}
