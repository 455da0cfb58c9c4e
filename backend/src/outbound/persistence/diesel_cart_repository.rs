//! PostgreSQL-backed `CartRepository`.
//!
//! Every statement filters on `session_id`; row-level mutations also filter
//! on the primary key, so a foreign session's row is simply not matched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CartRepository, RepositoryError};
use crate::domain::{CartItem, CartSessionId, NewCartItem, Quantity};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CartItemRow, NewCartItemRow};
use super::pool::DbPool;
use super::schema::cart_items;

#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_item(row: CartItemRow) -> Result<CartItem, RepositoryError> {
    CartItem::try_from(row).map_err(|err| RepositoryError::query(err.to_string()))
}

#[async_trait]
impl CartRepository for DieselCartRepository {
    async fn list(&self, session: &CartSessionId) -> Result<Vec<CartItem>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CartItemRow> = cart_items::table
            .filter(cart_items::session_id.eq(session.as_str()))
            .order(cart_items::id.asc())
            .select(CartItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_item).collect()
    }

    async fn add(&self, item: &NewCartItem) -> Result<CartItem, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(cart_items::table)
            .values(NewCartItemRow {
                session_id: item.session_id.as_str(),
                part_id: item.part_id,
                quantity: item.quantity.get(),
            })
            .returning(CartItemRow::as_returning())
            .get_result::<CartItemRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_item(row)
    }

    async fn update_quantity(
        &self,
        session: &CartSessionId,
        id: i32,
        quantity: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owned = cart_items::table
            .filter(cart_items::id.eq(id))
            .filter(cart_items::session_id.eq(session.as_str()));
        let row = diesel::update(owned)
            .set(cart_items::quantity.eq(quantity.get()))
            .returning(CartItemRow::as_returning())
            .get_result::<CartItemRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_item).transpose()
    }

    async fn remove(&self, session: &CartSessionId, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owned = cart_items::table
            .filter(cart_items::id.eq(id))
            .filter(cart_items::session_id.eq(session.as_str()));
        let deleted = diesel::delete(owned)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn clear(&self, session: &CartSessionId) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(cart_items::table.filter(cart_items::session_id.eq(session.as_str())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
