//! Session-scoped shopping cart.
//!
//! A cart has no row of its own: it is the set of [`CartItem`]s sharing a
//! [`CartSessionId`]. Every read and mutation is keyed by that identity, so a
//! caller can never observe or alter another session's items.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Opaque identity of the browser session that owns a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSessionId(String);

/// Validation errors for cart values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartValidationError {
    #[error("cart session id must not be empty")]
    EmptySessionId,
    #[error("quantity must be at least 1, got {0}")]
    QuantityTooSmall(i32),
}

impl CartSessionId {
    /// Wrap an existing identifier read back from the session cookie.
    pub fn new(value: impl Into<String>) -> Result<Self, CartValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CartValidationError::EmptySessionId);
        }
        Ok(Self(value))
    }

    /// Mint a fresh identifier for a session that has no cart yet.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of units of a part in the cart; always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(i32);

impl Quantity {
    pub const ONE: Self = Self(1);

    pub fn new(value: i32) -> Result<Self, CartValidationError> {
        if value < 1 {
            return Err(CartValidationError::QuantityTooSmall(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i32,
    #[schema(value_type = String)]
    pub session_id: CartSessionId,
    pub part_id: i32,
    #[schema(minimum = 1, example = 2)]
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Insert payload for a cart line owned by `session_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub session_id: CartSessionId,
    pub part_id: i32,
    pub quantity: Quantity,
}
