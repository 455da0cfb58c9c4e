//! Shopping cart HTTP handlers.
//!
//! ```text
//! GET    /api/cart
//! POST   /api/cart
//! PUT    /api/cart/{id}
//! DELETE /api/cart/{id}
//! DELETE /api/cart
//! ```
//!
//! The owning session always comes from the session cookie. Rows belonging
//! to another session are reported as missing.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{CartItem, Error, NewCartItem, Quantity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_repository_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, out_of_range_error, parse_path_id};

const QUANTITY: FieldName = FieldName::new("quantity");

/// Request body for adding a part to the cart.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub part_id: i32,
    /// Defaults to 1.
    #[schema(minimum = 1)]
    pub quantity: Option<i32>,
}

/// Request body for changing a line's quantity.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCartItemRequest {
    #[schema(minimum = 1)]
    pub quantity: i32,
}

fn parse_quantity(value: i32) -> Result<Quantity, Error> {
    Quantity::new(value)
        .map_err(|err| out_of_range_error(QUANTITY, err.to_string(), i64::from(value)))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Lines in the caller's cart", body = [CartItem]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "listCartItems"
)]
#[get("/cart")]
pub async fn list_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CartItem>>> {
    let Some(owner) = session.existing_cart_session()? else {
        return Ok(web::Json(Vec::new()));
    };
    state
        .cart
        .list(&owner)
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to fetch cart items"))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Line added", body = CartItem),
        (status = 400, description = "Invalid quantity or unknown part", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "addCartItem"
)]
#[post("/cart")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddToCartRequest>,
) -> ApiResult<HttpResponse> {
    let AddToCartRequest { part_id, quantity } = payload.into_inner();
    let quantity = match quantity {
        Some(value) => parse_quantity(value)?,
        None => Quantity::ONE,
    };
    let item = NewCartItem {
        session_id: session.cart_session_id()?,
        part_id,
        quantity,
    };
    let created = state
        .cart
        .add(&item)
        .await
        .map_err(|err| map_repository_error(err, "Failed to add item to cart"))?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    put,
    path = "/api/cart/{id}",
    params(("id" = i32, Path, description = "Cart line id")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Updated line", body = CartItem),
        (status = 400, description = "Invalid quantity", body = ErrorSchema),
        (status = 404, description = "No such line in the caller's cart", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "updateCartItem"
)]
#[put("/cart/{id}")]
pub async fn update_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateCartItemRequest>,
) -> ApiResult<web::Json<CartItem>> {
    let id = parse_path_id(&path, "Cart item")?;
    let quantity = parse_quantity(payload.quantity)?;
    let Some(owner) = session.existing_cart_session()? else {
        return Err(Error::not_found("Cart item not found"));
    };
    state
        .cart
        .update_quantity(&owner, id, quantity)
        .await
        .map_err(|err| map_repository_error(err, "Failed to update cart item"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Cart item not found"))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{id}",
    params(("id" = i32, Path, description = "Cart line id")),
    responses(
        (status = 204, description = "Line removed"),
        (status = 404, description = "No such line in the caller's cart", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "removeCartItem"
)]
#[delete("/cart/{id}")]
pub async fn remove_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_path_id(&path, "Cart item")?;
    let Some(owner) = session.existing_cart_session()? else {
        return Err(Error::not_found("Cart item not found"));
    };
    let removed = state
        .cart
        .remove(&owner, id)
        .await
        .map_err(|err| map_repository_error(err, "Failed to remove cart item"))?;
    if removed {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("Cart item not found"))
    }
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 204, description = "Cart emptied"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "clearCart"
)]
#[delete("/cart")]
pub async fn clear_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(owner) = session.existing_cart_session()? {
        let removed = state
            .cart
            .clear(&owner)
            .await
            .map_err(|err| map_repository_error(err, "Failed to clear cart"))?;
        debug!(removed, "cart cleared");
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "cart_tests.rs"]
mod tests;
