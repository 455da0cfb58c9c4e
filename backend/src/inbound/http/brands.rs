//! Brand HTTP handlers.
//!
//! ```text
//! GET  /api/brands
//! GET  /api/brands/{id}
//! POST /api/brands
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Brand, Error, NewBrand};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_repository_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_path_id, require_non_blank};

/// List every brand.
#[utoipa::path(
    get,
    path = "/api/brands",
    responses(
        (status = 200, description = "All brands", body = [Brand]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "listBrands"
)]
#[get("/brands")]
pub async fn list_brands(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Brand>>> {
    state
        .catalogue
        .list_brands()
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to fetch brands"))
}

/// Fetch one brand.
#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand", body = Brand),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "getBrand"
)]
#[get("/brands/{id}")]
pub async fn get_brand(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Brand>> {
    let id = parse_path_id(&path, "Brand")?;
    state
        .catalogue
        .find_brand(id)
        .await
        .map_err(|err| map_repository_error(err, "Failed to fetch brand"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Brand not found"))
}

/// Create a brand. Names are unique.
#[utoipa::path(
    post,
    path = "/api/brands",
    request_body = NewBrand,
    responses(
        (status = 201, description = "Brand created", body = Brand),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Brand name already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "createBrand"
)]
#[post("/brands")]
pub async fn create_brand(
    state: web::Data<HttpState>,
    payload: web::Json<NewBrand>,
) -> ApiResult<HttpResponse> {
    let brand = payload.into_inner();
    require_non_blank(&brand.name, FieldName::new("name"))?;
    let created = state
        .catalogue
        .create_brand(&brand)
        .await
        .map_err(|err| map_repository_error(err, "Failed to create brand"))?;
    Ok(HttpResponse::Created().json(created))
}
