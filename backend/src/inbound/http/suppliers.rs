//! Supplier HTTP handlers.
//!
//! ```text
//! GET  /api/suppliers
//! GET  /api/suppliers/{id}
//! POST /api/suppliers
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, NewSupplier, Supplier};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_repository_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_path_id, require_non_blank};

#[utoipa::path(
    get,
    path = "/api/suppliers",
    responses(
        (status = 200, description = "All suppliers", body = [Supplier]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["suppliers"],
    operation_id = "listSuppliers"
)]
#[get("/suppliers")]
pub async fn list_suppliers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Supplier>>> {
    state
        .catalogue
        .list_suppliers()
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to fetch suppliers"))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Supplier", body = Supplier),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["suppliers"],
    operation_id = "getSupplier"
)]
#[get("/suppliers/{id}")]
pub async fn get_supplier(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Supplier>> {
    let id = parse_path_id(&path, "Supplier")?;
    state
        .catalogue
        .find_supplier(id)
        .await
        .map_err(|err| map_repository_error(err, "Failed to fetch supplier"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Supplier not found"))
}

#[utoipa::path(
    post,
    path = "/api/suppliers",
    request_body = NewSupplier,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Supplier name already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["suppliers"],
    operation_id = "createSupplier"
)]
#[post("/suppliers")]
pub async fn create_supplier(
    state: web::Data<HttpState>,
    payload: web::Json<NewSupplier>,
) -> ApiResult<HttpResponse> {
    let supplier = payload.into_inner();
    require_non_blank(&supplier.name, FieldName::new("name"))?;
    let created = state
        .catalogue
        .create_supplier(&supplier)
        .await
        .map_err(|err| map_repository_error(err, "Failed to create supplier"))?;
    Ok(HttpResponse::Created().json(created))
}
