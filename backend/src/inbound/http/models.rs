//! Vehicle model HTTP handlers.
//!
//! ```text
//! GET  /api/models?brandId=&vehicleType=
//! GET  /api/models/{id}
//! POST /api/models
//! PUT  /api/models/{id}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, ModelFilter, NewVehicleModel, VehicleModel, VehicleModelUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_repository_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, parse_optional_integer, parse_path_id, require_non_blank,
};

/// Filters for listing models.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ModelQuery {
    /// Only models of this brand.
    #[param(value_type = Option<i32>)]
    pub brand_id: Option<String>,
    /// Only models with this vehicle type tag, e.g. `LSV`.
    pub vehicle_type: Option<String>,
}

impl TryFrom<ModelQuery> for ModelFilter {
    type Error = Error;

    fn try_from(query: ModelQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            brand_id: parse_optional_integer(query.brand_id.as_deref(), FieldName::new("brandId"))?,
            vehicle_type: non_blank(query.vehicle_type),
        })
    }
}

/// List models, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/models",
    params(ModelQuery),
    responses(
        (status = 200, description = "Matching models", body = [VehicleModel]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["models"],
    operation_id = "listModels"
)]
#[get("/models")]
pub async fn list_models(
    state: web::Data<HttpState>,
    query: web::Query<ModelQuery>,
) -> ApiResult<web::Json<Vec<VehicleModel>>> {
    let filter = ModelFilter::try_from(query.into_inner())?;
    state
        .catalogue
        .list_models(&filter)
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to fetch models"))
}

/// Fetch one model.
#[utoipa::path(
    get,
    path = "/api/models/{id}",
    params(("id" = i32, Path, description = "Model id")),
    responses(
        (status = 200, description = "Model", body = VehicleModel),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["models"],
    operation_id = "getModel"
)]
#[get("/models/{id}")]
pub async fn get_model(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<VehicleModel>> {
    let id = parse_path_id(&path, "Model")?;
    state
        .catalogue
        .find_model(id)
        .await
        .map_err(|err| map_repository_error(err, "Failed to fetch model"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Model not found"))
}

/// Create a model under an existing brand.
#[utoipa::path(
    post,
    path = "/api/models",
    request_body = NewVehicleModel,
    responses(
        (status = 201, description = "Model created", body = VehicleModel),
        (status = 400, description = "Invalid request or unknown brand", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["models"],
    operation_id = "createModel"
)]
#[post("/models")]
pub async fn create_model(
    state: web::Data<HttpState>,
    payload: web::Json<NewVehicleModel>,
) -> ApiResult<HttpResponse> {
    let model = payload.into_inner();
    require_non_blank(&model.name, FieldName::new("name"))?;
    let created = state
        .catalogue
        .create_model(&model)
        .await
        .map_err(|err| map_repository_error(err, "Failed to create model"))?;
    Ok(HttpResponse::Created().json(created))
}

/// Apply a partial update to a model.
#[utoipa::path(
    put,
    path = "/api/models/{id}",
    params(("id" = i32, Path, description = "Model id")),
    request_body = VehicleModelUpdate,
    responses(
        (status = 200, description = "Updated model", body = VehicleModel),
        (status = 400, description = "Invalid or empty update", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["models"],
    operation_id = "updateModel"
)]
#[put("/models/{id}")]
pub async fn update_model(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VehicleModelUpdate>,
) -> ApiResult<web::Json<VehicleModel>> {
    let id = parse_path_id(&path, "Model")?;
    let changes = payload.into_inner();
    if changes.is_empty() {
        return Err(Error::invalid_request("No fields to update"));
    }
    if let Some(name) = changes.name.as_deref() {
        require_non_blank(name, FieldName::new("name"))?;
    }
    state
        .catalogue
        .update_model(id, &changes)
        .await
        .map_err(|err| map_repository_error(err, "Failed to update model"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Model not found"))
}
