//! Part HTTP handlers.
//!
//! ```text
//! GET  /api/parts?category=&brandId=
//! GET  /api/parts/{id}
//! POST /api/parts
//! ```
//!
//! The `brandId` filter resolves the brand's name and matches it against each
//! part's `compatibleBrands` list.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, NewPart, Part, PartFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_repository_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, parse_optional_integer, parse_path_id, require_non_blank,
};

/// Filters for listing parts.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PartQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// Parts compatible with this brand.
    #[param(value_type = Option<i32>)]
    pub brand_id: Option<String>,
}

impl TryFrom<PartQuery> for PartFilter {
    type Error = Error;

    fn try_from(query: PartQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            category: non_blank(query.category),
            brand_id: parse_optional_integer(query.brand_id.as_deref(), FieldName::new("brandId"))?,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/parts",
    params(PartQuery),
    responses(
        (status = 200, description = "Matching parts", body = [Part]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["parts"],
    operation_id = "listParts"
)]
#[get("/parts")]
pub async fn list_parts(
    state: web::Data<HttpState>,
    query: web::Query<PartQuery>,
) -> ApiResult<web::Json<Vec<Part>>> {
    let filter = PartFilter::try_from(query.into_inner())?;
    state
        .catalogue
        .list_parts(&filter)
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to fetch parts"))
}

#[utoipa::path(
    get,
    path = "/api/parts/{id}",
    params(("id" = i32, Path, description = "Part id")),
    responses(
        (status = 200, description = "Part", body = Part),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["parts"],
    operation_id = "getPart"
)]
#[get("/parts/{id}")]
pub async fn get_part(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Part>> {
    let id = parse_path_id(&path, "Part")?;
    state
        .catalogue
        .find_part(id)
        .await
        .map_err(|err| map_repository_error(err, "Failed to fetch part"))?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("Part not found"))
}

/// Create a part. Part numbers are unique.
#[utoipa::path(
    post,
    path = "/api/parts",
    request_body = NewPart,
    responses(
        (status = 201, description = "Part created", body = Part),
        (status = 400, description = "Invalid request or unknown supplier", body = ErrorSchema),
        (status = 409, description = "Part number already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["parts"],
    operation_id = "createPart"
)]
#[post("/parts")]
pub async fn create_part(
    state: web::Data<HttpState>,
    payload: web::Json<NewPart>,
) -> ApiResult<HttpResponse> {
    let part = payload.into_inner();
    require_non_blank(&part.part_number, FieldName::new("partNumber"))?;
    require_non_blank(&part.name, FieldName::new("name"))?;
    let created = state
        .catalogue
        .create_part(&part)
        .await
        .map_err(|err| map_repository_error(err, "Failed to create part"))?;
    Ok(HttpResponse::Created().json(created))
}
