//! Wiring diagram HTTP handlers.
//!
//! ```text
//! GET  /api/wiring-diagrams?brandId=&modelId=
//! GET  /api/wiring-diagrams/{id}
//! GET  /api/wiring-diagrams/{id}/image
//! POST /api/wiring-diagrams            (multipart/form-data)
//! ```
//!
//! Uploads are buffered in memory, capped at 10 MiB, and stored inline as
//! base64 next to their file name, MIME type and size.

use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DiagramFilter, DiagramUpload, Error, NewWiringDiagram, WiringDiagram};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_repository_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, non_blank, parse_flag, parse_optional_integer,
    parse_path_id, parse_string_list, require_non_blank,
};

/// Filters for listing diagrams.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DiagramQuery {
    #[param(value_type = Option<i32>)]
    pub brand_id: Option<String>,
    #[param(value_type = Option<i32>)]
    pub model_id: Option<String>,
}

impl TryFrom<DiagramQuery> for DiagramFilter {
    type Error = Error;

    fn try_from(query: DiagramQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            brand_id: parse_optional_integer(query.brand_id.as_deref(), FieldName::new("brandId"))?,
            model_id: parse_optional_integer(query.model_id.as_deref(), FieldName::new("modelId"))?,
        })
    }
}

/// Multipart fields accepted by the upload endpoint. Unknown fields are
/// ignored.
#[derive(Debug, MultipartForm)]
pub struct WiringDiagramForm {
    #[multipart(limit = "10MiB")]
    pub file: Option<Bytes>,
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    #[multipart(rename = "modelId")]
    pub model_id: Option<Text<String>>,
    #[multipart(rename = "brandId")]
    pub brand_id: Option<Text<String>>,
    pub year: Option<Text<String>>,
    #[multipart(rename = "imageUrl")]
    pub image_url: Option<Text<String>>,
    #[multipart(rename = "isCustomDrawing")]
    pub is_custom_drawing: Option<Text<String>>,
    /// JSON array of strings, e.g. `["48V","controller"]`.
    pub tags: Option<Text<String>>,
}

/// OpenAPI description of [`WiringDiagramForm`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct WiringDiagramUpload {
    /// Diagram image, at most 10 MiB.
    #[schema(value_type = Option<String>, format = Binary)]
    file: Option<Vec<u8>>,
    title: String,
    description: Option<String>,
    model_id: Option<i32>,
    brand_id: Option<i32>,
    year: Option<i32>,
    image_url: Option<String>,
    #[schema(example = "false")]
    is_custom_drawing: Option<String>,
    #[schema(example = "[\"48V\",\"controller\"]")]
    tags: Option<String>,
}

fn text(field: Option<Text<String>>) -> Option<String> {
    field.map(Text::into_inner)
}

impl TryFrom<WiringDiagramForm> for NewWiringDiagram {
    type Error = Error;

    fn try_from(form: WiringDiagramForm) -> Result<Self, Self::Error> {
        let title_field = FieldName::new("title");
        let title = text(form.title).ok_or_else(|| missing_field_error(title_field))?;
        require_non_blank(&title, title_field)?;

        let draft = Self {
            model_id: parse_optional_integer(
                text(form.model_id).as_deref(),
                FieldName::new("modelId"),
            )?,
            brand_id: parse_optional_integer(
                text(form.brand_id).as_deref(),
                FieldName::new("brandId"),
            )?,
            year: parse_optional_integer(text(form.year).as_deref(), FieldName::new("year"))?,
            title,
            description: non_blank(text(form.description)),
            image_url: non_blank(text(form.image_url)),
            is_custom_drawing: parse_flag(
                text(form.is_custom_drawing).as_deref(),
                FieldName::new("isCustomDrawing"),
            )?,
            tags: parse_string_list(text(form.tags).as_deref(), FieldName::new("tags"))?,
            ..Self::default()
        };

        // Browsers send an empty part with `filename=""` when no file was chosen.
        let upload = form.file.filter(|file| !file.data.is_empty());
        Ok(match upload {
            Some(file) => draft.with_upload(DiagramUpload {
                bytes: file.data.to_vec(),
                file_name: file.file_name,
                mime_type: file.content_type.as_ref().map(ToString::to_string),
            }),
            None => draft,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/wiring-diagrams",
    params(DiagramQuery),
    responses(
        (status = 200, description = "Matching diagrams", body = [WiringDiagram]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["wiring-diagrams"],
    operation_id = "listWiringDiagrams"
)]
#[get("/wiring-diagrams")]
pub async fn list_wiring_diagrams(
    state: web::Data<HttpState>,
    query: web::Query<DiagramQuery>,
) -> ApiResult<web::Json<Vec<WiringDiagram>>> {
    let filter = DiagramFilter::try_from(query.into_inner())?;
    state
        .wiring_diagrams
        .list(&filter)
        .await
        .map(web::Json)
        .map_err(|err| map_repository_error(err, "Failed to fetch wiring diagrams"))
}

async fn find_diagram(state: &HttpState, raw_id: &str) -> ApiResult<WiringDiagram> {
    let id = parse_path_id(raw_id, "Wiring diagram")?;
    state
        .wiring_diagrams
        .find(id)
        .await
        .map_err(|err| map_repository_error(err, "Failed to fetch wiring diagram"))?
        .ok_or_else(|| Error::not_found("Wiring diagram not found"))
}

#[utoipa::path(
    get,
    path = "/api/wiring-diagrams/{id}",
    params(("id" = i32, Path, description = "Diagram id")),
    responses(
        (status = 200, description = "Diagram", body = WiringDiagram),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["wiring-diagrams"],
    operation_id = "getWiringDiagram"
)]
#[get("/wiring-diagrams/{id}")]
pub async fn get_wiring_diagram(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WiringDiagram>> {
    find_diagram(&state, &path).await.map(web::Json)
}

/// Serve the stored image bytes with their original MIME type.
#[utoipa::path(
    get,
    path = "/api/wiring-diagrams/{id}/image",
    params(("id" = i32, Path, description = "Diagram id")),
    responses(
        (status = 200, description = "Raw image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Diagram or inline image not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["wiring-diagrams"],
    operation_id = "getWiringDiagramImage"
)]
#[get("/wiring-diagrams/{id}/image")]
pub async fn get_wiring_diagram_image(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let diagram = find_diagram(&state, &path).await?;
    let image = diagram.image().map_err(|err| {
        error!(error = %err, diagram_id = diagram.id, "stored diagram image is not valid base64");
        Error::internal("Failed to fetch wiring diagram image")
    })?;
    let image = image.ok_or_else(|| Error::not_found("Wiring diagram image not found"))?;
    Ok(HttpResponse::Ok()
        .content_type(image.mime_type)
        .body(image.bytes))
}

/// Upload a diagram as `multipart/form-data`.
#[utoipa::path(
    post,
    path = "/api/wiring-diagrams",
    request_body(content = WiringDiagramUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Diagram stored", body = WiringDiagram),
        (status = 400, description = "Invalid form field or oversized file", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["wiring-diagrams"],
    operation_id = "createWiringDiagram"
)]
#[post("/wiring-diagrams")]
pub async fn create_wiring_diagram(
    state: web::Data<HttpState>,
    form: MultipartForm<WiringDiagramForm>,
) -> ApiResult<HttpResponse> {
    let diagram = NewWiringDiagram::try_from(form.into_inner())?;
    let created = state
        .wiring_diagrams
        .create(&diagram)
        .await
        .map_err(|err| map_repository_error(err, "Failed to create wiring diagram"))?;
    Ok(HttpResponse::Created().json(created))
}

#[cfg(test)]
#[path = "wiring_diagrams_tests.rs"]
mod tests;
