//! Catalogue entities: brands, vehicle models, parts and suppliers.
//!
//! These are read-mostly records. Creation payloads (`New*`) carry only the
//! caller-supplied columns; identifiers are assigned by the store. JSON field
//! names are camelCase to match the front-end contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A golf-cart manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: i32,
    #[schema(example = "Club Car")]
    pub name: String,
    pub description: Option<String>,
    pub specialization: Option<String>,
    pub key_features: Vec<String>,
    pub website: Option<String>,
    pub market_position: Option<String>,
    pub logo_url: Option<String>,
}

/// Creation payload for [`Brand`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBrand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub market_position: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A vehicle model offered by a [`Brand`].
///
/// `vehicle_type` is an open tag (`LSV`, `NEV`, `street-legal`, ...) and is
/// stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Model)]
pub struct VehicleModel {
    pub id: i32,
    pub brand_id: i32,
    #[schema(example = "Onward 4 Passenger")]
    pub name: String,
    pub year: Option<i32>,
    #[schema(example = "LSV")]
    pub vehicle_type: Option<String>,
    pub battery_type: Option<String>,
    pub voltage: Option<i32>,
    pub range: Option<i32>,
    pub top_speed: Option<i32>,
    pub seating_capacity: Option<i32>,
    #[schema(value_type = Option<String>, example = "12999.00")]
    pub price: Option<Decimal>,
    pub features: Vec<String>,
    pub image_url: Option<String>,
}

/// Creation payload for [`VehicleModel`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = NewModel)]
pub struct NewVehicleModel {
    pub brand_id: i32,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub battery_type: Option<String>,
    #[serde(default)]
    pub voltage: Option<i32>,
    #[serde(default)]
    pub range: Option<i32>,
    #[serde(default)]
    pub top_speed: Option<i32>,
    #[serde(default)]
    pub seating_capacity: Option<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update for a [`VehicleModel`]; absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
#[schema(as = ModelUpdate)]
pub struct VehicleModelUpdate {
    pub brand_id: Option<i32>,
    pub name: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: Option<String>,
    pub battery_type: Option<String>,
    pub voltage: Option<i32>,
    pub range: Option<i32>,
    pub top_speed: Option<i32>,
    pub seating_capacity: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub features: Option<Vec<String>>,
    pub image_url: Option<String>,
}

impl VehicleModelUpdate {
    /// True when the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Optional predicates for listing vehicle models. Set fields combine with AND.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelFilter {
    pub brand_id: Option<i32>,
    pub vehicle_type: Option<String>,
}

impl ModelFilter {
    /// Whether `model` satisfies every set predicate.
    pub fn matches(&self, model: &VehicleModel) -> bool {
        self.brand_id.is_none_or(|id| model.brand_id == id)
            && self
                .vehicle_type
                .as_deref()
                .is_none_or(|tag| model.vehicle_type.as_deref() == Some(tag))
    }
}

/// A replacement or upgrade part.
///
/// Compatibility is recorded as free-text brand and model names rather than
/// foreign keys so parts can be catalogued before their vehicles exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: i32,
    #[schema(example = "BAT-12V-105")]
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "batteries")]
    pub category: Option<String>,
    #[schema(value_type = Option<String>, example = "189.99")]
    pub price: Option<Decimal>,
    pub supplier_id: Option<i32>,
    pub compatible_brands: Vec<String>,
    pub compatible_models: Vec<String>,
    pub in_stock: bool,
    pub image_url: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub specifications: Option<Value>,
}

/// Creation payload for [`Part`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPart {
    pub part_number: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub supplier_id: Option<i32>,
    #[serde(default)]
    pub compatible_brands: Vec<String>,
    #[serde(default)]
    pub compatible_models: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub specifications: Option<Value>,
}

fn default_in_stock() -> bool {
    true
}

/// Optional predicates for listing parts.
///
/// `brand_id` matches parts whose `compatible_brands` list names that brand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartFilter {
    pub category: Option<String>,
    pub brand_id: Option<i32>,
}

/// A parts supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i32,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub specialization: Option<String>,
}

/// Creation payload for [`Supplier`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}
