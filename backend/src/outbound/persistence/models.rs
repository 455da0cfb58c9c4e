//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Read rows convert into
//! domain entities through `From`; insert and changeset rows borrow from the
//! domain payloads they are built from.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::{
    Brand, CartItem, CartSessionId, GpsRoute, NavigationSession, NavigationSessionChanges,
    NewBrand, NewGpsRoute, NewNavigationSession, NewPart, NewSupplier, NewVehicleModel,
    NewWiringDiagram, Part, Supplier, TrackingPoint, VehicleModel, VehicleModelUpdate,
    WiringDiagram,
};

use super::schema::{
    brands, cart_items, gps_routes, gps_tracking_points, navigation_sessions, parts, suppliers,
    vehicle_models, wiring_diagrams,
};

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = brands)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BrandRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub specialization: Option<String>,
    pub key_features: Vec<String>,
    pub website: Option<String>,
    pub market_position: Option<String>,
    pub logo_url: Option<String>,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            specialization: row.specialization,
            key_features: row.key_features,
            website: row.website,
            market_position: row.market_position,
            logo_url: row.logo_url,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = brands)]
pub(crate) struct NewBrandRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub specialization: Option<&'a str>,
    pub key_features: &'a [String],
    pub website: Option<&'a str>,
    pub market_position: Option<&'a str>,
    pub logo_url: Option<&'a str>,
}

impl<'a> From<&'a NewBrand> for NewBrandRow<'a> {
    fn from(brand: &'a NewBrand) -> Self {
        Self {
            name: &brand.name,
            description: brand.description.as_deref(),
            specialization: brand.specialization.as_deref(),
            key_features: &brand.key_features,
            website: brand.website.as_deref(),
            market_position: brand.market_position.as_deref(),
            logo_url: brand.logo_url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vehicle_models)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VehicleModelRow {
    pub id: i32,
    pub brand_id: i32,
    pub name: String,
    pub year: Option<i32>,
    pub vehicle_type: Option<String>,
    pub battery_type: Option<String>,
    pub voltage: Option<i32>,
    pub range: Option<i32>,
    pub top_speed: Option<i32>,
    pub seating_capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub features: Vec<String>,
    pub image_url: Option<String>,
}

impl From<VehicleModelRow> for VehicleModel {
    fn from(row: VehicleModelRow) -> Self {
        Self {
            id: row.id,
            brand_id: row.brand_id,
            name: row.name,
            year: row.year,
            vehicle_type: row.vehicle_type,
            battery_type: row.battery_type,
            voltage: row.voltage,
            range: row.range,
            top_speed: row.top_speed,
            seating_capacity: row.seating_capacity,
            price: row.price,
            features: row.features,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = vehicle_models)]
pub(crate) struct NewVehicleModelRow<'a> {
    pub brand_id: i32,
    pub name: &'a str,
    pub year: Option<i32>,
    pub vehicle_type: Option<&'a str>,
    pub battery_type: Option<&'a str>,
    pub voltage: Option<i32>,
    pub range: Option<i32>,
    pub top_speed: Option<i32>,
    pub seating_capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub features: &'a [String],
    pub image_url: Option<&'a str>,
}

impl<'a> From<&'a NewVehicleModel> for NewVehicleModelRow<'a> {
    fn from(model: &'a NewVehicleModel) -> Self {
        Self {
            brand_id: model.brand_id,
            name: &model.name,
            year: model.year,
            vehicle_type: model.vehicle_type.as_deref(),
            battery_type: model.battery_type.as_deref(),
            voltage: model.voltage,
            range: model.range,
            top_speed: model.top_speed,
            seating_capacity: model.seating_capacity,
            price: model.price,
            features: &model.features,
            image_url: model.image_url.as_deref(),
        }
    }
}

/// Partial update; `None` fields are omitted from the `SET` clause.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = vehicle_models)]
pub(crate) struct VehicleModelChangeset<'a> {
    pub brand_id: Option<i32>,
    pub name: Option<&'a str>,
    pub year: Option<i32>,
    pub vehicle_type: Option<&'a str>,
    pub battery_type: Option<&'a str>,
    pub voltage: Option<i32>,
    pub range: Option<i32>,
    pub top_speed: Option<i32>,
    pub seating_capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub features: Option<&'a [String]>,
    pub image_url: Option<&'a str>,
}

impl<'a> From<&'a VehicleModelUpdate> for VehicleModelChangeset<'a> {
    fn from(update: &'a VehicleModelUpdate) -> Self {
        Self {
            brand_id: update.brand_id,
            name: update.name.as_deref(),
            year: update.year,
            vehicle_type: update.vehicle_type.as_deref(),
            battery_type: update.battery_type.as_deref(),
            voltage: update.voltage,
            range: update.range,
            top_speed: update.top_speed,
            seating_capacity: update.seating_capacity,
            price: update.price,
            features: update.features.as_deref(),
            image_url: update.image_url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PartRow {
    pub id: i32,
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub supplier_id: Option<i32>,
    pub compatible_brands: Vec<String>,
    pub compatible_models: Vec<String>,
    pub in_stock: bool,
    pub image_url: Option<String>,
    pub specifications: Option<Value>,
}

impl From<PartRow> for Part {
    fn from(row: PartRow) -> Self {
        Self {
            id: row.id,
            part_number: row.part_number,
            name: row.name,
            description: row.description,
            category: row.category,
            price: row.price,
            supplier_id: row.supplier_id,
            compatible_brands: row.compatible_brands,
            compatible_models: row.compatible_models,
            in_stock: row.in_stock,
            image_url: row.image_url,
            specifications: row.specifications,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = parts)]
pub(crate) struct NewPartRow<'a> {
    pub part_number: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: Option<Decimal>,
    pub supplier_id: Option<i32>,
    pub compatible_brands: &'a [String],
    pub compatible_models: &'a [String],
    pub in_stock: bool,
    pub image_url: Option<&'a str>,
    pub specifications: Option<&'a Value>,
}

impl<'a> From<&'a NewPart> for NewPartRow<'a> {
    fn from(part: &'a NewPart) -> Self {
        Self {
            part_number: &part.part_number,
            name: &part.name,
            description: part.description.as_deref(),
            category: part.category.as_deref(),
            price: part.price,
            supplier_id: part.supplier_id,
            compatible_brands: &part.compatible_brands,
            compatible_models: &part.compatible_models,
            in_stock: part.in_stock,
            image_url: part.image_url.as_deref(),
            specifications: part.specifications.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = suppliers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SupplierRow {
    pub id: i32,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub specialization: Option<String>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            contact_email: row.contact_email,
            phone: row.phone,
            website: row.website,
            location: row.location,
            specialization: row.specialization,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = suppliers)]
pub(crate) struct NewSupplierRow<'a> {
    pub name: &'a str,
    pub contact_email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub location: Option<&'a str>,
    pub specialization: Option<&'a str>,
}

impl<'a> From<&'a NewSupplier> for NewSupplierRow<'a> {
    fn from(supplier: &'a NewSupplier) -> Self {
        Self {
            name: &supplier.name,
            contact_email: supplier.contact_email.as_deref(),
            phone: supplier.phone.as_deref(),
            website: supplier.website.as_deref(),
            location: supplier.location.as_deref(),
            specialization: supplier.specialization.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wiring diagrams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wiring_diagrams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WiringDiagramRow {
    pub id: i32,
    pub model_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub image_data: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i32>,
    pub uploaded_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub is_custom_drawing: bool,
    pub tags: Vec<String>,
}

impl From<WiringDiagramRow> for WiringDiagram {
    fn from(row: WiringDiagramRow) -> Self {
        Self {
            id: row.id,
            model_id: row.model_id,
            brand_id: row.brand_id,
            title: row.title,
            description: row.description,
            year: row.year,
            image_data: row.image_data,
            file_name: row.file_name,
            mime_type: row.mime_type,
            file_size: row.file_size,
            uploaded_at: row.uploaded_at,
            image_url: row.image_url,
            is_custom_drawing: row.is_custom_drawing,
            tags: row.tags,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = wiring_diagrams)]
pub(crate) struct NewWiringDiagramRow<'a> {
    pub model_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub year: Option<i32>,
    pub image_data: Option<&'a str>,
    pub file_name: Option<&'a str>,
    pub mime_type: Option<&'a str>,
    pub file_size: Option<i32>,
    pub image_url: Option<&'a str>,
    pub is_custom_drawing: bool,
    pub tags: &'a [String],
}

impl<'a> From<&'a NewWiringDiagram> for NewWiringDiagramRow<'a> {
    fn from(diagram: &'a NewWiringDiagram) -> Self {
        Self {
            model_id: diagram.model_id,
            brand_id: diagram.brand_id,
            title: &diagram.title,
            description: diagram.description.as_deref(),
            year: diagram.year,
            image_data: diagram.image_data.as_deref(),
            file_name: diagram.file_name.as_deref(),
            mime_type: diagram.mime_type.as_deref(),
            file_size: diagram.file_size,
            image_url: diagram.image_url.as_deref(),
            is_custom_drawing: diagram.is_custom_drawing,
            tags: &diagram.tags,
        }
    }
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CartItemRow {
    pub id: i32,
    pub session_id: String,
    pub part_id: i32,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = crate::domain::CartValidationError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            session_id: CartSessionId::new(row.session_id)?,
            part_id: row.part_id,
            quantity: row.quantity,
            added_at: row.added_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_items)]
pub(crate) struct NewCartItemRow<'a> {
    pub session_id: &'a str,
    pub part_id: i32,
    pub quantity: i32,
}

// ---------------------------------------------------------------------------
// GPS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = gps_routes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GpsRouteRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_lat: Decimal,
    pub start_lng: Decimal,
    pub end_lat: Decimal,
    pub end_lng: Decimal,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
    pub distance: Option<Decimal>,
    pub estimated_time: Option<i32>,
    pub difficulty: Option<String>,
    pub vehicle_types: Vec<String>,
    pub waypoints: Option<Value>,
    pub road_types: Vec<String>,
    pub max_speed_limit: i32,
    pub safety_requirements: Option<Value>,
    pub restrictions: Option<Value>,
    pub amenities: Vec<String>,
    pub traffic_level: Option<String>,
    pub scenic_rating: Option<i32>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GpsRouteRow> for GpsRoute {
    fn from(row: GpsRouteRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            start_lat: row.start_lat,
            start_lng: row.start_lng,
            end_lat: row.end_lat,
            end_lng: row.end_lng,
            start_address: row.start_address,
            end_address: row.end_address,
            distance: row.distance,
            estimated_time: row.estimated_time,
            difficulty: row.difficulty,
            vehicle_types: row.vehicle_types,
            waypoints: row.waypoints,
            road_types: row.road_types,
            max_speed_limit: row.max_speed_limit,
            safety_requirements: row.safety_requirements,
            restrictions: row.restrictions,
            amenities: row.amenities,
            traffic_level: row.traffic_level,
            scenic_rating: row.scenic_rating,
            is_verified: row.is_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = gps_routes)]
pub(crate) struct NewGpsRouteRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub start_lat: Decimal,
    pub start_lng: Decimal,
    pub end_lat: Decimal,
    pub end_lng: Decimal,
    pub start_address: Option<&'a str>,
    pub end_address: Option<&'a str>,
    pub distance: Option<Decimal>,
    pub estimated_time: Option<i32>,
    pub difficulty: Option<&'a str>,
    pub vehicle_types: &'a [String],
    pub waypoints: Option<&'a Value>,
    pub road_types: &'a [String],
    pub max_speed_limit: i32,
    pub safety_requirements: Option<&'a Value>,
    pub restrictions: Option<&'a Value>,
    pub amenities: &'a [String],
    pub traffic_level: Option<&'a str>,
    pub scenic_rating: Option<i32>,
    pub is_verified: bool,
}

impl<'a> From<&'a NewGpsRoute> for NewGpsRouteRow<'a> {
    fn from(route: &'a NewGpsRoute) -> Self {
        Self {
            name: &route.name,
            description: route.description.as_deref(),
            start_lat: route.start_lat,
            start_lng: route.start_lng,
            end_lat: route.end_lat,
            end_lng: route.end_lng,
            start_address: route.start_address.as_deref(),
            end_address: route.end_address.as_deref(),
            distance: route.distance,
            estimated_time: route.estimated_time,
            difficulty: route.difficulty.as_deref(),
            vehicle_types: &route.vehicle_types,
            waypoints: route.waypoints.as_ref(),
            road_types: &route.road_types,
            max_speed_limit: route.max_speed_limit,
            safety_requirements: route.safety_requirements.as_ref(),
            restrictions: route.restrictions.as_ref(),
            amenities: &route.amenities,
            traffic_level: route.traffic_level.as_deref(),
            scenic_rating: route.scenic_rating,
            is_verified: route.is_verified,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = navigation_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NavigationSessionRow {
    pub id: i32,
    pub route_id: i32,
    pub session_id: String,
    pub vehicle_type: Option<String>,
    pub status: String,
    pub current_lat: Option<Decimal>,
    pub current_lng: Option<Decimal>,
    pub current_waypoint_index: i32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_distance: Option<Decimal>,
    pub average_speed: Option<Decimal>,
}

impl From<NavigationSessionRow> for NavigationSession {
    fn from(row: NavigationSessionRow) -> Self {
        Self {
            id: row.id,
            route_id: row.route_id,
            session_id: row.session_id,
            vehicle_type: row.vehicle_type,
            status: row.status,
            current_lat: row.current_lat,
            current_lng: row.current_lng,
            current_waypoint_index: row.current_waypoint_index,
            started_at: row.started_at,
            completed_at: row.completed_at,
            total_distance: row.total_distance,
            average_speed: row.average_speed,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = navigation_sessions)]
pub(crate) struct NewNavigationSessionRow<'a> {
    pub route_id: i32,
    pub session_id: &'a str,
    pub vehicle_type: Option<&'a str>,
    pub status: &'a str,
    pub current_lat: Option<Decimal>,
    pub current_lng: Option<Decimal>,
    pub current_waypoint_index: i32,
    pub total_distance: Option<Decimal>,
    pub average_speed: Option<Decimal>,
}

impl<'a> From<&'a NewNavigationSession> for NewNavigationSessionRow<'a> {
    fn from(session: &'a NewNavigationSession) -> Self {
        Self {
            route_id: session.route_id,
            session_id: &session.session_id,
            vehicle_type: session.vehicle_type.as_deref(),
            status: &session.status,
            current_lat: session.current_lat,
            current_lng: session.current_lng,
            current_waypoint_index: session.current_waypoint_index,
            total_distance: session.total_distance,
            average_speed: session.average_speed,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = navigation_sessions)]
pub(crate) struct NavigationSessionChangeset<'a> {
    pub vehicle_type: Option<&'a str>,
    pub status: Option<&'a str>,
    pub current_lat: Option<Decimal>,
    pub current_lng: Option<Decimal>,
    pub current_waypoint_index: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_distance: Option<Decimal>,
    pub average_speed: Option<Decimal>,
}

impl<'a> From<&'a NavigationSessionChanges> for NavigationSessionChangeset<'a> {
    fn from(changes: &'a NavigationSessionChanges) -> Self {
        Self {
            vehicle_type: changes.vehicle_type.as_deref(),
            status: changes.status.as_deref(),
            current_lat: changes.current_lat,
            current_lng: changes.current_lng,
            current_waypoint_index: changes.current_waypoint_index,
            completed_at: changes.completed_at,
            total_distance: changes.total_distance,
            average_speed: changes.average_speed,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = gps_tracking_points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrackingPointRow {
    pub id: i32,
    pub session_id: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub speed: Option<Decimal>,
    pub heading: Option<Decimal>,
    pub accuracy: Option<Decimal>,
    pub road_type: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl From<TrackingPointRow> for TrackingPoint {
    fn from(row: TrackingPointRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            latitude: row.latitude,
            longitude: row.longitude,
            speed: row.speed,
            heading: row.heading,
            accuracy: row.accuracy,
            road_type: row.road_type,
            timestamp: row.recorded_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = gps_tracking_points)]
pub(crate) struct NewTrackingPointRow<'a> {
    pub session_id: &'a str,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub speed: Option<Decimal>,
    pub heading: Option<Decimal>,
    pub accuracy: Option<Decimal>,
    pub road_type: Option<&'a str>,
    pub recorded_at: DateTime<Utc>,
}
