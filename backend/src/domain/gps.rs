//! GPS routes, live navigation sessions and tracking points.
//!
//! Navigation sessions are keyed by a caller-chosen string. Tracking points
//! join to them loosely by that same string and are append-only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Speed ceiling applied to routes that do not state one.
pub const DEFAULT_MAX_SPEED_LIMIT: i32 = 35;
/// Status given to navigation sessions that do not state one.
pub const DEFAULT_NAVIGATION_STATUS: &str = "active";

/// Validation errors for GPS payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GpsValidationError {
    #[error("scenicRating must be between 1 and 5, got {0}")]
    ScenicRatingOutOfRange(i32),
    #[error("sessionId must not be empty")]
    EmptySessionId,
    #[error("name must not be empty")]
    EmptyName,
}

/// A curated route suitable for low-speed vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Route)]
pub struct GpsRoute {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "33.4484000")]
    pub start_lat: Decimal,
    #[schema(value_type = String)]
    pub start_lng: Decimal,
    #[schema(value_type = String)]
    pub end_lat: Decimal,
    #[schema(value_type = String)]
    pub end_lng: Decimal,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
    #[schema(value_type = Option<String>)]
    pub distance: Option<Decimal>,
    pub estimated_time: Option<i32>,
    pub difficulty: Option<String>,
    pub vehicle_types: Vec<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub waypoints: Option<Value>,
    pub road_types: Vec<String>,
    pub max_speed_limit: i32,
    #[schema(value_type = Option<Object>)]
    pub safety_requirements: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub restrictions: Option<Value>,
    pub amenities: Vec<String>,
    pub traffic_level: Option<String>,
    #[schema(minimum = 1, maximum = 5)]
    pub scenic_rating: Option<i32>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for [`GpsRoute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = NewRoute)]
pub struct NewGpsRoute {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub start_lat: Decimal,
    #[schema(value_type = String)]
    pub start_lng: Decimal,
    #[schema(value_type = String)]
    pub end_lat: Decimal,
    #[schema(value_type = String)]
    pub end_lng: Decimal,
    #[serde(default)]
    pub start_address: Option<String>,
    #[serde(default)]
    pub end_address: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub distance: Option<Decimal>,
    #[serde(default)]
    pub estimated_time: Option<i32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub vehicle_types: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub waypoints: Option<Value>,
    #[serde(default)]
    pub road_types: Vec<String>,
    #[serde(default = "default_max_speed_limit")]
    pub max_speed_limit: i32,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub safety_requirements: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub restrictions: Option<Value>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub traffic_level: Option<String>,
    #[serde(default)]
    pub scenic_rating: Option<i32>,
    #[serde(default)]
    pub is_verified: bool,
}

fn default_max_speed_limit() -> i32 {
    DEFAULT_MAX_SPEED_LIMIT
}

impl NewGpsRoute {
    pub fn validate(&self) -> Result<(), GpsValidationError> {
        if self.name.trim().is_empty() {
            return Err(GpsValidationError::EmptyName);
        }
        match self.scenic_rating {
            Some(rating) if !(1..=5).contains(&rating) => {
                Err(GpsValidationError::ScenicRatingOutOfRange(rating))
            }
            _ => Ok(()),
        }
    }
}

/// Optional predicates for listing routes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteFilter {
    /// Route must list this tag among its `vehicle_types`.
    pub vehicle_type: Option<String>,
    /// Route's `max_speed_limit` must not exceed this value.
    pub max_speed_limit: Option<i32>,
}

impl RouteFilter {
    pub fn matches(&self, route: &GpsRoute) -> bool {
        self.vehicle_type
            .as_ref()
            .is_none_or(|tag| route.vehicle_types.contains(tag))
            && self
                .max_speed_limit
                .is_none_or(|ceiling| route.max_speed_limit <= ceiling)
    }
}

/// A vehicle actively following a [`GpsRoute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSession {
    pub id: i32,
    pub route_id: i32,
    pub session_id: String,
    pub vehicle_type: Option<String>,
    #[schema(example = "active")]
    pub status: String,
    #[schema(value_type = Option<String>)]
    pub current_lat: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub current_lng: Option<Decimal>,
    pub current_waypoint_index: i32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub total_distance: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub average_speed: Option<Decimal>,
}

/// Payload for starting a navigation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewNavigationSession {
    pub route_id: i32,
    pub session_id: String,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub current_lat: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub current_lng: Option<Decimal>,
    #[serde(default)]
    pub current_waypoint_index: i32,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub total_distance: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub average_speed: Option<Decimal>,
}

fn default_status() -> String {
    DEFAULT_NAVIGATION_STATUS.to_owned()
}

impl NewNavigationSession {
    pub fn validate(&self) -> Result<(), GpsValidationError> {
        if self.session_id.trim().is_empty() {
            return Err(GpsValidationError::EmptySessionId);
        }
        Ok(())
    }
}

/// Partial update for a [`NavigationSession`]; absent fields are untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationSessionChanges {
    pub vehicle_type: Option<String>,
    pub status: Option<String>,
    #[schema(value_type = Option<String>)]
    pub current_lat: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub current_lng: Option<Decimal>,
    pub current_waypoint_index: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub total_distance: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub average_speed: Option<Decimal>,
}

impl NavigationSessionChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single recorded position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPoint {
    pub id: i32,
    pub session_id: String,
    #[schema(value_type = String)]
    pub latitude: Decimal,
    #[schema(value_type = String)]
    pub longitude: Decimal,
    #[schema(value_type = Option<String>)]
    pub speed: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub heading: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub accuracy: Option<Decimal>,
    pub road_type: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Payload for recording a position. A missing `timestamp` means "now".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTrackingPoint {
    pub session_id: String,
    #[schema(value_type = String)]
    pub latitude: Decimal,
    #[schema(value_type = String)]
    pub longitude: Decimal,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub speed: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub heading: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub accuracy: Option<Decimal>,
    #[serde(default)]
    pub road_type: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewTrackingPoint {
    pub fn validate(&self) -> Result<(), GpsValidationError> {
        if self.session_id.trim().is_empty() {
            return Err(GpsValidationError::EmptySessionId);
        }
        Ok(())
    }
}
