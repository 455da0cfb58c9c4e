//! Test utilities for the backend crate.
//!
//! [`InMemoryStore`] implements every repository port over plain vectors so
//! handler tests (in `src/`) and integration tests (in `tests/`) can drive
//! the HTTP layer without PostgreSQL. It mirrors the database rules the
//! handlers rely on: unique columns raise conflicts, dangling references
//! raise invalid-reference errors, and ids are assigned sequentially.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    CartRepository, CatalogueRepository, GpsRepository, RepositoryError, WiringDiagramRepository,
};
use crate::domain::{
    Brand, CartItem, CartSessionId, DiagramFilter, GpsRoute, ModelFilter, NavigationSession,
    NavigationSessionChanges, NewBrand, NewCartItem, NewGpsRoute, NewNavigationSession, NewPart,
    NewSupplier, NewTrackingPoint, NewVehicleModel, NewWiringDiagram, Part, PartFilter, Quantity,
    RouteFilter, SearchResults, SearchTerm, Supplier, TrackingPoint, VehicleModel,
    VehicleModelUpdate, WiringDiagram,
};
use crate::inbound::http::state::HttpState;

/// Instant reported by [`FixtureClock`], as serialised in JSON bodies.
pub const FIXTURE_NOW: &str = "2025-06-01T12:00:00Z";

/// Clock frozen at [`FIXTURE_NOW`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct Tables {
    brands: Vec<Brand>,
    models: Vec<VehicleModel>,
    diagrams: Vec<WiringDiagram>,
    parts: Vec<Part>,
    suppliers: Vec<Supplier>,
    cart: Vec<CartItem>,
    routes: Vec<GpsRoute>,
    navigation: Vec<NavigationSession>,
    tracking: Vec<TrackingPoint>,
    last_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory implementation of all repository ports.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(FixtureClock))
    }
}

impl InMemoryStore {
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::connection("in-memory store lock poisoned"))
    }
}

/// HTTP state whose four ports share one fresh [`InMemoryStore`].
pub fn http_state() -> HttpState {
    http_state_with(Arc::new(InMemoryStore::default()))
}

/// HTTP state backed by an existing store, for tests that seed it first.
pub fn http_state_with(store: Arc<InMemoryStore>) -> HttpState {
    HttpState::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        Arc::new(FixtureClock),
    )
}

fn ensure_unique(taken: bool, constraint: &str) -> Result<(), RepositoryError> {
    if taken {
        Err(RepositoryError::conflict(constraint))
    } else {
        Ok(())
    }
}

fn ensure_exists(present: bool, constraint: &str) -> Result<(), RepositoryError> {
    if present {
        Ok(())
    } else {
        Err(RepositoryError::invalid_reference(constraint))
    }
}

fn apply_model_update(model: &mut VehicleModel, changes: &VehicleModelUpdate) {
    let changes = changes.clone();
    if let Some(brand_id) = changes.brand_id {
        model.brand_id = brand_id;
    }
    if let Some(name) = changes.name {
        model.name = name;
    }
    if let Some(features) = changes.features {
        model.features = features;
    }
    model.year = changes.year.or(model.year);
    model.vehicle_type = changes.vehicle_type.or(model.vehicle_type.take());
    model.battery_type = changes.battery_type.or(model.battery_type.take());
    model.voltage = changes.voltage.or(model.voltage);
    model.range = changes.range.or(model.range);
    model.top_speed = changes.top_speed.or(model.top_speed);
    model.seating_capacity = changes.seating_capacity.or(model.seating_capacity);
    model.price = changes.price.or(model.price);
    model.image_url = changes.image_url.or(model.image_url.take());
}

fn apply_navigation_changes(session: &mut NavigationSession, changes: &NavigationSessionChanges) {
    let changes = changes.clone();
    if let Some(status) = changes.status {
        session.status = status;
    }
    if let Some(index) = changes.current_waypoint_index {
        session.current_waypoint_index = index;
    }
    session.vehicle_type = changes.vehicle_type.or(session.vehicle_type.take());
    session.current_lat = changes.current_lat.or(session.current_lat);
    session.current_lng = changes.current_lng.or(session.current_lng);
    session.completed_at = changes.completed_at.or(session.completed_at);
    session.total_distance = changes.total_distance.or(session.total_distance);
    session.average_speed = changes.average_speed.or(session.average_speed);
}

#[async_trait]
impl CatalogueRepository for InMemoryStore {
    async fn list_brands(&self) -> Result<Vec<Brand>, RepositoryError> {
        Ok(self.lock()?.brands.clone())
    }

    async fn find_brand(&self, id: i32) -> Result<Option<Brand>, RepositoryError> {
        Ok(self.lock()?.brands.iter().find(|b| b.id == id).cloned())
    }

    async fn create_brand(&self, brand: &NewBrand) -> Result<Brand, RepositoryError> {
        let mut tables = self.lock()?;
        ensure_unique(
            tables.brands.iter().any(|b| b.name == brand.name),
            "brands_name_key",
        )?;
        let new = brand.clone();
        let row = Brand {
            id: tables.next_id(),
            name: new.name,
            description: new.description,
            specialization: new.specialization,
            key_features: new.key_features,
            website: new.website,
            market_position: new.market_position,
            logo_url: new.logo_url,
        };
        tables.brands.push(row.clone());
        Ok(row)
    }

    async fn list_models(&self, filter: &ModelFilter) -> Result<Vec<VehicleModel>, RepositoryError> {
        Ok(self
            .lock()?
            .models
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn find_model(&self, id: i32) -> Result<Option<VehicleModel>, RepositoryError> {
        Ok(self.lock()?.models.iter().find(|m| m.id == id).cloned())
    }

    async fn create_model(&self, model: &NewVehicleModel) -> Result<VehicleModel, RepositoryError> {
        let mut tables = self.lock()?;
        ensure_exists(
            tables.brands.iter().any(|b| b.id == model.brand_id),
            "models_brand_id_fkey",
        )?;
        let new = model.clone();
        let row = VehicleModel {
            id: tables.next_id(),
            brand_id: new.brand_id,
            name: new.name,
            year: new.year,
            vehicle_type: new.vehicle_type,
            battery_type: new.battery_type,
            voltage: new.voltage,
            range: new.range,
            top_speed: new.top_speed,
            seating_capacity: new.seating_capacity,
            price: new.price,
            features: new.features,
            image_url: new.image_url,
        };
        tables.models.push(row.clone());
        Ok(row)
    }

    async fn update_model(
        &self,
        id: i32,
        changes: &VehicleModelUpdate,
    ) -> Result<Option<VehicleModel>, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.models.iter().any(|m| m.id == id) {
            return Ok(None);
        }
        if let Some(brand_id) = changes.brand_id {
            ensure_exists(
                tables.brands.iter().any(|b| b.id == brand_id),
                "models_brand_id_fkey",
            )?;
        }
        Ok(tables.models.iter_mut().find(|m| m.id == id).map(|model| {
            apply_model_update(model, changes);
            model.clone()
        }))
    }

    async fn list_parts(&self, filter: &PartFilter) -> Result<Vec<Part>, RepositoryError> {
        let tables = self.lock()?;
        let brand_name = match filter.brand_id {
            Some(id) => match tables.brands.iter().find(|b| b.id == id) {
                Some(brand) => Some(brand.name.clone()),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        Ok(tables
            .parts
            .iter()
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| p.category.as_ref() == Some(c))
            })
            .filter(|p| {
                brand_name
                    .as_ref()
                    .is_none_or(|name| p.compatible_brands.contains(name))
            })
            .cloned()
            .collect())
    }

    async fn find_part(&self, id: i32) -> Result<Option<Part>, RepositoryError> {
        Ok(self.lock()?.parts.iter().find(|p| p.id == id).cloned())
    }

    async fn create_part(&self, part: &NewPart) -> Result<Part, RepositoryError> {
        let mut tables = self.lock()?;
        ensure_unique(
            tables.parts.iter().any(|p| p.part_number == part.part_number),
            "parts_part_number_key",
        )?;
        if let Some(supplier_id) = part.supplier_id {
            ensure_exists(
                tables.suppliers.iter().any(|s| s.id == supplier_id),
                "parts_supplier_id_fkey",
            )?;
        }
        let new = part.clone();
        let row = Part {
            id: tables.next_id(),
            part_number: new.part_number,
            name: new.name,
            description: new.description,
            category: new.category,
            price: new.price,
            supplier_id: new.supplier_id,
            compatible_brands: new.compatible_brands,
            compatible_models: new.compatible_models,
            in_stock: new.in_stock,
            image_url: new.image_url,
            specifications: new.specifications,
        };
        tables.parts.push(row.clone());
        Ok(row)
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, RepositoryError> {
        Ok(self.lock()?.suppliers.clone())
    }

    async fn find_supplier(&self, id: i32) -> Result<Option<Supplier>, RepositoryError> {
        Ok(self.lock()?.suppliers.iter().find(|s| s.id == id).cloned())
    }

    async fn create_supplier(&self, supplier: &NewSupplier) -> Result<Supplier, RepositoryError> {
        let mut tables = self.lock()?;
        ensure_unique(
            tables.suppliers.iter().any(|s| s.name == supplier.name),
            "suppliers_name_key",
        )?;
        let new = supplier.clone();
        let row = Supplier {
            id: tables.next_id(),
            name: new.name,
            contact_email: new.contact_email,
            phone: new.phone,
            website: new.website,
            location: new.location,
            specialization: new.specialization,
        };
        tables.suppliers.push(row.clone());
        Ok(row)
    }

    async fn search(&self, term: &SearchTerm) -> Result<SearchResults, RepositoryError> {
        let tables = self.lock()?;
        Ok(SearchResults {
            brands: tables
                .brands
                .iter()
                .filter(|b| term.matches(&b.name) || term.matches_opt(b.description.as_deref()))
                .cloned()
                .collect(),
            models: tables
                .models
                .iter()
                .filter(|m| term.matches(&m.name) || term.matches_opt(m.vehicle_type.as_deref()))
                .cloned()
                .collect(),
            parts: tables
                .parts
                .iter()
                .filter(|p| {
                    term.matches(&p.name)
                        || term.matches(&p.part_number)
                        || term.matches_opt(p.description.as_deref())
                })
                .cloned()
                .collect(),
            suppliers: tables
                .suppliers
                .iter()
                .filter(|s| term.matches(&s.name))
                .cloned()
                .collect(),
        })
    }
}

#[async_trait]
impl WiringDiagramRepository for InMemoryStore {
    async fn list(&self, filter: &DiagramFilter) -> Result<Vec<WiringDiagram>, RepositoryError> {
        Ok(self
            .lock()?
            .diagrams
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn find(&self, id: i32) -> Result<Option<WiringDiagram>, RepositoryError> {
        Ok(self.lock()?.diagrams.iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, diagram: &NewWiringDiagram) -> Result<WiringDiagram, RepositoryError> {
        let mut tables = self.lock()?;
        if let Some(model_id) = diagram.model_id {
            ensure_exists(
                tables.models.iter().any(|m| m.id == model_id),
                "wiring_diagrams_model_id_fkey",
            )?;
        }
        if let Some(brand_id) = diagram.brand_id {
            ensure_exists(
                tables.brands.iter().any(|b| b.id == brand_id),
                "wiring_diagrams_brand_id_fkey",
            )?;
        }
        let new = diagram.clone();
        let row = WiringDiagram {
            id: tables.next_id(),
            model_id: new.model_id,
            brand_id: new.brand_id,
            title: new.title,
            description: new.description,
            year: new.year,
            image_data: new.image_data,
            file_name: new.file_name,
            mime_type: new.mime_type,
            file_size: new.file_size,
            uploaded_at: self.clock.utc(),
            image_url: new.image_url,
            is_custom_drawing: new.is_custom_drawing,
            tags: new.tags,
        };
        tables.diagrams.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    async fn list(&self, session: &CartSessionId) -> Result<Vec<CartItem>, RepositoryError> {
        Ok(self
            .lock()?
            .cart
            .iter()
            .filter(|item| &item.session_id == session)
            .cloned()
            .collect())
    }

    async fn add(&self, item: &NewCartItem) -> Result<CartItem, RepositoryError> {
        let mut tables = self.lock()?;
        ensure_exists(
            tables.parts.iter().any(|p| p.id == item.part_id),
            "cart_items_part_id_fkey",
        )?;
        let row = CartItem {
            id: tables.next_id(),
            session_id: item.session_id.clone(),
            part_id: item.part_id,
            quantity: item.quantity.get(),
            added_at: self.clock.utc(),
        };
        tables.cart.push(row.clone());
        Ok(row)
    }

    async fn update_quantity(
        &self,
        session: &CartSessionId,
        id: i32,
        quantity: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let mut tables = self.lock()?;
        Ok(tables
            .cart
            .iter_mut()
            .find(|item| item.id == id && &item.session_id == session)
            .map(|item| {
                item.quantity = quantity.get();
                item.clone()
            }))
    }

    async fn remove(&self, session: &CartSessionId, id: i32) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let before = tables.cart.len();
        tables
            .cart
            .retain(|item| !(item.id == id && &item.session_id == session));
        Ok(tables.cart.len() < before)
    }

    async fn clear(&self, session: &CartSessionId) -> Result<usize, RepositoryError> {
        let mut tables = self.lock()?;
        let before = tables.cart.len();
        tables.cart.retain(|item| &item.session_id != session);
        Ok(before - tables.cart.len())
    }
}

#[async_trait]
impl GpsRepository for InMemoryStore {
    async fn list_routes(&self, filter: &RouteFilter) -> Result<Vec<GpsRoute>, RepositoryError> {
        Ok(self
            .lock()?
            .routes
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn find_route(&self, id: i32) -> Result<Option<GpsRoute>, RepositoryError> {
        Ok(self.lock()?.routes.iter().find(|r| r.id == id).cloned())
    }

    async fn create_route(&self, route: &NewGpsRoute) -> Result<GpsRoute, RepositoryError> {
        let mut tables = self.lock()?;
        let now = self.clock.utc();
        let new = route.clone();
        let row = GpsRoute {
            id: tables.next_id(),
            name: new.name,
            description: new.description,
            start_lat: new.start_lat,
            start_lng: new.start_lng,
            end_lat: new.end_lat,
            end_lng: new.end_lng,
            start_address: new.start_address,
            end_address: new.end_address,
            distance: new.distance,
            estimated_time: new.estimated_time,
            difficulty: new.difficulty,
            vehicle_types: new.vehicle_types,
            waypoints: new.waypoints,
            road_types: new.road_types,
            max_speed_limit: new.max_speed_limit,
            safety_requirements: new.safety_requirements,
            restrictions: new.restrictions,
            amenities: new.amenities,
            traffic_level: new.traffic_level,
            scenic_rating: new.scenic_rating,
            is_verified: new.is_verified,
            created_at: now,
            updated_at: now,
        };
        tables.routes.push(row.clone());
        Ok(row)
    }

    async fn start_navigation(
        &self,
        session: &NewNavigationSession,
    ) -> Result<NavigationSession, RepositoryError> {
        let mut tables = self.lock()?;
        ensure_unique(
            tables
                .navigation
                .iter()
                .any(|n| n.session_id == session.session_id),
            "navigation_sessions_session_id_key",
        )?;
        ensure_exists(
            tables.routes.iter().any(|r| r.id == session.route_id),
            "navigation_sessions_route_id_fkey",
        )?;
        let new = session.clone();
        let row = NavigationSession {
            id: tables.next_id(),
            route_id: new.route_id,
            session_id: new.session_id,
            vehicle_type: new.vehicle_type,
            status: new.status,
            current_lat: new.current_lat,
            current_lng: new.current_lng,
            current_waypoint_index: new.current_waypoint_index,
            started_at: self.clock.utc(),
            completed_at: None,
            total_distance: new.total_distance,
            average_speed: new.average_speed,
        };
        tables.navigation.push(row.clone());
        Ok(row)
    }

    async fn find_navigation(
        &self,
        session_id: &str,
    ) -> Result<Option<NavigationSession>, RepositoryError> {
        Ok(self
            .lock()?
            .navigation
            .iter()
            .find(|n| n.session_id == session_id)
            .cloned())
    }

    async fn update_navigation(
        &self,
        session_id: &str,
        changes: &NavigationSessionChanges,
    ) -> Result<Option<NavigationSession>, RepositoryError> {
        let mut tables = self.lock()?;
        Ok(tables
            .navigation
            .iter_mut()
            .find(|n| n.session_id == session_id)
            .map(|session| {
                apply_navigation_changes(session, changes);
                session.clone()
            }))
    }

    async fn record_tracking_point(
        &self,
        point: &NewTrackingPoint,
    ) -> Result<TrackingPoint, RepositoryError> {
        let mut tables = self.lock()?;
        let new = point.clone();
        let row = TrackingPoint {
            id: tables.next_id(),
            session_id: new.session_id,
            latitude: new.latitude,
            longitude: new.longitude,
            speed: new.speed,
            heading: new.heading,
            accuracy: new.accuracy,
            road_type: new.road_type,
            timestamp: new.timestamp.unwrap_or_else(|| self.clock.utc()),
        };
        tables.tracking.push(row.clone());
        Ok(row)
    }

    async fn list_tracking_points(
        &self,
        session_id: &str,
    ) -> Result<Vec<TrackingPoint>, RepositoryError> {
        let mut points: Vec<TrackingPoint> = self
            .lock()?
            .tracking
            .iter()
            .filter(|p| p.session_id == session_id)
            .cloned()
            .collect();
        points.sort_by_key(|p| (p.timestamp, p.id));
        Ok(points)
    }
}
