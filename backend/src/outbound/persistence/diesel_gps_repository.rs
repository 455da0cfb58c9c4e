//! PostgreSQL-backed `GpsRepository`.
//!
//! Navigation sessions and tracking points are written independently; there
//! is no transaction spanning them.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GpsRepository, RepositoryError};
use crate::domain::{
    GpsRoute, NavigationSession, NavigationSessionChanges, NewGpsRoute, NewNavigationSession,
    NewTrackingPoint, RouteFilter, TrackingPoint,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    GpsRouteRow, NavigationSessionChangeset, NavigationSessionRow, NewGpsRouteRow,
    NewNavigationSessionRow, NewTrackingPointRow, TrackingPointRow,
};
use super::pool::DbPool;
use super::schema::{gps_routes, gps_tracking_points, navigation_sessions};

#[derive(Clone)]
pub struct DieselGpsRepository {
    pool: DbPool,
}

impl DieselGpsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GpsRepository for DieselGpsRepository {
    async fn list_routes(&self, filter: &RouteFilter) -> Result<Vec<GpsRoute>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = gps_routes::table
            .select(GpsRouteRow::as_select())
            .into_boxed();
        if let Some(vehicle_type) = filter.vehicle_type.as_ref() {
            query = query.filter(gps_routes::vehicle_types.contains(vec![vehicle_type.clone()]));
        }
        if let Some(ceiling) = filter.max_speed_limit {
            query = query.filter(gps_routes::max_speed_limit.le(ceiling));
        }
        let rows: Vec<GpsRouteRow> = query
            .order(gps_routes::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(GpsRoute::from).collect())
    }

    async fn find_route(&self, id: i32) -> Result<Option<GpsRoute>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        gps_routes::table
            .find(id)
            .select(GpsRouteRow::as_select())
            .first::<GpsRouteRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(GpsRoute::from))
            .map_err(map_diesel_error)
    }

    async fn create_route(&self, route: &NewGpsRoute) -> Result<GpsRoute, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(gps_routes::table)
            .values(NewGpsRouteRow::from(route))
            .returning(GpsRouteRow::as_returning())
            .get_result::<GpsRouteRow>(&mut conn)
            .await
            .map(GpsRoute::from)
            .map_err(map_diesel_error)
    }

    async fn start_navigation(
        &self,
        session: &NewNavigationSession,
    ) -> Result<NavigationSession, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(navigation_sessions::table)
            .values(NewNavigationSessionRow::from(session))
            .returning(NavigationSessionRow::as_returning())
            .get_result::<NavigationSessionRow>(&mut conn)
            .await
            .map(NavigationSession::from)
            .map_err(map_diesel_error)
    }

    async fn find_navigation(
        &self,
        session_id: &str,
    ) -> Result<Option<NavigationSession>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        navigation_sessions::table
            .filter(navigation_sessions::session_id.eq(session_id))
            .select(NavigationSessionRow::as_select())
            .first::<NavigationSessionRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(NavigationSession::from))
            .map_err(map_diesel_error)
    }

    async fn update_navigation(
        &self,
        session_id: &str,
        changes: &NavigationSessionChanges,
    ) -> Result<Option<NavigationSession>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = navigation_sessions::table.filter(navigation_sessions::session_id.eq(session_id));
        diesel::update(target)
            .set(NavigationSessionChangeset::from(changes))
            .returning(NavigationSessionRow::as_returning())
            .get_result::<NavigationSessionRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(NavigationSession::from))
            .map_err(map_diesel_error)
    }

    async fn record_tracking_point(
        &self,
        point: &NewTrackingPoint,
    ) -> Result<TrackingPoint, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTrackingPointRow {
            session_id: &point.session_id,
            latitude: point.latitude,
            longitude: point.longitude,
            speed: point.speed,
            heading: point.heading,
            accuracy: point.accuracy,
            road_type: point.road_type.as_deref(),
            recorded_at: point.timestamp.unwrap_or_else(Utc::now),
        };
        diesel::insert_into(gps_tracking_points::table)
            .values(row)
            .returning(TrackingPointRow::as_returning())
            .get_result::<TrackingPointRow>(&mut conn)
            .await
            .map(TrackingPoint::from)
            .map_err(map_diesel_error)
    }

    async fn list_tracking_points(
        &self,
        session_id: &str,
    ) -> Result<Vec<TrackingPoint>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TrackingPointRow> = gps_tracking_points::table
            .filter(gps_tracking_points::session_id.eq(session_id))
            .order((
                gps_tracking_points::recorded_at.asc(),
                gps_tracking_points::id.asc(),
            ))
            .select(TrackingPointRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(TrackingPoint::from).collect())
    }
}
