//! Port for GPS routes, navigation sessions and tracking points.

use async_trait::async_trait;

use crate::domain::{
    GpsRoute, NavigationSession, NavigationSessionChanges, NewGpsRoute, NewNavigationSession,
    NewTrackingPoint, RouteFilter, TrackingPoint,
};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GpsRepository: Send + Sync {
    async fn list_routes(&self, filter: &RouteFilter) -> Result<Vec<GpsRoute>, RepositoryError>;

    async fn find_route(&self, id: i32) -> Result<Option<GpsRoute>, RepositoryError>;

    async fn create_route(&self, route: &NewGpsRoute) -> Result<GpsRoute, RepositoryError>;

    /// Start a session. A reused session id raises
    /// [`RepositoryError::Conflict`]; an unknown route raises
    /// [`RepositoryError::InvalidReference`].
    async fn start_navigation(
        &self,
        session: &NewNavigationSession,
    ) -> Result<NavigationSession, RepositoryError>;

    async fn find_navigation(
        &self,
        session_id: &str,
    ) -> Result<Option<NavigationSession>, RepositoryError>;

    /// Apply a partial update keyed by session id. `Ok(None)` when absent.
    async fn update_navigation(
        &self,
        session_id: &str,
        changes: &NavigationSessionChanges,
    ) -> Result<Option<NavigationSession>, RepositoryError>;

    /// Append a tracking point. The caller resolves a missing timestamp.
    async fn record_tracking_point(
        &self,
        point: &NewTrackingPoint,
    ) -> Result<TrackingPoint, RepositoryError>;

    /// Points recorded for `session_id`, by timestamp then id.
    async fn list_tracking_points(
        &self,
        session_id: &str,
    ) -> Result<Vec<TrackingPoint>, RepositoryError>;
}
