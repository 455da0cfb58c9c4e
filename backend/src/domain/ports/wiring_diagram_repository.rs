//! Port for wiring diagram storage.

use async_trait::async_trait;

use crate::domain::{DiagramFilter, NewWiringDiagram, WiringDiagram};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WiringDiagramRepository: Send + Sync {
    async fn list(&self, filter: &DiagramFilter) -> Result<Vec<WiringDiagram>, RepositoryError>;

    async fn find(&self, id: i32) -> Result<Option<WiringDiagram>, RepositoryError>;

    async fn create(&self, diagram: &NewWiringDiagram) -> Result<WiringDiagram, RepositoryError>;
}
