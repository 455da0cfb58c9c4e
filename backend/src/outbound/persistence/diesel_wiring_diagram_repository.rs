//! PostgreSQL-backed `WiringDiagramRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, WiringDiagramRepository};
use crate::domain::{DiagramFilter, NewWiringDiagram, WiringDiagram};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewWiringDiagramRow, WiringDiagramRow};
use super::pool::DbPool;
use super::schema::wiring_diagrams;

#[derive(Clone)]
pub struct DieselWiringDiagramRepository {
    pool: DbPool,
}

impl DieselWiringDiagramRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WiringDiagramRepository for DieselWiringDiagramRepository {
    async fn list(&self, filter: &DiagramFilter) -> Result<Vec<WiringDiagram>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = wiring_diagrams::table
            .select(WiringDiagramRow::as_select())
            .into_boxed();
        if let Some(brand_id) = filter.brand_id {
            query = query.filter(wiring_diagrams::brand_id.eq(brand_id));
        }
        if let Some(model_id) = filter.model_id {
            query = query.filter(wiring_diagrams::model_id.eq(model_id));
        }
        let rows: Vec<WiringDiagramRow> = query
            .order(wiring_diagrams::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(WiringDiagram::from).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<WiringDiagram>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        wiring_diagrams::table
            .find(id)
            .select(WiringDiagramRow::as_select())
            .first::<WiringDiagramRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(WiringDiagram::from))
            .map_err(map_diesel_error)
    }

    async fn create(&self, diagram: &NewWiringDiagram) -> Result<WiringDiagram, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(wiring_diagrams::table)
            .values(NewWiringDiagramRow::from(diagram))
            .returning(WiringDiagramRow::as_returning())
            .get_result::<WiringDiagramRow>(&mut conn)
            .await
            .map(WiringDiagram::from)
            .map_err(map_diesel_error)
    }
}
