//! Port for the product catalogue: brands, models, parts and suppliers.
//!
//! Reads return rows ordered by id. `find_*` lookups yield `Ok(None)` for a
//! missing row so callers decide how absence is reported.

use async_trait::async_trait;

use crate::domain::{
    Brand, ModelFilter, NewBrand, NewPart, NewSupplier, NewVehicleModel, Part, PartFilter,
    SearchResults, SearchTerm, Supplier, VehicleModel, VehicleModelUpdate,
};

use super::RepositoryError;

/// Port for reading and writing catalogue entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    async fn list_brands(&self) -> Result<Vec<Brand>, RepositoryError>;

    async fn find_brand(&self, id: i32) -> Result<Option<Brand>, RepositoryError>;

    /// Insert a brand. Duplicate names raise [`RepositoryError::Conflict`].
    async fn create_brand(&self, brand: &NewBrand) -> Result<Brand, RepositoryError>;

    async fn list_models(&self, filter: &ModelFilter)
    -> Result<Vec<VehicleModel>, RepositoryError>;

    async fn find_model(&self, id: i32) -> Result<Option<VehicleModel>, RepositoryError>;

    async fn create_model(&self, model: &NewVehicleModel)
    -> Result<VehicleModel, RepositoryError>;

    /// Apply a partial update. Returns `Ok(None)` when no row has `id`.
    async fn update_model(
        &self,
        id: i32,
        changes: &VehicleModelUpdate,
    ) -> Result<Option<VehicleModel>, RepositoryError>;

    /// List parts. A `brand_id` filter naming an unknown brand yields no rows.
    async fn list_parts(&self, filter: &PartFilter) -> Result<Vec<Part>, RepositoryError>;

    async fn find_part(&self, id: i32) -> Result<Option<Part>, RepositoryError>;

    async fn create_part(&self, part: &NewPart) -> Result<Part, RepositoryError>;

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, RepositoryError>;

    async fn find_supplier(&self, id: i32) -> Result<Option<Supplier>, RepositoryError>;

    async fn create_supplier(&self, supplier: &NewSupplier) -> Result<Supplier, RepositoryError>;

    /// Case-insensitive substring search across the four catalogue tables.
    ///
    /// Any failing sub-query fails the whole search; partial buckets are
    /// never returned.
    async fn search(&self, term: &SearchTerm) -> Result<SearchResults, RepositoryError>;
}
