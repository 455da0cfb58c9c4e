//! PostgreSQL-backed `CatalogueRepository` implementation using Diesel ORM.
//!
//! Each port call checks out one connection and runs one statement, except
//! `list_parts` with a brand filter (brand name lookup, then the part query)
//! and `search`, which fans out four independent queries on their own
//! connections.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use futures_util::future::try_join4;

use crate::domain::ports::{CatalogueRepository, RepositoryError};
use crate::domain::{
    Brand, ModelFilter, NewBrand, NewPart, NewSupplier, NewVehicleModel, Part, PartFilter,
    SearchResults, SearchTerm, Supplier, VehicleModel, VehicleModelUpdate,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    BrandRow, NewBrandRow, NewPartRow, NewSupplierRow, NewVehicleModelRow, PartRow, SupplierRow,
    VehicleModelChangeset, VehicleModelRow,
};
use super::pool::DbPool;
use super::schema::{brands, parts, suppliers, vehicle_models};

/// Diesel-backed implementation of the catalogue port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_domain<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

async fn search_brands(pool: &DbPool, pattern: &str) -> Result<Vec<Brand>, RepositoryError> {
    let mut conn = pool.get().await.map_err(map_pool_error)?;
    let rows: Vec<BrandRow> = brands::table
        .filter(
            brands::name
                .ilike(pattern)
                .or(brands::description.ilike(pattern)),
        )
        .order(brands::id.asc())
        .select(BrandRow::as_select())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(into_domain(rows))
}

async fn search_models(
    pool: &DbPool,
    pattern: &str,
) -> Result<Vec<VehicleModel>, RepositoryError> {
    let mut conn = pool.get().await.map_err(map_pool_error)?;
    let rows: Vec<VehicleModelRow> = vehicle_models::table
        .filter(
            vehicle_models::name
                .ilike(pattern)
                .or(vehicle_models::vehicle_type.ilike(pattern)),
        )
        .order(vehicle_models::id.asc())
        .select(VehicleModelRow::as_select())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(into_domain(rows))
}

async fn search_parts(pool: &DbPool, pattern: &str) -> Result<Vec<Part>, RepositoryError> {
    let mut conn = pool.get().await.map_err(map_pool_error)?;
    let rows: Vec<PartRow> = parts::table
        .filter(
            parts::name
                .ilike(pattern)
                .or(parts::part_number.ilike(pattern))
                .or(parts::description.ilike(pattern)),
        )
        .order(parts::id.asc())
        .select(PartRow::as_select())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(into_domain(rows))
}

async fn search_suppliers(pool: &DbPool, pattern: &str) -> Result<Vec<Supplier>, RepositoryError> {
    let mut conn = pool.get().await.map_err(map_pool_error)?;
    let rows: Vec<SupplierRow> = suppliers::table
        .filter(suppliers::name.ilike(pattern))
        .order(suppliers::id.asc())
        .select(SupplierRow::as_select())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(into_domain(rows))
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_brands(&self) -> Result<Vec<Brand>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BrandRow> = brands::table
            .order(brands::id.asc())
            .select(BrandRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_domain(rows))
    }

    async fn find_brand(&self, id: i32) -> Result<Option<Brand>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        brands::table
            .find(id)
            .select(BrandRow::as_select())
            .first::<BrandRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Brand::from))
            .map_err(map_diesel_error)
    }

    async fn create_brand(&self, brand: &NewBrand) -> Result<Brand, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(brands::table)
            .values(NewBrandRow::from(brand))
            .returning(BrandRow::as_returning())
            .get_result::<BrandRow>(&mut conn)
            .await
            .map(Brand::from)
            .map_err(map_diesel_error)
    }

    async fn list_models(
        &self,
        filter: &ModelFilter,
    ) -> Result<Vec<VehicleModel>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = vehicle_models::table
            .select(VehicleModelRow::as_select())
            .into_boxed();
        if let Some(brand_id) = filter.brand_id {
            query = query.filter(vehicle_models::brand_id.eq(brand_id));
        }
        if let Some(vehicle_type) = filter.vehicle_type.as_deref() {
            query = query.filter(vehicle_models::vehicle_type.eq(vehicle_type));
        }
        let rows: Vec<VehicleModelRow> = query
            .order(vehicle_models::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_domain(rows))
    }

    async fn find_model(&self, id: i32) -> Result<Option<VehicleModel>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        vehicle_models::table
            .find(id)
            .select(VehicleModelRow::as_select())
            .first::<VehicleModelRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(VehicleModel::from))
            .map_err(map_diesel_error)
    }

    async fn create_model(&self, model: &NewVehicleModel) -> Result<VehicleModel, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(vehicle_models::table)
            .values(NewVehicleModelRow::from(model))
            .returning(VehicleModelRow::as_returning())
            .get_result::<VehicleModelRow>(&mut conn)
            .await
            .map(VehicleModel::from)
            .map_err(map_diesel_error)
    }

    async fn update_model(
        &self,
        id: i32,
        changes: &VehicleModelUpdate,
    ) -> Result<Option<VehicleModel>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(vehicle_models::table.find(id))
            .set(VehicleModelChangeset::from(changes))
            .returning(VehicleModelRow::as_returning())
            .get_result::<VehicleModelRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(VehicleModel::from))
            .map_err(map_diesel_error)
    }

    async fn list_parts(&self, filter: &PartFilter) -> Result<Vec<Part>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let brand_name = match filter.brand_id {
            Some(brand_id) => {
                let name = brands::table
                    .find(brand_id)
                    .select(brands::name)
                    .first::<String>(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                match name {
                    Some(name) => Some(name),
                    None => return Ok(Vec::new()),
                }
            }
            None => None,
        };

        let mut query = parts::table.select(PartRow::as_select()).into_boxed();
        if let Some(category) = filter.category.as_deref() {
            query = query.filter(parts::category.eq(category));
        }
        if let Some(name) = brand_name {
            query = query.filter(parts::compatible_brands.contains(vec![name]));
        }
        let rows: Vec<PartRow> = query
            .order(parts::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_domain(rows))
    }

    async fn find_part(&self, id: i32) -> Result<Option<Part>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        parts::table
            .find(id)
            .select(PartRow::as_select())
            .first::<PartRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Part::from))
            .map_err(map_diesel_error)
    }

    async fn create_part(&self, part: &NewPart) -> Result<Part, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(parts::table)
            .values(NewPartRow::from(part))
            .returning(PartRow::as_returning())
            .get_result::<PartRow>(&mut conn)
            .await
            .map(Part::from)
            .map_err(map_diesel_error)
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SupplierRow> = suppliers::table
            .order(suppliers::id.asc())
            .select(SupplierRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_domain(rows))
    }

    async fn find_supplier(&self, id: i32) -> Result<Option<Supplier>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        suppliers::table
            .find(id)
            .select(SupplierRow::as_select())
            .first::<SupplierRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Supplier::from))
            .map_err(map_diesel_error)
    }

    async fn create_supplier(&self, supplier: &NewSupplier) -> Result<Supplier, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(suppliers::table)
            .values(NewSupplierRow::from(supplier))
            .returning(SupplierRow::as_returning())
            .get_result::<SupplierRow>(&mut conn)
            .await
            .map(Supplier::from)
            .map_err(map_diesel_error)
    }

    async fn search(&self, term: &SearchTerm) -> Result<SearchResults, RepositoryError> {
        let pattern = term.like_pattern();
        let (brands, models, parts, suppliers) = try_join4(
            search_brands(&self.pool, &pattern),
            search_models(&self.pool, &pattern),
            search_parts(&self.pool, &pattern),
            search_suppliers(&self.pool, &pattern),
        )
        .await?;
        Ok(SearchResults {
            brands,
            models,
            parts,
            suppliers,
        })
    }
}
