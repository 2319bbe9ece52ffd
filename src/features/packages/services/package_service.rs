use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::packages::dtos::{
    MapMarkerDto, PackageFilter, PackageResponseDto, PackageStatsDto, PackageTotals,
};
use crate::features::packages::models::{NewPackage, Package, PackageStatus, ProcurementType};
use crate::shared::constants::ALL_OPD_OPTION;

const SELECT_PACKAGES: &str = r#"
    SELECT id, name, procurement_type, location, latitude, longitude, budget, hps,
           realization, status, provider_name, provider_address, opd_name, image_url,
           created_at, updated_at
    FROM packages
"#;

/// Service for procurement packages
pub struct PackageService {
    pool: PgPool,
}

impl PackageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List packages matching `filter`, newest first
    pub async fn list(
        &self,
        filter: &PackageFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<PackageResponseDto>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM packages");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count packages: {:?}", e);
                AppError::Database(e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new(SELECT_PACKAGES);
        push_filters(&mut query, filter);
        query
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let packages = query
            .build_query_as::<Package>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list packages: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((packages.into_iter().map(Into::into).collect(), total))
    }

    /// Get a package by id
    pub async fn get(&self, id: i64) -> Result<PackageResponseDto> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_PACKAGES);
        query.push(" WHERE id = ").push_bind(id);

        let package = query
            .build_query_as::<Package>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch package {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| not_found(id))?;

        Ok(package.into())
    }

    /// Insert a package; the database assigns its id
    pub async fn create(&self, package: &NewPackage) -> Result<PackageResponseDto> {
        let created = sqlx::query_as::<_, Package>(
            r#"
            INSERT INTO packages (
                name, procurement_type, location, latitude, longitude, budget, hps,
                realization, status, provider_name, provider_address, opd_name, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, name, procurement_type, location, latitude, longitude, budget, hps,
                      realization, status, provider_name, provider_address, opd_name, image_url,
                      created_at, updated_at
            "#,
        )
        .bind(&package.name)
        .bind(package.procurement_type)
        .bind(&package.location)
        .bind(package.coordinates.lat)
        .bind(package.coordinates.lon)
        .bind(package.budget)
        .bind(package.hps)
        .bind(package.realization)
        .bind(package.status)
        .bind(&package.provider_name)
        .bind(&package.provider_address)
        .bind(&package.opd_name)
        .bind(&package.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create package '{}': {:?}", package.name, e);
            AppError::Database(e)
        })?;

        tracing::info!("Created package {} '{}'", created.id, created.name);
        Ok(created.into())
    }

    /// Replace every field of an existing package
    pub async fn update(&self, id: i64, package: &NewPackage) -> Result<PackageResponseDto> {
        let updated = sqlx::query_as::<_, Package>(
            r#"
            UPDATE packages
            SET name = $2, procurement_type = $3, location = $4, latitude = $5,
                longitude = $6, budget = $7, hps = $8, realization = $9, status = $10,
                provider_name = $11, provider_address = $12, opd_name = $13,
                image_url = $14, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, procurement_type, location, latitude, longitude, budget, hps,
                      realization, status, provider_name, provider_address, opd_name, image_url,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&package.name)
        .bind(package.procurement_type)
        .bind(&package.location)
        .bind(package.coordinates.lat)
        .bind(package.coordinates.lon)
        .bind(package.budget)
        .bind(package.hps)
        .bind(package.realization)
        .bind(package.status)
        .bind(&package.provider_name)
        .bind(&package.provider_address)
        .bind(&package.opd_name)
        .bind(&package.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update package {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| not_found(id))?;

        tracing::info!("Updated package {}", id);
        Ok(updated.into())
    }

    /// Delete a package and its progress reports
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete package {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Deleted package {}", id);
        Ok(())
    }

    /// Summary and breakdowns for the packages matching `filter`
    pub async fn stats(&self, filter: &PackageFilter) -> Result<PackageStatsDto> {
        let mut totals_query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COUNT(*)::BIGINT AS total,
                   COALESCE(SUM(budget), 0)::BIGINT AS budget,
                   COALESCE(SUM(hps), 0)::BIGINT AS hps,
                   COALESCE(SUM(realization), 0)::BIGINT AS realization
            FROM packages
            "#,
        );
        push_filters(&mut totals_query, filter);

        let mut status_query =
            QueryBuilder::<Postgres>::new("SELECT status, COUNT(*)::BIGINT FROM packages");
        push_filters(&mut status_query, filter);
        status_query.push(" GROUP BY status");

        let mut type_query = QueryBuilder::<Postgres>::new(
            "SELECT procurement_type, COUNT(*)::BIGINT FROM packages",
        );
        push_filters(&mut type_query, filter);
        type_query.push(" GROUP BY procurement_type");

        let (totals, total_all, status_counts, type_counts) = tokio::try_join!(
            totals_query
                .build_query_as::<PackageTotals>()
                .fetch_one(&self.pool),
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM packages").fetch_one(&self.pool),
            status_query
                .build_query_as::<(PackageStatus, i64)>()
                .fetch_all(&self.pool),
            type_query
                .build_query_as::<(ProcurementType, i64)>()
                .fetch_all(&self.pool),
        )
        .map_err(|e| {
            tracing::error!("Failed to aggregate package stats: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(PackageStatsDto::build(
            totals,
            total_all,
            &status_counts,
            &type_counts,
        ))
    }

    /// Map markers for the packages matching `filter`.
    ///
    /// Packages whose stored point is unusable are left off the map.
    pub async fn map_markers(&self, filter: &PackageFilter) -> Result<Vec<MapMarkerDto>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_PACKAGES);
        push_filters(&mut query, filter);
        query.push(" ORDER BY id DESC");

        let packages = query
            .build_query_as::<Package>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch map packages: {:?}", e);
                AppError::Database(e)
            })?;

        let total = packages.len();
        let markers: Vec<MapMarkerDto> = packages
            .into_iter()
            .filter_map(MapMarkerDto::from_package)
            .collect();
        if markers.len() < total {
            tracing::warn!(
                "Skipped {} packages with invalid coordinates on the map",
                total - markers.len()
            );
        }

        Ok(markers)
    }

    /// Packages with the largest budgets, for the dashboard slider
    pub async fn featured(&self, limit: i64) -> Result<Vec<PackageResponseDto>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_PACKAGES);
        query
            .push(" ORDER BY budget DESC, id DESC LIMIT ")
            .push_bind(limit);

        let packages = query
            .build_query_as::<Package>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch featured packages: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(packages.into_iter().map(Into::into).collect())
    }

    /// Distinct OPD names, sorted, led by the "all" option
    pub async fn opd_options(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT opd_name FROM packages ORDER BY opd_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list OPD options: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(with_all_option(names))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Paket dengan id {} tidak ditemukan", id))
}

fn with_all_option(names: Vec<String>) -> Vec<String> {
    std::iter::once(ALL_OPD_OPTION.to_string())
        .chain(names.into_iter().filter(|n| n != ALL_OPD_OPTION))
        .collect()
}

/// Append the WHERE clause for `filter`
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &PackageFilter) {
    query.push(" WHERE TRUE");

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        query
            .push(" AND (LOWER(name) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR LOWER(location) LIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(opd) = &filter.opd {
        query.push(" AND opd_name = ").push_bind(opd.clone());
    }
    if let Some(procurement_type) = filter.procurement_type {
        query
            .push(" AND procurement_type = ")
            .push_bind(procurement_type);
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
}

/// Escape LIKE wildcards so the search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
