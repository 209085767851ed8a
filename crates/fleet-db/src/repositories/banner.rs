//! PostgreSQL implementation of BannerRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use fleet_core::{Banner, BannerId, BannerKind, BannerRepository, DomainError, RepoResult};

use crate::models::BannerModel;

use super::error::{banner_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of BannerRepository for one banner table
#[derive(Clone)]
pub struct PgBannerRepository {
    pool: PgPool,
    kind: BannerKind,
}

impl PgBannerRepository {
    /// Create a repository over the table that stores `kind`
    pub fn new(pool: PgPool, kind: BannerKind) -> Self {
        Self { pool, kind }
    }

    fn table(&self) -> &'static str {
        self.kind.table_name()
    }

    async fn fetch_where(&self, filter: &str) -> RepoResult<Vec<Banner>> {
        let sql = format!(
            "SELECT {} FROM {} {filter} ORDER BY created_at DESC",
            BannerModel::COLUMNS,
            self.table()
        );

        let rows = sqlx::query_as::<_, BannerModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|m| m.into_banner(self.kind)).collect())
    }
}

#[async_trait]
impl BannerRepository for PgBannerRepository {
    fn kind(&self) -> BannerKind {
        self.kind
    }

    async fn ping(&self) -> RepoResult<()> {
        self.pool.acquire().await.map(|_| ()).map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: BannerId) -> RepoResult<Option<Banner>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            BannerModel::COLUMNS,
            self.table()
        );

        let result = sqlx::query_as::<_, BannerModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(|m| m.into_banner(self.kind)))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Banner>> {
        self.fetch_where("").await
    }

    #[instrument(skip(self))]
    async fn list_active(&self) -> RepoResult<Vec<Banner>> {
        self.fetch_where("WHERE active = TRUE").await
    }

    #[instrument(skip(self))]
    async fn list_scheduled(&self) -> RepoResult<Vec<Banner>> {
        self.fetch_where("WHERE start_date IS NOT NULL OR end_date IS NOT NULL")
            .await
    }

    #[instrument(skip(self, banner), fields(banner_id = %banner.id))]
    async fn create(&self, banner: &Banner) -> RepoResult<()> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            self.table(),
            BannerModel::COLUMNS
        );

        sqlx::query(&sql)
            .bind(banner.id.into_inner())
            .bind(&banner.title)
            .bind(&banner.image_url)
            .bind(&banner.redirect_url)
            .bind(banner.active)
            .bind(banner.start_date)
            .bind(banner.end_date)
            .bind(banner.manually_deactivated_at)
            .bind(banner.created_at)
            .bind(banner.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(e, || {
                    DomainError::ValidationError(format!("banner {} already exists", banner.id))
                })
            })?;

        Ok(())
    }

    #[instrument(skip(self, banner), fields(banner_id = %banner.id))]
    async fn update(&self, banner: &Banner) -> RepoResult<()> {
        let sql = format!(
            r"
            UPDATE {}
            SET title = $2, image_url = $3, redirect_url = $4, active = $5,
                start_date = $6, end_date = $7, manually_deactivated_at = $8, updated_at = $9
            WHERE id = $1
            ",
            self.table()
        );

        let result = sqlx::query(&sql)
            .bind(banner.id.into_inner())
            .bind(&banner.title)
            .bind(&banner.image_url)
            .bind(&banner.redirect_url)
            .bind(banner.active)
            .bind(banner.start_date)
            .bind(banner.end_date)
            .bind(banner.manually_deactivated_at)
            .bind(banner.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(banner_not_found(self.kind, banner.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_active(&self, id: BannerId, active: bool, at: DateTime<Utc>) -> RepoResult<()> {
        let sql = format!(
            "UPDATE {} SET active = $2, updated_at = $3 WHERE id = $1",
            self.table()
        );

        let result = sqlx::query(&sql)
            .bind(id.into_inner())
            .bind(active)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(banner_not_found(self.kind, id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active_manual(
        &self,
        id: BannerId,
        active: bool,
        manually_deactivated_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let sql = format!(
            r"
            UPDATE {}
            SET active = $2, manually_deactivated_at = $3, updated_at = $4
            WHERE id = $1
            ",
            self.table()
        );

        let result = sqlx::query(&sql)
            .bind(id.into_inner())
            .bind(active)
            .bind(manually_deactivated_at)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(banner_not_found(self.kind, id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: BannerId) -> RepoResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table());

        let result = sqlx::query(&sql)
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(banner_not_found(self.kind, id));
        }

        Ok(())
    }
}
