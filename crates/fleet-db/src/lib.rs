//! # fleet-db
//!
//! Database layer implementing the banner repository port.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - [`PgBannerRepository`], one instance per banner table
//! - [`MemoryBannerRepository`], used when no database is configured and in tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fleet_core::BannerKind;
//! use fleet_db::{create_pool, run_migrations, PgBannerRepository};
//!
//! async fn example(config: &fleet_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool).await?;
//!     let site = PgBannerRepository::new(pool.clone(), BannerKind::Site);
//!     let ads = PgBannerRepository::new(pool, BannerKind::Ad);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolSettings};
pub use repositories::{MemoryBannerRepository, PgBannerRepository};
