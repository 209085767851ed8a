//! Database models - SQLx-compatible structs for PostgreSQL tables

mod banner;

pub use banner::BannerModel;
