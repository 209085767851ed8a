//! Axum extractors for request handling
//!
//! Custom extractors for admin authentication, path parsing, and validation.

mod admin;
mod path;
mod validated;

pub use admin::AdminAuth;
pub use path::{BannerPath, KindPath};
pub use validated::ValidatedJson;
