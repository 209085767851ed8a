//! Value objects - immutable types that represent domain concepts

mod banner_id;

pub use banner_id::{BannerId, BannerIdParseError};
