//! Domain entities - core business objects

mod banner;

pub use banner::{Banner, BannerKind, BannerKindParseError, BannerSchedule, Scheduled};
