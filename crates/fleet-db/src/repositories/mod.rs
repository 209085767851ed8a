//! Repository implementations
//!
//! [`PgBannerRepository`] backs the port with PostgreSQL;
//! [`MemoryBannerRepository`] keeps banners in process memory.

mod banner;
mod error;
mod memory;

pub use banner::PgBannerRepository;
pub use memory::MemoryBannerRepository;
