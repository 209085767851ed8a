//! Banner ID - opaque unique identifier backed by a UUID

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque banner identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BannerId(Uuid);

impl BannerId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, BannerIdParseError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| BannerIdParseError::InvalidFormat)
    }
}

/// Error when parsing a BannerId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BannerIdParseError {
    #[error("invalid banner id format")]
    InvalidFormat,
}

impl fmt::Display for BannerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BannerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<BannerId> for Uuid {
    fn from(id: BannerId) -> Self {
        id.0
    }
}

impl std::str::FromStr for BannerId {
    type Err = BannerIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BannerId::parse(s)
    }
}
