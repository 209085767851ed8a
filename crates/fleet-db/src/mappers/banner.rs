//! Banner model -> entity mapper

use fleet_core::{Banner, BannerId, BannerKind};

use crate::models::BannerModel;

impl BannerModel {
    /// Convert a row into a Banner of the given kind
    pub fn into_banner(self, kind: BannerKind) -> Banner {
        Banner {
            id: BannerId::from_uuid(self.id),
            kind,
            title: self.title,
            image_url: self.image_url,
            redirect_url: self.redirect_url,
            active: self.active,
            start_date: self.start_date,
            end_date: self.end_date,
            manually_deactivated_at: self.manually_deactivated_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
