//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Dates arrive as strings and are parsed by the date validator in the
//! service, so a malformed date is reported with the bound it belongs to.

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

/// Create banner request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBannerRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 2048, message = "image_url must be 1-2048 characters"),
        custom(function = "validate_link")
    )]
    pub image_url: String,

    #[validate(
        length(max = 2048, message = "redirect_url must be at most 2048 characters"),
        custom(function = "validate_link")
    )]
    pub redirect_url: Option<String>,

    /// Defaults to true; creating an inactive banner counts as a manual deactivation
    #[serde(default = "default_active")]
    pub active: bool,

    pub start_date: Option<String>,

    pub end_date: Option<String>,
}

/// Partial banner update
///
/// `start_date` / `end_date` distinguish an absent field (keep) from an
/// explicit `null` (clear) and a value (set).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBannerRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 2048, message = "image_url must be 1-2048 characters"),
        custom(function = "validate_link")
    )]
    pub image_url: Option<String>,

    #[validate(
        length(max = 2048, message = "redirect_url must be at most 2048 characters"),
        custom(function = "validate_link")
    )]
    pub redirect_url: Option<String>,

    pub active: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<String>>,
}

/// Manual activation toggle
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct SetActiveRequest {
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Map a present field to `Some`, keeping `null` as `Some(None)`
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accept absolute http(s) URLs and site-relative paths such as `/uploads/a.png`
fn validate_link(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let ok = value.is_empty()
        || value.starts_with("https://")
        || value.starts_with("http://")
        || (value.starts_with('/') && !value.starts_with("//"));

    if ok && !value.contains(char::is_whitespace) {
        Ok(())
    } else {
        let mut err = ValidationError::new("link");
        err.message = Some("must be an http(s) URL or a path starting with '/'".into());
        Err(err)
    }
}
