use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use crate::{entities::option_fields::OptionField, errors::AppError};

/// A stored image reference. `created_at` is fixed at insertion and
/// `updated_at` is refreshed by the store on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GalleryImage {
    pub id: i32,
    pub cloudinary_url: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewGalleryImage {
    pub cloudinary_url: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGalleryImage {
    #[serde(default)]
    pub cloudinary_url: OptionField<String>,

    #[serde(default)]
    pub caption: OptionField<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, message = "image_ids must not be empty"))]
    pub image_ids: Vec<i32>,
}

/// Normalized row values ready for insertion. Length limits apply to the
/// trimmed values, so validate after conversion.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct GalleryImageInsert {
    #[validate(length(max = 2048, message = "cloudinary_url must be at most 2048 characters"))]
    pub cloudinary_url: String,

    #[validate(length(max = 2000, message = "caption must be at most 2000 characters"))]
    pub caption: Option<String>,
}

/// Normalized partial update. `None` / `Unchanged` leave the column as is.
#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct GalleryImageChanges {
    #[validate(length(max = 2048, message = "cloudinary_url must be at most 2048 characters"))]
    pub cloudinary_url: Option<String>,

    #[validate(length(max = 2000, message = "caption must be at most 2000 characters"))]
    pub caption: OptionField<String>,
}

impl GalleryImageChanges {
    pub fn is_empty(&self) -> bool {
        self.cloudinary_url.is_none() && self.caption.is_unchanged()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteImageResponse {
    pub message: String,
    pub image_id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub message: String,
    pub deleted_ids: Vec<i32>,
}

impl TryFrom<NewGalleryImage> for GalleryImageInsert {
    type Error = AppError;

    fn try_from(value: NewGalleryImage) -> Result<Self, Self::Error> {
        Ok(GalleryImageInsert {
            cloudinary_url: normalize_media_url(value.cloudinary_url.as_deref())?,
            caption: normalize_caption(value.caption),
        })
    }
}

impl TryFrom<UpdateGalleryImage> for GalleryImageChanges {
    type Error = AppError;

    fn try_from(value: UpdateGalleryImage) -> Result<Self, Self::Error> {
        let cloudinary_url = match value.cloudinary_url {
            OptionField::Unchanged => None,
            OptionField::SetToNull => {
                return Err(AppError::constraint("cloudinary_url", "cloudinary_url cannot be null"));
            }
            OptionField::SetToValue(url) => Some(normalize_media_url(Some(&url))?),
        };

        let caption = match value.caption {
            OptionField::SetToValue(caption) => normalize_caption(Some(caption)).into(),
            other => other,
        };

        Ok(GalleryImageChanges { cloudinary_url, caption })
    }
}

/// Trims the URL and requires an absolute `http(s)` URL with a host.
pub fn normalize_media_url(raw: Option<&str>) -> Result<String, AppError> {
    let Some(raw) = raw else {
        return Err(AppError::constraint("cloudinary_url", "cloudinary_url is required"));
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::constraint("cloudinary_url", "cloudinary_url must not be blank"));
    }

    let valid = Url::parse(trimmed)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false);

    if !valid {
        return Err(AppError::constraint("cloudinary_url", "cloudinary_url must be an http(s) URL"));
    }

    Ok(trimmed.to_string())
}

/// Blank captions are stored as null.
pub fn normalize_caption(caption: Option<String>) -> Option<String> {
    caption
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
