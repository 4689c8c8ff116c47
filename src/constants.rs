use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const PUBLIC_API_PREFIX: &str = "/api";
pub const CMS_SCOPE: &str = "/cms";
pub const GALLERY_IMAGES_PATH: &str = "/gallery-images";
