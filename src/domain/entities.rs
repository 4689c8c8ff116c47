pub mod gallery_image;
pub mod option_fields;
