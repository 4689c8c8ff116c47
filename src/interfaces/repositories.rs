pub mod gallery_image;
pub mod sqlx_repo;
