pub mod cms;
pub mod gallery_images;
pub mod json_error;
pub mod system;
