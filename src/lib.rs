mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{cors, db, diagnostics};

use repositories::sqlx_repo::SqlxGalleryImageRepo;
use use_cases::gallery::GalleryHandler;

pub struct AppState {
    pub gallery_handler: AppGalleryHandler,
}

pub type AppGalleryHandler = GalleryHandler<SqlxGalleryImageRepo>;

impl AppState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let gallery_repo = SqlxGalleryImageRepo::new(pool);

        AppState {
            gallery_handler: GalleryHandler::new(gallery_repo),
        }
    }
}
