use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxGalleryImageRepo {
    pub pool: PgPool,
}
