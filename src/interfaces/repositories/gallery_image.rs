use async_trait::async_trait;

use crate::{
    entities::gallery_image::{GalleryImage, GalleryImageChanges, GalleryImageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxGalleryImageRepo,
};

const RETURNING_COLUMNS: &str = "id, cloudinary_url, caption, created_at, updated_at";

#[async_trait]
pub trait GalleryImageRepository: Send + Sync {
    async fn create_image(&self, image: &GalleryImageInsert) -> Result<GalleryImage, AppError>;
    async fn list_images(&self) -> Result<Vec<GalleryImage>, AppError>;
    async fn get_image_by_id(&self, id: i32) -> Result<GalleryImage, AppError>;
    async fn update_image(&self, id: i32, changes: &GalleryImageChanges) -> Result<GalleryImage, AppError>;
    async fn delete_image(&self, id: i32) -> Result<(), AppError>;
    async fn delete_images(&self, ids: &[i32]) -> Result<Vec<i32>, AppError>;
    async fn count_images(&self) -> Result<i64, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxGalleryImageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxGalleryImageRepo { pool }
    }
}

#[async_trait]
impl GalleryImageRepository for SqlxGalleryImageRepo {
    async fn create_image(&self, image: &GalleryImageInsert) -> Result<GalleryImage, AppError> {
        let created = sqlx::query_as::<_, GalleryImage>(&format!(
            "INSERT INTO gallery_images (cloudinary_url, caption) VALUES ($1, $2) RETURNING {RETURNING_COLUMNS}"
        ))
        .bind(&image.cloudinary_url)
        .bind(&image.caption)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_images(&self) -> Result<Vec<GalleryImage>, AppError> {
        let images = sqlx::query_as::<_, GalleryImage>(&format!(
            "SELECT {RETURNING_COLUMNS} FROM gallery_images ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn get_image_by_id(&self, id: i32) -> Result<GalleryImage, AppError> {
        let image = sqlx::query_as::<_, GalleryImage>(&format!(
            "SELECT {RETURNING_COLUMNS} FROM gallery_images WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    /// `updated_at` is set in the statement itself so even an update with
    /// no changed columns refreshes it.
    async fn update_image(&self, id: i32, changes: &GalleryImageChanges) -> Result<GalleryImage, AppError> {
        let image = sqlx::query_as::<_, GalleryImage>(&format!(
            r#"
            UPDATE gallery_images
            SET cloudinary_url = COALESCE($1, cloudinary_url),
                caption = CASE WHEN $2 THEN $3 ELSE caption END,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(changes.cloudinary_url.as_deref())
        .bind(!changes.caption.is_unchanged())
        .bind(changes.caption.value_str())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    async fn delete_image(&self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| {
                if result.rows_affected() == 0 {
                    Err(AppError::NotFound("Gallery image not found".into()))
                } else {
                    Ok(())
                }
            })?
    }

    async fn delete_images(&self, ids: &[i32]) -> Result<Vec<i32>, AppError> {
        let mut deleted: Vec<i32> = sqlx::query_scalar("DELETE FROM gallery_images WHERE id = ANY($1) RETURNING id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        deleted.sort_unstable();
        Ok(deleted)
    }

    async fn count_images(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gallery_images")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
