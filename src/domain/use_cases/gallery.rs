use tracing::info;
use validator::Validate;

use crate::{
    entities::gallery_image::{
        BulkDeleteRequest, BulkDeleteResponse, DeleteImageResponse, GalleryImage, GalleryImageChanges,
        GalleryImageInsert, NewGalleryImage, UpdateGalleryImage,
    },
    errors::AppError,
    repositories::gallery_image::GalleryImageRepository,
};

pub struct GalleryHandler<R>
where
    R: GalleryImageRepository,
{
    pub gallery_repo: R,
}

impl<R> GalleryHandler<R>
where
    R: GalleryImageRepository,
{
    pub fn new(gallery_repo: R) -> Self {
        GalleryHandler { gallery_repo }
    }

    /// Normalizes the request, checks the normalized values, then inserts them.
    pub async fn create_image(&self, request: NewGalleryImage) -> Result<GalleryImage, AppError> {
        let insert: GalleryImageInsert = request.try_into()?;
        insert.validate()?;

        let image = self.gallery_repo.create_image(&insert).await?;

        info!(image_id = image.id, "Gallery image created");
        Ok(image)
    }

    /// Newest first.
    pub async fn list_images(&self) -> Result<Vec<GalleryImage>, AppError> {
        self.gallery_repo.list_images().await
    }

    pub async fn get_image(&self, id: i32) -> Result<GalleryImage, AppError> {
        self.gallery_repo
            .get_image_by_id(id)
            .await
            .map_err(|e| not_found_as(e, id))
    }

    /// Applies a partial update. An empty patch still refreshes `updated_at`.
    pub async fn update_image(&self, id: i32, request: UpdateGalleryImage) -> Result<GalleryImage, AppError> {
        let changes: GalleryImageChanges = request.try_into()?;
        changes.validate()?;

        let image = self
            .gallery_repo
            .update_image(id, &changes)
            .await
            .map_err(|e| not_found_as(e, id))?;

        info!(image_id = image.id, "Gallery image updated");
        Ok(image)
    }

    pub async fn delete_image(&self, id: i32) -> Result<DeleteImageResponse, AppError> {
        self.gallery_repo
            .delete_image(id)
            .await
            .map_err(|e| not_found_as(e, id))?;

        info!(image_id = id, "Gallery image deleted");
        Ok(DeleteImageResponse {
            message: "Image deleted successfully".to_string(),
            image_id: id,
        })
    }

    /// Deletes every listed image that exists. Fails only when none do.
    pub async fn delete_images(&self, request: BulkDeleteRequest) -> Result<BulkDeleteResponse, AppError> {
        request.validate()?;

        let mut ids = request.image_ids;
        ids.sort_unstable();
        ids.dedup();

        let deleted_ids = self.gallery_repo.delete_images(&ids).await?;
        if deleted_ids.is_empty() {
            return Err(AppError::NotFound("No gallery images found for the given ids".to_string()));
        }

        info!(deleted = deleted_ids.len(), requested = ids.len(), "Gallery images deleted");
        Ok(BulkDeleteResponse {
            message: format!("Deleted {} image(s)", deleted_ids.len()),
            deleted_ids,
        })
    }

    pub async fn count_images(&self) -> Result<i64, AppError> {
        self.gallery_repo.count_images().await
    }

    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.gallery_repo.check_connection().await
    }
}

fn not_found_as(err: AppError, id: i32) -> AppError {
    match err {
        AppError::NotFound(_) => AppError::NotFound(format!("Gallery image {id} not found")),
        other => other,
    }
}
