use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::gallery_image::{BulkDeleteRequest, NewGalleryImage, UpdateGalleryImage},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, payload))]
pub async fn create_gallery_image(
    state: web::Data<AppState>,
    payload: web::Json<NewGalleryImage>,
) -> Result<impl Responder, AppError> {
    let image = state.gallery_handler.create_image(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(image))
}

#[instrument(skip(state))]
pub async fn list_cms_gallery_images(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let images = state.gallery_handler.list_images().await?;

    tracing::info!("Retrieved {} gallery images for CMS", images.len());
    Ok(HttpResponse::Ok().json(images))
}

/// Serves both PUT and PATCH; absent keys are left untouched either way.
#[instrument(skip(state, payload))]
pub async fn update_gallery_image(
    state: web::Data<AppState>,
    image_id: web::Path<i32>,
    payload: web::Json<UpdateGalleryImage>,
) -> Result<impl Responder, AppError> {
    let image = state
        .gallery_handler
        .update_image(image_id.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(image))
}

#[instrument(skip(state))]
pub async fn delete_gallery_image(
    state: web::Data<AppState>,
    image_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let response = state.gallery_handler.delete_image(image_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, payload))]
pub async fn bulk_delete_gallery_images(
    state: web::Data<AppState>,
    payload: web::Json<BulkDeleteRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.gallery_handler.delete_images(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
