use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_gallery_images(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let images = state.gallery_handler.list_images().await?;

    tracing::info!("Retrieved {} gallery images", images.len());
    Ok(HttpResponse::Ok().json(images))
}

#[instrument(skip(state))]
pub async fn get_gallery_image(
    state: web::Data<AppState>,
    image_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let image = state.gallery_handler.get_image(image_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(image))
}
