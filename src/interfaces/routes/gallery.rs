use actix_web::web;

use crate::{constants::GALLERY_IMAGES_PATH, handlers::gallery_images};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(GALLERY_IMAGES_PATH)
            .service(
                web::resource("")
                    .route(web::get().to(gallery_images::list_gallery_images))
            )
            .service(
                web::resource("/{image_id}")
                    .route(web::get().to(gallery_images::get_gallery_image))
            )
    );
}
