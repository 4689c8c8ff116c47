use actix_web::web;

use crate::{
    constants::{CMS_SCOPE, GALLERY_IMAGES_PATH},
    handlers::cms,
};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(CMS_SCOPE)
            .service(
                web::scope(GALLERY_IMAGES_PATH)
                    .service(
                        web::resource("")
                            .route(web::get().to(cms::list_cms_gallery_images))
                            .route(web::post().to(cms::create_gallery_image))
                    )
                    // Must precede "/{image_id}".
                    .service(
                        web::resource("/bulk")
                            .route(web::delete().to(cms::bulk_delete_gallery_images))
                    )
                    .service(
                        web::resource("/{image_id}")
                            .route(web::put().to(cms::update_gallery_image))
                            .route(web::patch().to(cms::update_gallery_image))
                            .route(web::delete().to(cms::delete_gallery_image))
                    )
            )
    );
}
