use actix_web::web;

use crate::{
    constants::PUBLIC_API_PREFIX,
    handlers::{json_error::not_found, system},
};

mod cms;
mod gallery;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(system::home)
        .service(system::health_check)
        .service(system::database_health_check);

    // CMS first: its paths share the public prefix.
    cfg.service(
        web::scope(PUBLIC_API_PREFIX)
            .configure(cms::config_routes)
            .configure(gallery::config_routes)
    );

    cfg.configure(json_error::config_routes);
    cfg.default_service(web::to(not_found));
}
