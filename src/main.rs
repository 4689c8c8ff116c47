use std::sync::Arc;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use gallery_api::{
    constants::START_TIME,
    cors::build_cors,
    db::postgres::{create_pool, init_database},
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    telemetry::init_tracing,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(&AppEnvironment::Development);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.env);
    tracing::info!("Loaded configuration: {:?}", config);
    once_cell::sync::Lazy::force(&START_TIME);

    let (database_url, allow_list) = match (config.database(), config.origin_allow_list()) {
        (Ok(url), Ok(list)) => (url, Arc::new(list)),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    for warning in database_url.warnings() {
        tracing::warn!("Database URL: {}", warning);
    }

    let pool = create_pool(&database_url, config.db_max_connections, config.db_acquire_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to configure database pool: {e}")))?;

    if config.run_migrations {
        init_database(&pool).await;
    }

    let app_state = web::Data::new(AppState::new(pool));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting {} v{} on {} ({} allowed origins)",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        allow_list.len()
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(build_cors(allow_list.clone()))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count.max(1))
    .disable_signals()
    .bind(server_addr)?
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => {
            handle.stop(true).await;
            tracing::info!("Server stopped.");
            Ok(())
        }
    }
}
