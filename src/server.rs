use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;
use tokio::sync::Semaphore;

use crate::config::AppConfig;
use crate::server_handlers::{generate_handler, health_handler, help_handler, list_subjects_handler};
use crate::service::ScheduleGeneratorService;

/// Estado compartido entre workers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ScheduleGeneratorService>,
    /// Limita cuántas generaciones corren a la vez en el pool bloqueante.
    pub limiter: Arc<Semaphore>,
}

impl AppState {
    pub fn new(service: ScheduleGeneratorService, max_concurrent_generations: usize) -> AppState {
        AppState {
            service: Arc::new(service),
            limiter: Arc::new(Semaphore::new(std::cmp::max(1, max_concurrent_generations))),
        }
    }
}

/// Rutas bajo `/api/v1/schedules`. Separado de `run_server` para montarlo en tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .route("/generate", web::post().to(generate_handler))
            .route("/subjects", web::get().to(list_subjects_handler))
            .route("/subjects/cucei", web::get().to(list_subjects_handler))
            .route("/health", web::get().to(health_handler))
            .route("/help", web::get().to(help_handler)),
    );
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let service = ScheduleGeneratorService::from_config(&config).map_err(std::io::Error::other)?;
    info!(
        "🚀 escuchando en http://{} ({} materias en catálogo, {} generaciones concurrentes)",
        config.server.bind,
        service.catalog().len(),
        config.server.max_concurrent_generations
    );
    let state = AppState::new(service, config.server.max_concurrent_generations);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .bind(config.server.bind.as_str())?
    .run()
    .await
}
