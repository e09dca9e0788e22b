use std::{sync::Arc, time::Duration};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;

use crate::config::console_config::ConsoleConfig;
use crate::logger::init_logger;
use crate::services::feedback_service::FeedbackService;
use crate::services::payroll_api_service::{HttpPayrollApi, PayrollApi};
use crate::services::submission_service::FormService;
use crate::services::task_detail_service::TaskDetailService;
use crate::services::task_history_service::TaskHistoryService;
use crate::store::task_store::TaskStore;

mod app;
mod config;
mod error;
mod handlers;
mod logger;
mod models;
mod services;
mod store;

#[cfg(test)]
mod tests;

/// Refresca el historial cada `every`, con la paginación actual.
fn spawn_history_poller(history_service: TaskHistoryService, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let view = history_service.refresh().await;
            if let Some(error) = view.error {
                log::warn!("(history_poller) Error refrescando historial: {}", error);
            }
        }
    });
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = ConsoleConfig::from_env().context("Configuración inválida")?;
    log::info!("Backend de nóminas en {}", config.api_base_url);

    let api: Arc<dyn PayrollApi> = Arc::new(HttpPayrollApi::new(&config)?);
    let store = TaskStore::new(api.clone(), config.default_page_size);

    let form_service = FormService::new(api.clone(), store.clone(), &config.default_subject_template);
    let history_service = TaskHistoryService::new(store.clone());
    let detail_service = TaskDetailService::new(store.clone());
    let feedback_service = FeedbackService::new(store.clone());

    if config.history_poll_secs > 0 {
        log::info!(
            "Sondeo del historial cada {}s",
            config.history_poll_secs
        );
        spawn_history_poller(
            history_service.clone(),
            Duration::from_secs(config.history_poll_secs),
        );
    }

    let bind = (config.bind_addr.clone(), config.port);
    let workers = config.workers.max(1);
    let config_data = web::Data::new(config);

    // Levantar servidor
    log::info!("Levantando consola en {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .app_data(web::Data::new(form_service.clone()))
            .app_data(web::Data::new(history_service.clone()))
            .app_data(web::Data::new(detail_service.clone()))
            .app_data(web::Data::new(feedback_service.clone()))
            .configure(app::init_app)
    })
    .workers(workers)
    .bind(bind)
    .context("No se pudo abrir el puerto de la consola")?
    .run()
    .await
    .context("El servidor terminó con error")?;

    Ok(())
}
