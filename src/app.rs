//! app.rs
use crate::handlers::{email_task_handler, form_handler, health_handler};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_handler::health_endpoint))
            .service(
                web::scope("/payslip-emails")
                    .route("/form", web::get().to(form_handler::get_form_endpoint))
                    .route("/form", web::put().to(form_handler::update_form_endpoint))
                    .route(
                        "/form/options",
                        web::post().to(form_handler::reload_options_endpoint),
                    )
                    .route(
                        "/form/units",
                        web::put().to(form_handler::select_units_endpoint),
                    )
                    .route(
                        "/form/departments",
                        web::put().to(form_handler::select_departments_endpoint),
                    )
                    .route(
                        "/form/employees",
                        web::put().to(form_handler::select_employees_endpoint),
                    )
                    .route("/send", web::post().to(email_task_handler::send_endpoint))
                    .route(
                        "/feedback",
                        web::get().to(email_task_handler::feedback_endpoint),
                    )
                    .route(
                        "/feedback/dismiss",
                        web::post().to(email_task_handler::dismiss_feedback_endpoint),
                    )
                    .route(
                        "/tasks",
                        web::get().to(email_task_handler::list_tasks_endpoint),
                    )
                    .route(
                        "/tasks/refresh",
                        web::post().to(email_task_handler::refresh_tasks_endpoint),
                    )
                    .route(
                        "/selection",
                        web::put().to(email_task_handler::select_task_endpoint),
                    )
                    .route(
                        "/selection",
                        web::get().to(email_task_handler::get_selection_endpoint),
                    )
                    .route(
                        "/selection/logs",
                        web::get().to(email_task_handler::task_logs_endpoint),
                    ),
            ),
    );
}
