//! handlers/email_task_handler.rs
//! Envío de recibos y monitoreo de tareas (historial, detalle, logs).

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::pagination_model::PageQuery,
    services::{
        feedback_service::FeedbackService, submission_service::FormService,
        task_detail_service::TaskDetailService, task_history_service::TaskHistoryService,
    },
    store::async_slot::SlotStatus,
};

#[derive(Debug, Deserialize)]
pub struct SelectionBody {
    #[serde(default)]
    pub task_uuid: Option<String>,
}

/// POST /api/payslip-emails/send
pub async fn send_endpoint(
    form_service: web::Data<FormService>,
    feedback_service: web::Data<FeedbackService>,
) -> HttpResponse {
    match form_service.submit().await {
        Ok(status) => {
            let feedback = feedback_service.view().await;
            HttpResponse::Ok().json(json!({
                "success": status == SlotStatus::Succeeded,
                "status": status,
                "feedback": feedback
            }))
        }
        Err(errors) => {
            log::info!("(send_endpoint) Formulario inválido: {}", errors);
            HttpResponse::UnprocessableEntity().json(json!({
                "success": false,
                "errors": errors.errors
            }))
        }
    }
}

/// GET /api/payslip-emails/feedback
pub async fn feedback_endpoint(feedback_service: web::Data<FeedbackService>) -> HttpResponse {
    HttpResponse::Ok().json(feedback_service.view().await)
}

/// POST /api/payslip-emails/feedback/dismiss
pub async fn dismiss_feedback_endpoint(
    feedback_service: web::Data<FeedbackService>,
) -> HttpResponse {
    HttpResponse::Ok().json(feedback_service.dismiss().await)
}

/// GET /api/payslip-emails/tasks?page=&page_size=
pub async fn list_tasks_endpoint(
    history_service: web::Data<TaskHistoryService>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let pagination = query.merge_into(history_service.current_pagination().await);
    HttpResponse::Ok().json(history_service.load(pagination).await)
}

/// POST /api/payslip-emails/tasks/refresh
pub async fn refresh_tasks_endpoint(
    history_service: web::Data<TaskHistoryService>,
) -> HttpResponse {
    HttpResponse::Ok().json(history_service.refresh().await)
}

/// PUT /api/payslip-emails/selection
pub async fn select_task_endpoint(
    detail_service: web::Data<TaskDetailService>,
    body: web::Json<SelectionBody>,
) -> HttpResponse {
    HttpResponse::Ok().json(detail_service.select(body.into_inner().task_uuid).await)
}

/// GET /api/payslip-emails/selection
pub async fn get_selection_endpoint(detail_service: web::Data<TaskDetailService>) -> HttpResponse {
    HttpResponse::Ok().json(detail_service.view().await)
}

/// GET /api/payslip-emails/selection/logs?page=&page_size=
pub async fn task_logs_endpoint(
    detail_service: web::Data<TaskDetailService>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let pagination = query.merge_into(detail_service.current_logs_pagination().await);
    HttpResponse::Ok().json(detail_service.change_logs_page(pagination).await)
}
