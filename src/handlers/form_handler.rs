//! handlers/form_handler.rs
//! Endpoints del formulario de envío y de la selección en cascada.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    models::form_model::{FormPatch, IdsBody},
    services::submission_service::FormService,
};

/// GET /api/payslip-emails/form
pub async fn get_form_endpoint(form_service: web::Data<FormService>) -> HttpResponse {
    HttpResponse::Ok().json(form_service.view().await)
}

/// POST /api/payslip-emails/form/options
pub async fn reload_options_endpoint(form_service: web::Data<FormService>) -> HttpResponse {
    let view = form_service.load_options().await;
    match &view.options_error {
        Some(error) => HttpResponse::BadGateway().json(json!({
            "success": false,
            "error": error,
            "form": view
        })),
        None => HttpResponse::Ok().json(view),
    }
}

/// PUT /api/payslip-emails/form
pub async fn update_form_endpoint(
    form_service: web::Data<FormService>,
    body: web::Json<FormPatch>,
) -> HttpResponse {
    HttpResponse::Ok().json(form_service.update(body.into_inner()).await)
}

/// PUT /api/payslip-emails/form/units
pub async fn select_units_endpoint(
    form_service: web::Data<FormService>,
    body: web::Json<IdsBody>,
) -> HttpResponse {
    HttpResponse::Ok().json(form_service.select_units(body.into_inner().ids).await)
}

/// PUT /api/payslip-emails/form/departments
pub async fn select_departments_endpoint(
    form_service: web::Data<FormService>,
    body: web::Json<IdsBody>,
) -> HttpResponse {
    HttpResponse::Ok().json(form_service.select_departments(body.into_inner().ids).await)
}

/// PUT /api/payslip-emails/form/employees
pub async fn select_employees_endpoint(
    form_service: web::Data<FormService>,
    body: web::Json<IdsBody>,
) -> HttpResponse {
    HttpResponse::Ok().json(form_service.select_employees(body.into_inner().ids).await)
}
