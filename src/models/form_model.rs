//! models/form_model.rs
//! Cuerpos de request del formulario de envío y sus errores de validación.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::option_model::{DepartmentOption, EmployeeOption, FormOptions};

/// PUT /form: sólo se tocan los campos presentes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormPatch {
    pub pay_period: Option<String>,
    pub email_config_id: Option<i64>,
    pub subject_template: Option<String>,
    pub employee_specific_data_required: Option<bool>,
}

/// PUT /form/units, /form/departments, /form/employees
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdsBody {
    #[serde(default)]
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Errores de validación: nunca llegan al store.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("form has {} invalid field(s)", .errors.len())]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Estado completo del formulario tal como lo ve la UI.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub pay_period: Option<String>,
    pub email_config_id: Option<i64>,
    pub subject_template: String,
    pub employee_specific_data_required: bool,
    pub unit_ids: Vec<i64>,
    pub department_ids: Vec<i64>,
    pub employee_ids: Vec<i64>,
    pub options: FormOptions,
    pub departments: Vec<DepartmentOption>,
    pub employees: Vec<EmployeeOption>,
    pub options_error: Option<String>,
}
