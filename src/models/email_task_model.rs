//! models/email_task_model.rs
//! Tipos de la API de envío: petición, respuesta, tareas y logs.

use serde::{Deserialize, Serialize};

/// Filtros de alcance del envío. Listas vacías = "todos".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unit_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub department_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employee_ids: Vec<i64>,
    #[serde(default)]
    pub employee_specific_data_required: bool,
}

/// Body de POST send-payslip-emails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendRequest {
    pub pay_period: String, // "YYYY-MM"
    pub email_config_id: i64,
    pub subject_template: String,
    pub filters: SendFilters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendResponse {
    pub message: String,
    #[serde(default)]
    pub task_uuid: Option<String>,
    #[serde(default)]
    pub total_employees_matched: i64,
}

/// Eco de los filtros tal como los guardó el backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedFilters {
    #[serde(default)]
    pub pay_period: Option<String>,
    #[serde(default)]
    pub unit_ids: Vec<i64>,
    #[serde(default)]
    pub department_ids: Vec<i64>,
    #[serde(default)]
    pub employee_ids: Vec<i64>,
    #[serde(default)]
    pub employee_specific_data_required: Option<bool>,
}

/// Elemento del historial de tareas.
///
/// `status` se trata como texto opaco (queued, processing, completed,
/// failed, partially_completed...); sólo se usa para elegir color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub task_uuid: String,
    pub status: String,
    #[serde(default)]
    pub pay_period: Option<String>,
    #[serde(default)]
    pub subject_template: Option<String>,
    #[serde(default)]
    pub email_config_id: Option<i64>,
    #[serde(default)]
    pub total_employees_matched: i64,
    #[serde(default)]
    pub total_emails_sent_successfully: i64,
    #[serde(default)]
    pub total_emails_failed: i64,
    #[serde(default)]
    pub total_emails_skipped: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub filters_applied: Option<AppliedFilters>,
    #[serde(default)]
    pub last_error_message: Option<String>,
}

/// Detalle de una tarea: el resumen más el email de quien la pidió.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub summary: TaskSummary,
    #[serde(default)]
    pub requested_by_user_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskHistoryPage {
    #[serde(default)]
    pub tasks: Vec<TaskSummary>,
    #[serde(default)]
    pub total_count: u64,
}

/// Un intento de envío (tarea, destinatario).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailLog {
    pub id: i64,
    #[serde(default)]
    pub recipient_emails: Vec<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub subject: String,
    pub status: String, // sent, failed, skipped_no_email, skipped_no_salary_data
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskLogsPage {
    #[serde(default)]
    pub logs: Vec<EmailLog>,
    #[serde(default)]
    pub total_count: u64,
}
