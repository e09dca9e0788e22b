//! models/view_model.rs
//! Lo que la consola devuelve a la UI: filas ya coloreadas, fases y banners.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::models::email_task_model::{AppliedFilters, EmailLog, TaskDetail, TaskSummary};
use crate::models::pagination_model::Pagination;
use crate::store::async_slot::SlotStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Success,
    Error,
    Active,
    Warning,
    Default,
}

impl TagColor {
    /// Color de una tarea según su status.
    pub fn for_task_status(status: &str) -> Self {
        match status {
            "completed" => TagColor::Success,
            "failed" => TagColor::Error,
            "processing" => TagColor::Active,
            "queued" | "partially_completed" => TagColor::Warning,
            _ => TagColor::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTag {
    pub color: TagColor,
    pub label: String,
}

impl StatusTag {
    /// Etiqueta de un log de envío. Cualquier `skipped*` es warning, con
    /// sub-etiqueta "sin email" o "sin datos".
    pub fn for_log_status(status: &str) -> Self {
        let (color, label) = match status {
            "sent" | "success" => (TagColor::Success, "发送成功".to_string()),
            "failed" => (TagColor::Error, "发送失败".to_string()),
            s if s.starts_with("skipped") => {
                let label = if s.contains("no_email") {
                    "跳过(无邮箱)"
                } else {
                    "跳过(无数据)"
                };
                (TagColor::Warning, label.to_string())
            }
            other => (TagColor::Default, other.to_string()),
        };
        StatusTag { color, label }
    }
}

/// Formato de fecha para la UI; si no se puede parsear se devuelve tal cual.
pub fn display_timestamp(raw: Option<&str>) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M:%S";

    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return "-".to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUT).to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format(OUT).to_string();
        }
    }
    raw.to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    pub task_uuid: String,
    pub status: String,
    pub status_color: TagColor,
    pub pay_period: Option<String>,
    pub total_employees_matched: i64,
    pub sent: i64,
    pub failed: i64,
    pub skipped: i64,
    pub created_at: String,
    pub completed_at: String,
}

impl From<&TaskSummary> for TaskRow {
    fn from(task: &TaskSummary) -> Self {
        TaskRow {
            task_uuid: task.task_uuid.clone(),
            status: task.status.clone(),
            status_color: TagColor::for_task_status(&task.status),
            pay_period: task
                .pay_period
                .clone()
                .or_else(|| task.filters_applied.as_ref().and_then(|f| f.pay_period.clone())),
            total_employees_matched: task.total_employees_matched,
            sent: task.total_emails_sent_successfully,
            failed: task.total_emails_failed,
            skipped: task.total_emails_skipped,
            created_at: display_timestamp(task.created_at.as_deref()),
            completed_at: display_timestamp(task.completed_at.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskHistoryView {
    pub status: SlotStatus,
    pub error: Option<String>,
    pub rows: Vec<TaskRow>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    pub id: i64,
    pub recipient_emails: String,
    pub recipient_name: String,
    pub subject: String,
    pub status: String,
    pub tag: StatusTag,
    pub sent_at: String,
    pub error_message: Option<String>,
}

impl From<&EmailLog> for LogRow {
    fn from(log: &EmailLog) -> Self {
        LogRow {
            id: log.id,
            recipient_emails: log.recipient_emails.join(", "),
            recipient_name: log.recipient_name.clone().unwrap_or_else(|| "-".to_string()),
            subject: log.subject.clone(),
            status: log.status.clone(),
            tag: StatusTag::for_log_status(&log.status),
            sent_at: display_timestamp(log.sent_at.as_deref()),
            error_message: log.error_message.clone(),
        }
    }
}

/// Fases del visor de detalle (por selección de tarea).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailPhase {
    NoSelection,
    LoadingDetail,
    DetailReady,
    DetailFailed,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDetailFields {
    pub task_uuid: String,
    pub status: String,
    pub status_color: TagColor,
    pub requested_by: String,
    pub total_employees_matched: i64,
    pub sent: i64,
    pub failed: i64,
    pub skipped: i64,
    pub created_at: String,
    pub started_at: String,
    pub completed_at: String,
    pub subject_template: Option<String>,
    pub filters_applied: AppliedFilters,
    pub last_error_message: Option<String>,
}

impl From<&TaskDetail> for TaskDetailFields {
    fn from(detail: &TaskDetail) -> Self {
        let task = &detail.summary;
        TaskDetailFields {
            task_uuid: task.task_uuid.clone(),
            status: task.status.clone(),
            status_color: TagColor::for_task_status(&task.status),
            requested_by: detail
                .requested_by_user_email
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            total_employees_matched: task.total_employees_matched,
            sent: task.total_emails_sent_successfully,
            failed: task.total_emails_failed,
            skipped: task.total_emails_skipped,
            created_at: display_timestamp(task.created_at.as_deref()),
            started_at: display_timestamp(task.started_at.as_deref()),
            completed_at: display_timestamp(task.completed_at.as_deref()),
            subject_template: task.subject_template.clone(),
            filters_applied: task.filters_applied.clone().unwrap_or_default(),
            last_error_message: task.last_error_message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDetailView {
    pub phase: DetailPhase,
    pub task_uuid: Option<String>,
    pub detail: Option<TaskDetailFields>,
    pub detail_error: Option<String>,
    pub logs_status: SlotStatus,
    pub logs_error: Option<String>,
    pub logs: Vec<LogRow>,
    pub logs_total: u64,
    pub logs_pagination: Pagination,
}

/// Banner de resultado del último envío.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackView {
    Nothing,
    Spinner,
    Success {
        message: String,
        task_uuid: Option<String>,
        total_employees_matched: i64,
    },
    Error {
        message: String,
    },
}
