//! store/task_store.rs
//! Store global de la consola: cuatro slots asíncronos independientes
//! (envío, historial, detalle, logs) más sus parámetros de paginación.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::ApiResult,
    models::{
        email_task_model::{SendRequest, SendResponse, TaskDetail, TaskHistoryPage, TaskLogsPage},
        pagination_model::Pagination,
    },
    services::payroll_api_service::PayrollApi,
    store::async_slot::{AsyncSlot, RequestTicket, SlotStatus},
};

pub const SEND_FAILED_MSG: &str = "发送工资单邮件失败";
pub const HISTORY_FAILED_MSG: &str = "获取任务历史失败";
pub const DETAIL_FAILED_MSG: &str = "获取任务详情失败";
pub const LOGS_FAILED_MSG: &str = "获取任务日志失败";

#[derive(Debug, Clone)]
pub struct TaskStoreState {
    pub submission: AsyncSlot<SendResponse>,
    pub history: AsyncSlot<TaskHistoryPage>,
    pub history_pagination: Pagination,
    pub selected_task: Option<String>,
    pub detail: AsyncSlot<TaskDetail>,
    pub logs: AsyncSlot<TaskLogsPage>,
    pub logs_pagination: Pagination,
}

impl TaskStoreState {
    fn new(page_size: u64) -> Self {
        Self {
            submission: AsyncSlot::new(),
            history: AsyncSlot::new(),
            history_pagination: Pagination::first_page(page_size),
            selected_task: None,
            detail: AsyncSlot::new(),
            logs: AsyncSlot::new(),
            logs_pagination: Pagination::first_page(page_size),
        }
    }

    pub fn history_total(&self) -> u64 {
        self.history.data().map(|p| p.total_count).unwrap_or(0)
    }

    pub fn logs_total(&self) -> u64 {
        self.logs.data().map(|p| p.total_count).unwrap_or(0)
    }
}

#[derive(Clone)]
pub struct TaskStore {
    api: Arc<dyn PayrollApi>,
    state: Arc<RwLock<TaskStoreState>>,
}

impl TaskStore {
    pub fn new(api: Arc<dyn PayrollApi>, page_size: u64) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(TaskStoreState::new(page_size))),
        }
    }

    /// Lectura consistente del estado.
    pub async fn read<R>(&self, f: impl FnOnce(&TaskStoreState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    // ----------------------------------------------------------------
    // Envío
    // ----------------------------------------------------------------

    /// Despacha el envío y espera; `begin` ya borra la respuesta/error previos.
    pub async fn submit(&self, req: SendRequest) -> SlotStatus {
        let ticket = self.state.write().await.submission.begin();
        log::info!(
            "(submit) Enviando recibos pay_period={} ticket={}",
            req.pay_period,
            ticket.id()
        );

        let outcome = self.api.send_payslip_emails(&req).await;
        if let Err(e) = &outcome {
            log::error!("(submit) Falló el envío: {}", e);
        }

        let mut state = self.state.write().await;
        apply(&mut state.submission, "submit", ticket, outcome, SEND_FAILED_MSG);
        state.submission.status()
    }

    pub async fn reset_submission(&self) {
        self.state.write().await.submission.reset();
    }

    // ----------------------------------------------------------------
    // Historial
    // ----------------------------------------------------------------

    pub async fn fetch_history(&self, pagination: Pagination) -> SlotStatus {
        let ticket = {
            let mut state = self.state.write().await;
            state.history_pagination = pagination;
            state.history.begin()
        };
        log::debug!(
            "(fetch_history) skip={} limit={} ticket={}",
            pagination.skip(),
            pagination.limit(),
            ticket.id()
        );

        let outcome = self
            .api
            .task_history(pagination.skip(), pagination.limit())
            .await;

        let mut state = self.state.write().await;
        apply(&mut state.history, "fetch_history", ticket, outcome, HISTORY_FAILED_MSG);
        state.history.status()
    }

    /// Re-emite la consulta con la paginación actual.
    pub async fn refresh_history(&self) -> SlotStatus {
        let pagination = self.read(|s| s.history_pagination).await;
        self.fetch_history(pagination).await
    }

    // ----------------------------------------------------------------
    // Detalle + logs
    // ----------------------------------------------------------------

    /// Cambia la tarea seleccionada.
    ///
    /// `Some(uuid)`: despacha detalle y primera página de logs a la vez.
    /// `None`: limpia detalle y logs.
    pub async fn select_task(&self, task_uuid: Option<String>) {
        let Some(task_uuid) = task_uuid else {
            self.clear_detail().await;
            return;
        };

        let (detail_ticket, logs_ticket, pagination) = {
            let mut state = self.state.write().await;
            state.selected_task = Some(task_uuid.clone());
            state.logs_pagination = state.logs_pagination.reset();
            (state.detail.begin(), state.logs.begin(), state.logs_pagination)
        };
        log::info!("(select_task) Tarea seleccionada {}", task_uuid);

        // Cada slot se resuelve en cuanto llega su respuesta.
        let detail = async {
            let outcome = self.api.task_detail(&task_uuid).await;
            let mut state = self.state.write().await;
            apply(&mut state.detail, "select_task", detail_ticket, outcome, DETAIL_FAILED_MSG);
        };
        let logs = async {
            let outcome = self
                .api
                .task_logs(&task_uuid, pagination.skip(), pagination.limit())
                .await;
            let mut state = self.state.write().await;
            apply(&mut state.logs, "select_task", logs_ticket, outcome, LOGS_FAILED_MSG);
        };
        futures::join!(detail, logs);
    }

    /// Nueva página de logs para la tarea seleccionada. Sin selección no hace nada.
    pub async fn change_logs_page(&self, pagination: Pagination) -> SlotStatus {
        let (task_uuid, ticket) = {
            let mut state = self.state.write().await;
            let Some(task_uuid) = state.selected_task.clone() else {
                log::debug!("(change_logs_page) Sin tarea seleccionada, se ignora");
                return state.logs.status();
            };
            state.logs_pagination = pagination;
            (task_uuid, state.logs.begin())
        };

        let outcome = self
            .api
            .task_logs(&task_uuid, pagination.skip(), pagination.limit())
            .await;

        let mut state = self.state.write().await;
        apply(&mut state.logs, "change_logs_page", ticket, outcome, LOGS_FAILED_MSG);
        state.logs.status()
    }

    /// Detalle a idle, logs vacíos y paginación de logs a la página 1.
    pub async fn clear_detail(&self) {
        let mut state = self.state.write().await;
        state.selected_task = None;
        state.detail.reset();
        state.logs.reset();
        state.logs_pagination = state.logs_pagination.reset();
        log::debug!("(clear_detail) Detalle y logs limpiados");
    }
}

/// Resuelve un slot con el resultado de la API, extrayendo el mensaje de error.
fn apply<T>(
    slot: &mut AsyncSlot<T>,
    origin: &str,
    ticket: RequestTicket,
    outcome: ApiResult<T>,
    fallback: &str,
) {
    let outcome = outcome.map_err(|e| e.user_message(fallback));
    if !slot.resolve(ticket, outcome) {
        log::debug!(
            "({}) Respuesta obsoleta descartada ticket={}",
            origin,
            ticket.id()
        );
    }
}
