//! services/task_detail_service.rs
//! Visor de detalle de una tarea y de sus logs de envío paginados.

use crate::{
    models::{
        pagination_model::Pagination,
        view_model::{DetailPhase, LogRow, TaskDetailFields, TaskDetailView},
    },
    store::{
        async_slot::SlotStatus,
        task_store::{TaskStore, TaskStoreState},
    },
};

#[derive(Clone)]
pub struct TaskDetailService {
    store: TaskStore,
}

impl TaskDetailService {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// `Some(uuid)`: detalle + primera página de logs. `None`: limpiar.
    pub async fn select(&self, task_uuid: Option<String>) -> TaskDetailView {
        let task_uuid = task_uuid
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        self.store.select_task(task_uuid).await;
        self.view().await
    }

    pub async fn current_logs_pagination(&self) -> Pagination {
        self.store.read(|s| s.logs_pagination).await
    }

    pub async fn change_logs_page(&self, pagination: Pagination) -> TaskDetailView {
        self.store.change_logs_page(pagination).await;
        self.view().await
    }

    pub async fn view(&self) -> TaskDetailView {
        self.store.read(render_detail).await
    }
}

pub fn detail_phase(state: &TaskStoreState) -> DetailPhase {
    if state.selected_task.is_none() {
        return DetailPhase::NoSelection;
    }
    match state.detail.status() {
        SlotStatus::Succeeded => DetailPhase::DetailReady,
        SlotStatus::Failed => DetailPhase::DetailFailed,
        SlotStatus::Loading | SlotStatus::Idle => DetailPhase::LoadingDetail,
    }
}

fn render_detail(state: &TaskStoreState) -> TaskDetailView {
    TaskDetailView {
        phase: detail_phase(state),
        task_uuid: state.selected_task.clone(),
        detail: state.detail.data().map(TaskDetailFields::from),
        detail_error: state.detail.error().map(str::to_string),
        logs_status: state.logs.status(),
        logs_error: state.logs.error().map(str::to_string),
        logs: state
            .logs
            .data()
            .map(|page| page.logs.iter().map(LogRow::from).collect())
            .unwrap_or_default(),
        logs_total: state.logs_total(),
        logs_pagination: state.logs_pagination,
    }
}
