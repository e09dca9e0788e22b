//! services/task_history_service.rs
//! Lista paginada del historial de tareas de envío.

use crate::{
    models::{
        pagination_model::Pagination,
        view_model::{TaskHistoryView, TaskRow},
    },
    store::task_store::TaskStore,
};

#[derive(Clone)]
pub struct TaskHistoryService {
    store: TaskStore,
}

impl TaskHistoryService {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub async fn current_pagination(&self) -> Pagination {
        self.store.read(|s| s.history_pagination).await
    }

    /// Consulta la página pedida: skip = (page-1) * page_size.
    pub async fn load(&self, pagination: Pagination) -> TaskHistoryView {
        self.store.fetch_history(pagination).await;
        self.view().await
    }

    /// Botón "refrescar": misma paginación.
    pub async fn refresh(&self) -> TaskHistoryView {
        self.store.refresh_history().await;
        self.view().await
    }

    pub async fn view(&self) -> TaskHistoryView {
        self.store
            .read(|s| TaskHistoryView {
                status: s.history.status(),
                error: s.history.error().map(str::to_string),
                rows: s
                    .history
                    .data()
                    .map(|page| page.tasks.iter().map(TaskRow::from).collect())
                    .unwrap_or_default(),
                total: s.history_total(),
                page: s.history_pagination.page,
                page_size: s.history_pagination.page_size,
            })
            .await
    }
}
