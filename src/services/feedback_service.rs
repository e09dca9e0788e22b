//! services/feedback_service.rs
//! Banner de resultado del envío. Cerrar el banner es estado local de la
//! consola: no toca el store.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    models::{email_task_model::SendResponse, view_model::FeedbackView},
    store::{
        async_slot::{AsyncSlot, RequestTicket, SlotState},
        task_store::TaskStore,
    },
};

/// Renderizado puro del slot de envío.
pub fn render_feedback(slot: &AsyncSlot<SendResponse>) -> FeedbackView {
    match slot.state() {
        SlotState::Idle => FeedbackView::Nothing,
        SlotState::Loading { .. } => FeedbackView::Spinner,
        SlotState::Ready { data, .. } => FeedbackView::Success {
            message: data.message.clone(),
            task_uuid: data.task_uuid.clone(),
            total_employees_matched: data.total_employees_matched,
        },
        SlotState::Failed { error, .. } => FeedbackView::Error {
            message: error.clone(),
        },
    }
}

#[derive(Clone)]
pub struct FeedbackService {
    store: TaskStore,
    dismissed: Arc<RwLock<Option<RequestTicket>>>,
}

impl FeedbackService {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            dismissed: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn view(&self) -> FeedbackView {
        let dismissed = *self.dismissed.read().await;
        self.store
            .read(|s| match s.submission.latest_ticket() {
                Some(ticket) if dismissed == Some(ticket) => FeedbackView::Nothing,
                _ => render_feedback(&s.submission),
            })
            .await
    }

    /// Oculta el banner del envío actual; un envío nuevo lo vuelve a mostrar.
    pub async fn dismiss(&self) -> FeedbackView {
        let current = self.store.read(|s| s.submission.latest_ticket()).await;
        *self.dismissed.write().await = current;
        self.view().await
    }
}
