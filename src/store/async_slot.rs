//! store/async_slot.rs
//! Un slot asíncrono del store: Idle | Loading | Ready | Failed, con ticket.
//!
//! Cada `begin()` emite un ticket nuevo y estrictamente creciente. Sólo el
//! último ticket emitido puede resolver el slot; las respuestas de peticiones
//! superadas se descartan.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
pub enum SlotState<T> {
    Idle,
    Loading { ticket: RequestTicket },
    Ready { ticket: RequestTicket, data: T },
    Failed { ticket: RequestTicket, error: String },
}

#[derive(Debug, Clone)]
pub struct AsyncSlot<T> {
    issued: u64,
    latest: Option<RequestTicket>,
    state: SlotState<T>,
}

impl<T> Default for AsyncSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AsyncSlot<T> {
    pub fn new() -> Self {
        Self {
            issued: 0,
            latest: None,
            state: SlotState::Idle,
        }
    }

    /// pending: status=loading, se borra el error/datos previos.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket(self.issued);
        self.latest = Some(ticket);
        self.state = SlotState::Loading { ticket };
        ticket
    }

    /// Aplica el resultado si el ticket sigue siendo el último.
    /// Devuelve `false` cuando la respuesta quedó obsoleta.
    pub fn resolve(&mut self, ticket: RequestTicket, outcome: Result<T, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = match outcome {
            Ok(data) => SlotState::Ready { ticket, data },
            Err(error) => SlotState::Failed { ticket, error },
        };
        true
    }

    /// Vuelve a Idle; cualquier petición en vuelo queda obsoleta.
    pub fn reset(&mut self) {
        self.latest = None;
        self.state = SlotState::Idle;
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest == Some(ticket)
    }

    pub fn latest_ticket(&self) -> Option<RequestTicket> {
        self.latest
    }

    pub fn state(&self) -> &SlotState<T> {
        &self.state
    }

    pub fn status(&self) -> SlotStatus {
        match self.state {
            SlotState::Idle => SlotStatus::Idle,
            SlotState::Loading { .. } => SlotStatus::Loading,
            SlotState::Ready { .. } => SlotStatus::Succeeded,
            SlotState::Failed { .. } => SlotStatus::Failed,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            SlotState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SlotState::Failed { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }
}
