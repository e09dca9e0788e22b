//! error.rs
//! Errores tipados del cliente hacia el backend de nóminas.

use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No hubo respuesta HTTP (conexión, timeout, DNS...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// El backend respondió con un status distinto de 2xx
    #[error("Backend responded with status {status}")]
    Server { status: u16, detail: Option<String> },

    /// El cuerpo no se pudo deserializar
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Mensaje enviado por el servidor, si lo hay.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                detail: Some(detail),
                ..
            } => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Mensaje legible para el usuario: detalle del servidor o el mensaje genérico.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Extrae el mensaje de error de un cuerpo de respuesta.
///
/// Acepta `{"detail": "..."}`, `{"detail": [{"msg": "..."}, ...]}` y
/// `{"message": "..."}`. Cualquier otra forma devuelve `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    match json.get("detail") {
        Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }

    json.get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
