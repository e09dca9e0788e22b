//! models/option_model.rs
//! Listas de referencia (sólo lectura) para poblar los selectores del formulario.

use serde::{Deserialize, Serialize};

/// El backend devuelve a veces el arreglo directo y a veces `{ "data": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Wrapped { data } => data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailServerConfigOption {
    pub id: i64,
    pub server_name: String,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOption {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentOption {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub unit_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeOption {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub employee_code: Option<String>,
    #[serde(default)]
    pub department_id: Option<i64>,
}

/// Opciones que el formulario necesita al abrirse.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormOptions {
    pub pay_periods: Vec<String>,
    pub email_configs: Vec<EmailServerConfigOption>,
    pub units: Vec<UnitOption>,
}
