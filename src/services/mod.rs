//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod feedback_service;
pub mod payroll_api_service;
pub mod selection_service;
pub mod submission_service;
pub mod task_detail_service;
pub mod task_history_service;
