//! handlers/mod.rs
pub mod email_task_handler;
pub mod form_handler;
pub mod health_handler;
