//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod email_task_model;
pub mod form_model;
pub mod option_model;
pub mod pagination_model;
pub mod view_model;
