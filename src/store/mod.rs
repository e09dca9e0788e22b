//! store/mod.rs
//! Estado compartido de la consola.

pub mod async_slot;
pub mod task_store;
