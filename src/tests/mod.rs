//! tests/mod.rs
//! Pruebas de la consola contra un backend en memoria.

mod monitoring_tests;
mod selection_tests;
