//! config/console_config.rs
//! Configuración de la consola: se lee del entorno (y .env) al arrancar.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::models::pagination_model::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Plantilla de asunto por defecto; lleva los dos placeholders.
pub const DEFAULT_SUBJECT_TEMPLATE: &str = "您的{pay_period}工资单 - {employee_name}";

#[derive(Debug, Clone, Serialize)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub api_timeout_secs: u64,
    pub bind_addr: String,
    pub port: u16,
    pub workers: usize,
    pub default_page_size: u64,
    pub history_poll_secs: u64, // 0 = sin sondeo
    pub default_subject_template: String,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la config a partir de una función de búsqueda (entorno, mapa en tests...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url =
            get("PAYROLL_API_BASE_URL").ok_or_else(|| anyhow!("No se definió PAYROLL_API_BASE_URL"))?;
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(anyhow!(
                "PAYROLL_API_BASE_URL debe empezar con http:// o https:// (valor: {})",
                api_base_url
            ));
        }

        let default_page_size: u64 = parse_or(get("DEFAULT_PAGE_SIZE"), "DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;

        Ok(Self {
            api_base_url,
            api_token: get("PAYROLL_API_TOKEN"),
            api_timeout_secs: parse_or(get("PAYROLL_API_TIMEOUT_SECS"), "PAYROLL_API_TIMEOUT_SECS", 30)?,
            bind_addr: get("CONSOLE_BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("CONSOLE_PORT"), "CONSOLE_PORT", 5022)?,
            workers: parse_or(get("CONSOLE_WORKERS"), "CONSOLE_WORKERS", 1)?,
            default_page_size: default_page_size.clamp(1, MAX_PAGE_SIZE),
            history_poll_secs: parse_or(get("HISTORY_POLL_SECS"), "HISTORY_POLL_SECS", 0)?,
            default_subject_template: get("DEFAULT_SUBJECT_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_SUBJECT_TEMPLATE.to_string()),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Valor inválido para {}: '{}'", key, value)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_base_url_is_set() {
        let cfg = ConsoleConfig::from_lookup(lookup(&[(
            "PAYROLL_API_BASE_URL",
            "http://payroll.local/api",
        )]))
        .unwrap();

        assert_eq!(cfg.port, 5022);
        assert_eq!(cfg.default_page_size, 10);
        assert_eq!(cfg.history_poll_secs, 0);
        assert!(cfg.api_token.is_none());
        assert!(cfg.default_subject_template.contains("{pay_period}"));
        assert!(cfg.default_subject_template.contains("{employee_name}"));
    }

    #[test]
    fn missing_base_url_is_an_error() {
        assert!(ConsoleConfig::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn invalid_number_is_reported() {
        let err = ConsoleConfig::from_lookup(lookup(&[
            ("PAYROLL_API_BASE_URL", "https://payroll.local"),
            ("CONSOLE_PORT", "abc"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("CONSOLE_PORT"));
    }

    #[test]
    fn page_size_is_clamped() {
        let cfg = ConsoleConfig::from_lookup(lookup(&[
            ("PAYROLL_API_BASE_URL", "https://payroll.local"),
            ("DEFAULT_PAGE_SIZE", "5000"),
        ]))
        .unwrap();
        assert_eq!(cfg.default_page_size, MAX_PAGE_SIZE);
    }
}
