pub mod console_config;
