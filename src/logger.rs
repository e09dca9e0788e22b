//! logger.rs
//! env_logger para la consola. Sin RUST_LOG: info para la app y warn para
//! el cliente HTTP (hyper/reqwest hacen mucho ruido en debug).

const DEFAULT_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn";

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
