mod app;
mod ui;

use std::path::PathBuf;

use dispatch_core::config::DispatchConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Fallback location of the config file when no path is given on the command line.
const CONFIG_ENV: &str = "DISPATCH_CONFIG";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    ui::app_shell::run(load_config())
}

fn load_config() -> DispatchConfig {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV))
        .map(PathBuf::from);
    let Some(path) = path else {
        return DispatchConfig::default();
    };
    match DispatchConfig::load(&path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded dispatch config");
            config
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "using default dispatch config");
            DispatchConfig::default()
        }
    }
}
