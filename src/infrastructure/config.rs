use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "config/dashboard";
const ENV_PREFIX: &str = "MOISTURE";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub data: DataSettings,
    pub server: ServerSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: SocketAddr,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DashboardSettings {
    pub title: String,
    pub page_size: usize,
    pub precision: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "NPH Soil Moisture".to_string(),
            page_size: 10,
            precision: 2,
        }
    }
}

/// Values given on the command line, highest priority
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub data_path: Option<PathBuf>,
    pub bind: Option<String>,
}

/// Layer defaults, the optional config file, `MOISTURE__*` env vars and CLI overrides
pub fn load_app_config(config_file: &str, overrides: &ConfigOverrides) -> anyhow::Result<AppConfig> {
    let defaults = DashboardSettings::default();
    let mut builder = config::Config::builder()
        .set_default("data.path", "data.csv")?
        .set_default("server.bind", "127.0.0.1:8050")?
        .set_default("dashboard.title", defaults.title)?
        .set_default("dashboard.page_size", defaults.page_size as u64)?
        .set_default("dashboard.precision", defaults.precision as u64)?
        .add_source(config::File::with_name(config_file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

    if let Some(path) = &overrides.data_path {
        builder = builder.set_override("data.path", path.display().to_string())?;
    }
    if let Some(bind) = &overrides.bind {
        builder = builder.set_override("server.bind", bind.as_str())?;
    }

    let app_config: AppConfig = builder.build()?.try_deserialize()?;
    if app_config.dashboard.page_size == 0 {
        anyhow::bail!("dashboard.page_size must be at least 1");
    }
    Ok(app_config)
}
