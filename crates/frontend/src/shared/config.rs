use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub timing: TimingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BackendConfig {
    /// Базовый URL сервиса, например "https://xyz.supabase.co"
    pub url: String,
    /// Публичный (anon) ключ
    pub anon_key: String,
    pub page_size: u32,
    pub max_retries: u32,
    pub backoff_ms: u32,
}

/// Задержки координатора табов и контроллеров, мс
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct TimingConfig {
    /// Пауза после показа таба перед redraw и восстановлением
    pub settle_ms: u32,
    /// Пауза между восстановлением фильтров/сортировки и раскрытых строк
    pub expansion_settle_ms: u32,
    /// Пауза между раскрытыми строками и прокруткой
    pub scroll_settle_ms: u32,
    pub toggle_debounce_ms: u32,
    pub resize_debounce_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> log::Level {
        self.level.parse().unwrap_or(log::Level::Info)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[backend]
url = "https://statsboard.supabase.co"
anon_key = ""
page_size = 1000
max_retries = 3
backoff_ms = 400

[timing]
settle_ms = 50
expansion_settle_ms = 100
scroll_settle_ms = 150
toggle_debounce_ms = 300
resize_debounce_ms = 150

[logging]
level = "debug"
"#;

/// localStorage key with an optional override (full TOML document)
pub const CONFIG_STORAGE_KEY: &str = "statsboard.config";

pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

pub fn default_config() -> AppConfig {
    // Встроенный конфиг проверяется тестом ниже
    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| panic!("embedded config is broken: {e}"))
}

/// Load configuration
///
/// Search order:
/// 1. `localStorage["statsboard.config"]` (for local debugging)
/// 2. Falls back to embedded default config
pub fn load_config() -> AppConfig {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(CONFIG_STORAGE_KEY).ok().flatten());

    if let Some(contents) = stored {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loading config from localStorage['{}']", CONFIG_STORAGE_KEY);
                return config;
            }
            Err(e) => log::warn!("Ignoring config override: {}", e),
        }
    }

    log::info!("Using default embedded configuration");
    default_config()
}
