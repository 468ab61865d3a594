use crate::error::{ConfigError, ErrorKind};
use crate::exception::{ExceptionStatusTable, StatusMapping};
use dashmap::DashMap;
use std::env;
use std::sync::Arc;
use strum::IntoEnumIterator;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SERVER_NAME: &str = "webbasic";

/// Prefix of the per-kind status overrides, e.g. `EXCEPTION_STATUS_IllegalArgument`.
pub const EXCEPTION_STATUS_PREFIX: &str = "EXCEPTION_STATUS_";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Seeded from the process environment.
    pub fn new() -> Self {
        let service = Self::default();
        // Entries that are not valid UTF-8 cannot be configuration keys.
        let entries = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        for (key, value) in entries {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Settings the application is assembled from.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub server_name: String,
    pub exception_status: ExceptionStatusTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            server_name: DEFAULT_SERVER_NAME.to_string(),
            exception_status: ExceptionStatusTable::default(),
        }
    }
}

impl AppConfig {
    pub fn from_service(config: &ConfigService) -> Result<Self, ConfigError> {
        let mut app = Self::default();

        if let Some(host) = config.get("HOST") {
            app.host = host;
        }
        if let Some(port) = config.get("PORT") {
            app.port = port
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", port.as_str()))?;
        }
        if let Some(name) = config.get("SERVER_NAME") {
            app.server_name = name;
        }

        for kind in ErrorKind::iter() {
            let key = format!("{EXCEPTION_STATUS_PREFIX}{kind}");
            let Some(value) = config.get(&key) else {
                continue;
            };
            let default_code = app
                .exception_status
                .get(kind)
                .map(|mapping| mapping.code.clone())
                .unwrap_or_else(|| kind.to_string().to_uppercase());
            let mapping = StatusMapping::parse(&value, &default_code)
                .ok_or_else(|| ConfigError::invalid(key.as_str(), value.as_str()))?;
            app.exception_status.set(kind, mapping);
        }

        // An override naming a kind that does not exist is a typo, not a no-op.
        for entry in config.config.iter() {
            if let Some(kind) = entry.key().strip_prefix(EXCEPTION_STATUS_PREFIX) {
                if kind.parse::<ErrorKind>().is_err() {
                    return Err(ConfigError::UnknownErrorKind {
                        key: entry.key().clone(),
                    });
                }
            }
        }

        Ok(app)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
