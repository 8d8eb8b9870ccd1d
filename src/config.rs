//! Application configuration from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::location::DEFAULT_ORIGIN;
use crate::models::Coordinate;
use crate::pricing::DEFAULT_DURATION_MINUTES;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// JSON venue list; the built-in Shibuya catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    pub default_duration_minutes: u32,
    /// Where to rank from when the client sends no location
    pub fallback_origin: Coordinate,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: "info".to_string(),
            catalog_path: None,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            fallback_origin: DEFAULT_ORIGIN,
        }
    }
}

/// Load configuration, reading a `.env` file first if one exists.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from an env-var lookup function, so parsing can be tested
/// without touching the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let bind_addr = match lookup("KARAOKE_BIND_ADDR") {
        Ok(raw) => raw
            .parse::<SocketAddr>()
            .map_err(|e| invalid("KARAOKE_BIND_ADDR", e.to_string()))?,
        Err(_) => defaults.bind_addr,
    };

    let log_level = lookup("KARAOKE_LOG_LEVEL").unwrap_or(defaults.log_level);

    let catalog_path = lookup("KARAOKE_CATALOG_PATH")
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);

    let default_duration_minutes = match lookup("KARAOKE_DEFAULT_DURATION_MINUTES") {
        Ok(raw) => {
            let minutes = raw
                .parse::<u32>()
                .map_err(|e| invalid("KARAOKE_DEFAULT_DURATION_MINUTES", e.to_string()))?;
            if minutes == 0 {
                return Err(invalid(
                    "KARAOKE_DEFAULT_DURATION_MINUTES",
                    "must be greater than zero".to_string(),
                ));
            }
            minutes
        }
        Err(_) => defaults.default_duration_minutes,
    };

    let parse_degrees = |var: &str, default: f64, limit: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => {
                let value = raw.parse::<f64>().map_err(|e| invalid(var, e.to_string()))?;
                if !value.is_finite() || value.abs() > limit {
                    return Err(invalid(var, format!("must be within ±{limit}")));
                }
                Ok(value)
            }
            Err(_) => Ok(default),
        }
    };

    let fallback_origin = Coordinate::new(
        parse_degrees("KARAOKE_FALLBACK_LAT", defaults.fallback_origin.lat, 90.0)?,
        parse_degrees("KARAOKE_FALLBACK_LNG", defaults.fallback_origin.lng, 180.0)?,
    );

    Ok(AppConfig {
        bind_addr,
        log_level,
        catalog_path,
        default_duration_minutes,
        fallback_origin,
    })
}
