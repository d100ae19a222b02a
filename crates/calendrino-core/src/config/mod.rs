use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::util::slug::generate_slug;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub render: RenderConfig,
    pub sources: Vec<SourceConfig>,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub look_behind_days: u32,
    pub look_ahead_days: u32,
    pub timezone: String,
    pub first_weekday: String,
    pub template_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl RenderConfig {
    /// ## Summary
    /// Resolves the zone in which "today" is determined.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if the name is not in the tz database.
    pub fn timezone(&self) -> CoreResult<chrono_tz::Tz> {
        self.timezone.parse::<chrono_tz::Tz>().map_err(|err| {
            CoreError::InvalidConfiguration(format!("render.timezone '{}': {err}", self.timezone))
        })
    }

    /// ## Summary
    /// Resolves the weekday shown in the first column of each month.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if the name is not a weekday.
    pub fn first_weekday(&self) -> CoreResult<chrono::Weekday> {
        self.first_weekday.parse::<chrono::Weekday>().map_err(|err| {
            CoreError::InvalidConfiguration(format!(
                "render.first_weekday '{}': {err}",
                self.first_weekday
            ))
        })
    }
}

/// One calendar feed. `location` is either an `http(s)://` URL or a local path.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub location: String,
    #[serde(default)]
    pub class: Option<String>,
}

impl SourceConfig {
    /// ## Summary
    /// Returns the class-safe styling tag for items from this source.
    ///
    /// Falls back to `src{index}` when no class name is configured.
    #[must_use]
    pub fn class_name(&self, index: usize) -> String {
        self.class
            .as_deref()
            .map(generate_slug)
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| format!("src{index}"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Returns a config builder preloaded with every default value.
    ///
    /// ## Errors
    /// Returns `ConfigError` if a default value cannot be set.
    pub fn defaults() -> CoreResult<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("render.look_behind_days", 0)?
            .set_default("render.look_ahead_days", 7)?
            .set_default("render.timezone", "UTC")?
            .set_default("render.first_weekday", "Mon")?
            .set_default("sources", Vec::<String>::new())?
            .set_default("http.timeout_secs", 30)?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from environment variables and a TOML file into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// Variables use the `CALENDRINO_` prefix and `__` between sections,
    /// e.g. `CALENDRINO_RENDER__LOOK_AHEAD_DAYS=14`.
    ///
    /// ## Errors
    /// Returns `ConfigError` if the file cannot be read or a value has the
    /// wrong type.
    pub fn load_from(path: &str) -> CoreResult<Self> {
        Ok(Self::defaults()?
            // TOML file
            .add_source(config::File::with_name(path).required(false))
            // Env file
            .add_source(
                config::Environment::with_prefix("CALENDRINO")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Loads configuration from `config.toml` and the environment.
    ///
    /// ## Errors
    /// Returns `ConfigError` if building the configuration or deserializing it fails.
    pub fn load() -> CoreResult<Self> {
        Self::load_from("config.toml")
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns `ConfigError` if loading or deserializing the configuration fails.
pub fn load_config(path: Option<&str>) -> CoreResult<Settings> {
    if let Ok(env_file) = dotenvy::dotenv() {
        tracing::debug!(path = %env_file.display(), "Loaded environment file");
    }

    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}
