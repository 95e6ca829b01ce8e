use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ui: UiConfig,
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
    pub notifications: NotificationsConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    /// How long a toast without an explicit duration stays on screen
    pub toast_duration_ms: u64,
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

fn default_site_name() -> String {
    "Moroccan Real Estate Rise".to_string()
}

/// Simulated latencies of the out-of-process collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub kyc_delay_ms: u64,
    pub registration_delay_ms: u64,
    #[serde(default = "default_detail_delay")]
    pub detail_delay_ms: u64,
}

fn default_detail_delay() -> u64 {
    500
}

impl SubmissionConfig {
    pub fn kyc_delay(&self) -> Duration {
        Duration::from_millis(self.kyc_delay_ms)
    }

    pub fn registration_delay(&self) -> Duration {
        Duration::from_millis(self.registration_delay_ms)
    }

    pub fn detail_delay(&self) -> Duration {
        Duration::from_millis(self.detail_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Annual return as a fraction (0.09 = 9%)
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,
    #[serde(default = "default_years")]
    pub years: u32,
    /// Input hint only, not enforced on the amount
    #[serde(default = "default_calculator_minimum")]
    pub minimum: u64,
    #[serde(default = "default_calculator_step")]
    pub step: u64,
    #[serde(default = "default_calculator_amount")]
    pub default_amount: u64,
}

fn default_annual_rate() -> f64 {
    0.09
}

fn default_years() -> u32 {
    3
}

fn default_calculator_minimum() -> u64 {
    5_000
}

fn default_calculator_step() -> u64 {
    1_000
}

fn default_calculator_amount() -> u64 {
    5_000
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            annual_rate: default_annual_rate(),
            years: default_years(),
            minimum: default_calculator_minimum(),
            step: default_calculator_step(),
            default_amount: default_calculator_amount(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub enabled: bool,
    #[serde(default)]
    pub os: OsNotificationConfig,
}

/// Desktop notification settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsNotificationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub sound: bool,
    /// Event types to forward (e.g. "kyc.submitted"); empty means all
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".estate-rise/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the client works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/estate-rise/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("estate-rise").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with ESTATE_RISE_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("ESTATE_RISE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.ui.toast_duration_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig {
                tick_rate_ms: 250,
                toast_duration_ms: 5000,
                site_name: default_site_name(),
            },
            submission: SubmissionConfig {
                kyc_delay_ms: 2000,
                registration_delay_ms: 1500,
                detail_delay_ms: default_detail_delay(),
            },
            calculator: CalculatorConfig::default(),
            notifications: NotificationsConfig {
                enabled: true,
                os: OsNotificationConfig::default(),
            },
            paths: PathsConfig {
                state: ".estate-rise".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.submission.kyc_delay(), Duration::from_millis(2000));
        assert_eq!(
            config.submission.registration_delay(),
            Duration::from_millis(1500)
        );
        assert_eq!(config.submission.detail_delay(), Duration::from_millis(500));
        assert!((config.calculator.annual_rate - 0.09).abs() < f64::EPSILON);
        assert_eq!(config.calculator.years, 3);
        assert!(config.notifications.enabled);
        assert!(!config.notifications.os.enabled);
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[submission]\nkyc_delay_ms = 10\nregistration_delay_ms = 20\n\n[notifications.os]\nenabled = true\nevents = [\"kyc.submitted\"]"
        )
        .unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.submission.kyc_delay_ms, 10);
        assert_eq!(config.submission.registration_delay_ms, 20);
        // Untouched keys keep their defaults
        assert_eq!(config.submission.detail_delay_ms, 500);
        assert_eq!(config.ui.site_name, "Moroccan Real Estate Rise");
        assert!(config.notifications.os.enabled);
        assert_eq!(config.notifications.os.events, vec!["kyc.submitted"]);
    }

    #[test]
    fn test_to_toml_round_trips_sections() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[submission]"));
        assert!(rendered.contains("kyc_delay_ms = 2000"));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.paths.state, ".estate-rise");
    }

    #[test]
    fn test_logs_path_is_under_state() {
        let mut config = Config::default();
        config.paths.state = "/tmp/estate-rise-state".to_string();
        assert_eq!(
            config.logs_path(),
            PathBuf::from("/tmp/estate-rise-state/logs")
        );
    }
}
