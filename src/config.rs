use crate::error::{FarmWeatherError, Result};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ussd: UssdConfig,
    #[serde(default)]
    pub openweathermap: OpenWeatherMapConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UssdConfig {
    /// Seconds since session start after which the next request restarts the menu
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,
    #[serde(default = "default_location")]
    pub default_location: String,
}

/// Upper bound for `ussd.session_timeout_secs` (one day)
pub const MAX_SESSION_TIMEOUT_SECS: u64 = 86_400;

fn default_session_timeout_secs() -> u64 {
    1800
}

fn default_location() -> String {
    "Gulu".into()
}

impl UssdConfig {
    /// Session lifetime, clamped to `MAX_SESSION_TIMEOUT_SECS`
    pub fn session_timeout(&self) -> chrono::Duration {
        let secs = self.session_timeout_secs.min(MAX_SESSION_TIMEOUT_SECS);
        i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::seconds(MAX_SESSION_TIMEOUT_SECS as i64))
    }

    pub fn validate(&self) -> Result<()> {
        if self.session_timeout_secs == 0 || self.session_timeout_secs > MAX_SESSION_TIMEOUT_SECS {
            return Err(FarmWeatherError::Config(format!(
                "ussd.session_timeout_secs must be between 1 and {}, got {}",
                MAX_SESSION_TIMEOUT_SECS, self.session_timeout_secs
            )));
        }
        Ok(())
    }
}

impl Default for UssdConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: default_session_timeout_secs(),
            default_location: default_location(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".into()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    30
}

impl Default for OpenWeatherMapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("read_timeout_secs", &self.read_timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FarmWeatherError::Config(format!(
                "Config file not found at {:?}. Run `farmweather init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FarmWeatherError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse a config document, substituting `${VAR}` placeholders first.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FarmWeatherError::Config(format!("Failed to parse config: {}", e)))?;

        config.ussd.validate()?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("farmweather").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/farmweather/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FarmWeatherError::Config("Cannot determine config directory".into()))?
            .join("farmweather");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up the farmer weather service.");
        println!();

        println!("USSD Menu");
        let default_location: String = Input::new()
            .with_prompt("  Default location")
            .default(default_location())
            .interact_text()
            .map_err(|e| FarmWeatherError::Config(format!("Input error: {}", e)))?;

        let session_timeout_secs: u64 = Input::new()
            .with_prompt("  Session timeout (seconds)")
            .default(default_session_timeout_secs())
            .interact_text()
            .map_err(|e| FarmWeatherError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("OpenWeatherMap (leave blank to read ${{OPENWEATHERMAP_API_KEY}} at startup)");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| FarmWeatherError::Config(format!("Input error: {}", e)))?;

        let api_key = if api_key.is_empty() {
            "${OPENWEATHERMAP_API_KEY}".to_string()
        } else {
            api_key
        };

        println!();

        let ussd = UssdConfig {
            session_timeout_secs,
            default_location,
        };
        ussd.validate()?;

        let config = Config {
            ussd,
            openweathermap: OpenWeatherMapConfig {
                api_key,
                ..OpenWeatherMapConfig::default()
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FarmWeatherError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# farmweather configuration\n# Generated by `farmweather init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        // Re-read so placeholders written above resolve the same way a later load would
        let config = Self::load(Some(&config_path))?;
        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| FarmWeatherError::Config(format!("Invalid placeholder pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.ussd.session_timeout_secs, 1800);
        assert_eq!(config.ussd.default_location, "Gulu");
        assert_eq!(config.openweathermap.connect_timeout_secs, 10);
        assert_eq!(config.openweathermap.read_timeout_secs, 30);
        assert_eq!(config.openweathermap.base_url, "https://api.openweathermap.org");
    }

    #[test]
    fn substitutes_environment_placeholders() {
        std::env::set_var("FARMWEATHER_TEST_OWM_KEY", "abc123");
        let config = Config::from_yaml(
            "openweathermap:\n  api_key: ${FARMWEATHER_TEST_OWM_KEY}\nussd:\n  default_location: Lira\n",
        )
        .unwrap();
        assert_eq!(config.openweathermap.api_key, "abc123");
        assert_eq!(config.ussd.default_location, "Lira");
    }

    #[test]
    fn unset_placeholder_is_left_verbatim() {
        let config = Config::from_yaml(
            "openweathermap:\n  api_key: \"${FARMWEATHER_TEST_SURELY_UNSET}\"\n",
        )
        .unwrap();
        assert_eq!(
            config.openweathermap.api_key,
            "${FARMWEATHER_TEST_SURELY_UNSET}"
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_yaml("ussd:\n  session_timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, FarmWeatherError::Config(_)));
    }

    #[test]
    fn oversized_timeout_is_rejected() {
        for secs in ["86401", "1000000000000000", "18446744073709551615"] {
            let yaml = format!("ussd:\n  session_timeout_secs: {}\n", secs);
            let err = Config::from_yaml(&yaml).unwrap_err();
            assert!(matches!(err, FarmWeatherError::Config(_)), "accepted {}", secs);
        }

        let config = Config::from_yaml("ussd:\n  session_timeout_secs: 86400\n").unwrap();
        assert_eq!(config.ussd.session_timeout(), chrono::Duration::days(1));
    }

    #[test]
    fn session_timeout_is_clamped_when_built_directly() {
        let ussd = UssdConfig {
            session_timeout_secs: u64::MAX,
            ..UssdConfig::default()
        };
        assert_eq!(ussd.session_timeout(), chrono::Duration::days(1));
        assert!(ussd.validate().is_err());
        assert_eq!(
            UssdConfig::default().session_timeout(),
            chrono::Duration::seconds(1800)
        );
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let config = OpenWeatherMapConfig {
            api_key: "super-secret".into(),
            ..OpenWeatherMapConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
