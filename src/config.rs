use crate::error::{Result, TravelBotError};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations_file: Option<PathBuf>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_base_url() -> String {
    DEFAULT_OWM_BASE_URL.to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

fn default_ttl_seconds() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
}

fn default_location() -> String {
    "London".to_string()
}

fn default_bot_name() -> String {
    "TravelBot".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            bot_name: default_bot_name(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            // Without a file, an API key in the environment is enough
            if config_override.is_none() {
                if let Ok(api_key) = std::env::var("OPENWEATHERMAP_API_KEY") {
                    tracing::debug!("No config file found, using OPENWEATHERMAP_API_KEY");
                    return Ok(Self::with_api_key(api_key));
                }
            }
            return Err(TravelBotError::Config(format!(
                "Config file not found at {:?}. Run `travelbot init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| TravelBotError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML after substituting `${VAR}` environment references
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| TravelBotError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            openweathermap: OpenWeatherMapConfig {
                api_key: api_key.into(),
                base_url: default_base_url(),
                units: default_units(),
            },
            cache: CacheConfig::default(),
            chat: ChatConfig::default(),
            locations_file: None,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.openweathermap.api_key.trim().is_empty() {
            return Err(TravelBotError::Config(
                "openweathermap.api_key is empty - set it or OPENWEATHERMAP_API_KEY".into(),
            ));
        }
        if self.openweathermap.api_key.starts_with("${") {
            return Err(TravelBotError::Config(format!(
                "openweathermap.api_key references an unset variable: {}",
                self.openweathermap.api_key
            )));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::default_config_path()
    }

    /// Default path for writing new config files (~/.config/travelbot/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TravelBotError::Config("Cannot determine config directory".into()))?
            .join("travelbot");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive(config_override: Option<&PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up TravelBot!");
        println!();

        println!("OpenWeatherMap");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .interact()
            .map_err(|e| TravelBotError::Config(format!("Input error: {}", e)))?;

        let units: String = Input::new()
            .with_prompt("  Units (metric, imperial, standard)")
            .default(default_units())
            .interact_text()
            .map_err(|e| TravelBotError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Chat");
        let default_location: String = Input::new()
            .with_prompt("  Default weather location")
            .default(default_location())
            .interact_text()
            .map_err(|e| TravelBotError::Config(format!("Input error: {}", e)))?;

        let ttl_seconds: u64 = Input::new()
            .with_prompt("  Forecast cache lifetime (seconds)")
            .default(default_ttl_seconds())
            .interact_text()
            .map_err(|e| TravelBotError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key,
                base_url: default_base_url(),
                units,
            },
            cache: CacheConfig { ttl_seconds },
            chat: ChatConfig {
                default_location,
                bot_name: default_bot_name(),
            },
            locations_file: None,
        };
        config.validate()?;

        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::default_config_path()?,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| TravelBotError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# TravelBot Configuration\n# Generated by `travelbot init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        re.replace_all(content, |caps: &regex_lite::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("TRAVELBOT_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TravelBotError::Config("Cannot determine data directory".into()))?
            .join("travelbot");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    /// Location directory file: explicit config value, else `<data dir>/locations.json`
    pub fn locations_path(&self, data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        match &self.locations_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir(data_dir_override)?.join("locations.json")),
        }
    }

    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache.ttl_seconds)
    }
}
