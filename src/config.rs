// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AssistantError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub chat: ChatConfig,
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    pub history_window: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    pub seed_protocols: bool,
    pub notes_dir: Option<PathBuf>,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NOTESAGE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        if config.provider.api_key.is_none() {
            config.provider.api_key = std::env::var("GEMINI_API_KEY").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            provider: ProviderConfig {
                base_url: crate::provider::gemini::DEFAULT_BASE_URL.to_string(),
                model: crate::provider::gemini::DEFAULT_MODEL.to_string(),
                api_key: std::env::var("GEMINI_API_KEY").ok(),
                temperature: 0.1,
            },
            chat: ChatConfig { history_window: 10 },
            library: LibraryConfig {
                seed_protocols: true,
                notes_dir: None,
                skip_patterns: vec!["draft".to_string(), "~$".to_string()],
                max_file_size_mb: 10,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.chat.history_window == 0 {
            return Err(AssistantError::Config(
                "history_window must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(AssistantError::Config(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.library.max_file_size_mb == 0 {
            return Err(AssistantError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
