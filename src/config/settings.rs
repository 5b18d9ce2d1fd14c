//! Configuration settings for Notat.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcription: TranscriptionSettings,
    pub summarization: SummarizationSettings,
    pub embedding: EmbeddingSettings,
    pub store: StoreSettings,
    pub vector_index: VectorIndexSettings,
    pub qa: QaSettings,
    pub prompts: crate::config::Prompts,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Directory where saved recordings accumulate. There is no cleanup
    /// policy; files are kept indefinitely.
    pub recordings_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Request timeout for vendor API calls, in seconds.
    pub api_timeout_secs: u64,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.notat".to_string(),
            recordings_dir: "~/.notat/recordings".to_string(),
            log_level: "info".to_string(),
            api_timeout_secs: 300,
        }
    }
}

/// Transcription service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Speech-to-text model.
    pub model: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
        }
    }
}

/// Summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationSettings {
    /// Completion model for summarization.
    pub model: String,
    /// Token budget for the generated summary.
    pub max_tokens: u32,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-instruct".to_string(),
            max_tokens: 200,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions. Must match the vector index dimensionality.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the record store SQLite database.
    pub sqlite_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.notat/records.db".to_string(),
        }
    }
}

/// Vector index settings.
///
/// The index lives in its own database file, separate from the record store.
/// The two are independent systems with no transactional boundary between
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorIndexSettings {
    /// Path to the vector index SQLite database.
    pub sqlite_path: String,
}

impl Default for VectorIndexSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.notat/vectors.db".to_string(),
        }
    }
}

/// Question-answering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaSettings {
    /// Completion model for direct answers.
    pub completion_model: String,
    /// Chat model for retrieval-mode answers.
    pub chat_model: String,
    /// Token budget for answers.
    pub answer_max_tokens: u32,
    /// Default number of context matches in retrieval mode.
    pub top_k: usize,
}

impl Default for QaSettings {
    fn default() -> Self {
        Self {
            completion_model: "gpt-3.5-turbo-instruct".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            answer_max_tokens: 150,
            top_k: 5,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::NotatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notat")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded recordings directory path.
    pub fn recordings_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.recordings_dir)
    }

    /// Get the expanded record store database path.
    pub fn store_path(&self) -> PathBuf {
        Self::expand_path(&self.store.sqlite_path)
    }

    /// Get the expanded vector index database path.
    pub fn vector_index_path(&self) -> PathBuf {
        Self::expand_path(&self.vector_index.sqlite_path)
    }

    /// Get the vendor API request timeout.
    pub fn api_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.general.api_timeout_secs)
    }
}
