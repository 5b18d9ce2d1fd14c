//! Configuration module for Notat.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, QaPrompts, SummarizationPrompts};
pub use settings::{
    EmbeddingSettings, GeneralSettings, QaSettings, Settings, StoreSettings,
    SummarizationSettings, TranscriptionSettings, VectorIndexSettings,
};
