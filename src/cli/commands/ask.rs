//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{QaSettings, Settings};
use crate::qa::QaEngine;
use crate::store::SqliteRecordStore;
use crate::vector_index::SqliteVectorIndex;
use anyhow::Result;
use std::sync::Arc;

/// Run the ask command.
pub async fn run_ask(
    filename: &str,
    question: &str,
    retrieval: bool,
    top_k: Option<usize>,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask) {
        Output::error(&format!("{}", e));
        Output::info("Run 'notat doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let (completion_model, chat_model) = resolve_models(model.as_deref(), &settings.qa);

    let engine = QaEngine::new(
        Arc::new(SqliteRecordStore::new(&settings.store_path())?),
        Arc::new(SqliteVectorIndex::new(&settings.vector_index_path())?),
        &completion_model,
        &chat_model,
        settings.qa.answer_max_tokens,
        settings.api_timeout(),
    )
    .with_prompts(settings.prompts.clone());

    let spinner = Output::spinner("Generating answer...");

    let answer = if retrieval {
        let top_k = top_k.unwrap_or(settings.qa.top_k);
        engine.ask_retrieval(filename, question, top_k).await
    } else {
        engine.ask_direct(filename, question).await
    };

    match answer {
        Ok(answer) => {
            spinner.finish_and_clear();
            println!("\n{}\n", answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

/// Resolve the answering models. A `--model` override applies to whichever
/// mode runs; without it the configured per-mode models are used.
fn resolve_models(override_model: Option<&str>, qa: &QaSettings) -> (String, String) {
    match override_model {
        Some(model) => (model.to_string(), model.to_string()),
        None => (qa.completion_model.clone(), qa.chat_model.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_models_defaults_to_settings() {
        let qa = QaSettings::default();
        let (completion, chat) = resolve_models(None, &qa);
        assert_eq!(completion, qa.completion_model);
        assert_eq!(chat, qa.chat_model);
    }

    #[test]
    fn test_resolve_models_override_applies_to_both_modes() {
        let qa = QaSettings::default();
        let (completion, chat) = resolve_models(Some("gpt-4o"), &qa);
        assert_eq!(completion, "gpt-4o");
        assert_eq!(chat, "gpt-4o");
    }
}
