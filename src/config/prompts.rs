//! Prompt templates for Notat.
//!
//! Templates are fixed instruction strings with `{{var}}` placeholders.
//! They can be overridden through the configuration file.

use serde::{Deserialize, Serialize};

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summarization: SummarizationPrompts,
    pub qa: QaPrompts,
}

/// Prompt for transcript summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationPrompts {
    pub instruction: String,
}

impl Default for SummarizationPrompts {
    fn default() -> Self {
        Self {
            instruction: "Summarize the following transcription:\n{{transcript}}".to_string(),
        }
    }
}

/// Prompts for question answering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaPrompts {
    /// Direct mode: stored summary, question, fixed answer suffix.
    pub direct: String,
    /// Retrieval mode: joined context block followed by the question.
    pub retrieval: String,
}

impl Default for QaPrompts {
    fn default() -> Self {
        Self {
            direct: "Summary: {{summary}}\nUser Question: {{question}}\nAnswer:".to_string(),
            retrieval: "Context section:\n{{context}}\n\nQuestion: {{question}}".to_string(),
        }
    }
}

impl Prompts {
    /// Render a template by substituting `{{key}}` placeholders.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.summarization.instruction.contains("{{transcript}}"));
        assert!(prompts.qa.direct.ends_with("Answer:"));
        assert!(prompts.qa.retrieval.starts_with("Context section:"));
    }

    #[test]
    fn test_render_template() {
        let template = "Summary: {{summary}}\nUser Question: {{question}}\nAnswer:";
        let mut vars = std::collections::HashMap::new();
        vars.insert("summary".to_string(), "short text".to_string());
        vars.insert("question".to_string(), "what?".to_string());

        let rendered = Prompts::render(template, &vars);
        assert_eq!(rendered, "Summary: short text\nUser Question: what?\nAnswer:");
    }
}
