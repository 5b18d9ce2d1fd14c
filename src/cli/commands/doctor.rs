//! Doctor command - verify configuration and database status.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{RecordStore, SqliteRecordStore};
use crate::vector_index::{SqliteVectorIndex, VectorIndex};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    hint: Option<String>,
}

#[derive(Debug, PartialEq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Notat Doctor");
    println!();

    let mut results = Vec::new();

    // API key
    results.push(match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => CheckResult::ok("OPENAI_API_KEY", "configured"),
        _ => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "export OPENAI_API_KEY='sk-...'",
        ),
    });

    // Config file
    let config_path = Settings::default_config_path();
    results.push(if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "not found, using defaults",
            "create one with 'notat init'",
        )
    });

    // Record store
    results.push(match SqliteRecordStore::new(&settings.store_path()) {
        Ok(store) => match store.get_all().await {
            Ok(records) => CheckResult::ok(
                "Record store",
                &format!("{} ({} records)", settings.store_path().display(), records.len()),
            ),
            Err(e) => CheckResult::error("Record store", &e.to_string(), "check the database file"),
        },
        Err(e) => CheckResult::error("Record store", &e.to_string(), "check the database path"),
    });

    // Vector index
    results.push(match SqliteVectorIndex::new(&settings.vector_index_path()) {
        Ok(index) => match index.entry_count().await {
            Ok(count) => CheckResult::ok(
                "Vector index",
                &format!("{} ({} vectors)", settings.vector_index_path().display(), count),
            ),
            Err(e) => CheckResult::error("Vector index", &e.to_string(), "check the database file"),
        },
        Err(e) => CheckResult::error("Vector index", &e.to_string(), "check the database path"),
    });

    // Recordings directory
    let recordings_dir = settings.recordings_dir();
    results.push(if recordings_dir.exists() {
        let count = std::fs::read_dir(&recordings_dir).map(|d| d.count()).unwrap_or(0);
        CheckResult::ok(
            "Recordings",
            &format!("{} ({} files, never cleaned up)", recordings_dir.display(), count),
        )
    } else {
        CheckResult::warning(
            "Recordings",
            "directory does not exist yet",
            "created on first 'notat summarize'",
        )
    });

    for result in &results {
        result.print();
    }

    println!();
    let errors = results.iter().filter(|r| r.status == CheckStatus::Error).count();
    if errors == 0 {
        Output::success("All checks passed.");
    } else {
        Output::error(&format!("{} check(s) failed.", errors));
    }

    Ok(())
}
