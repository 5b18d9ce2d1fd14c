//! OpenAI client construction.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Fallback request timeout when none is configured (5 minutes). Whisper
/// uploads of long recordings routinely take minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Create an OpenAI client with the given request timeout.
///
/// The timeout comes from `general.api_timeout_secs` in the configuration;
/// it bounds every vendor call so a hung request cannot stall a command
/// indefinitely.
pub fn create_client(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}
