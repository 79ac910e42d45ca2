//! CLI error types.

use std::error::Error;

use atlwiki_client::WikiError;
use atlwiki_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Wiki(#[from] WikiError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Render an error with its `source()` chain, skipping causes already in the message.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
