// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Tracing subscriber setup
//!
//! Logging settings are read before the subscriber exists, so this module
//! reads the config file directly instead of going through
//! `AdoptionsConfig::load_or_default` (whose diagnostics would be lost).

use anyhow::{Context, Result};
use std::path::Path;

use adoptions_core::domain::config::{AdoptionsConfig, LoggingConfig};

/// `spec.observability.logging` from the explicit or discovered config file.
///
/// Defaults when no file is found.
pub fn read_logging_config(explicit: Option<&Path>) -> Result<LoggingConfig> {
    let path = match explicit.map(Path::to_path_buf).or_else(AdoptionsConfig::discover_config) {
        Some(path) => path,
        None => return Ok(LoggingConfig::default()),
    };

    let config = AdoptionsConfig::from_yaml_file(&path)
        .with_context(|| format!("Failed to read logging settings from {:?}", path))?;
    Ok(config.spec.observability.logging)
}

/// Initialize tracing subscriber for logging
pub fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        "json" => builder.json().init(),
        "text" => builder.compact().init(),
        other => anyhow::bail!("Unknown log format '{}'. Use 'text' or 'json'", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_logging_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adoptions-config.yaml");
        std::fs::write(
            &path,
            r#"
apiVersion: adoptions/v1
kind: AdoptionsConfig
metadata:
  name: logging-test
spec:
  observability:
    logging:
      level: debug
      format: json
"#,
        )
        .unwrap();

        let logging = read_logging_config(Some(path.as_path())).unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_unreadable_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.yaml");
        let err = read_logging_config(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "apiVersion: [unclosed").unwrap();
        assert!(read_logging_config(Some(broken.as_path())).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(init_logging("info", "xml").is_err());
    }
}
