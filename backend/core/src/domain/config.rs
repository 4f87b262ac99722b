// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration Types
//
// Defines the configuration manifest for the adoptions backend:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - HTTP listener settings
// - Storage backend selection (in-memory or PostgreSQL)
// - Shelter validation rules (accepted locations, content rules)
// - Users, password hashes and roles for HTTP Basic authentication
// - Logging and metrics settings

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::repository::{PostgresConfig, StorageBackend};
use crate::domain::security::Role;
use crate::domain::validation::{LocationPolicy, ShelterValidator};

pub const API_VERSION: &str = "adoptions/v1";
pub const KIND: &str = "AdoptionsConfig";

/// Top-level configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionsConfig {
    /// API version (must be "adoptions/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "AdoptionsConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    #[serde(default)]
    pub spec: AdoptionsConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Deployment name, used in logs
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdoptionsConfigSpec {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_api_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageKind {
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_kind")]
    pub backend: StorageKind,

    /// PostgreSQL connection string (required for the postgres backend)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Shelter locations must contain one of these (case-insensitive)
    #[serde(default = "default_accepted_locations")]
    pub accepted_locations: Vec<String>,

    /// Enforce shelter content rules (at least one dog, no underscore in name)
    #[serde(default)]
    pub enforce_content_rules: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Realm advertised in `WWW-Authenticate` challenges
    #[serde(default = "default_realm")]
    pub realm: String,

    #[serde(default)]
    pub users: Vec<UserConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub username: String,

    /// Hex-encoded SHA-256 digest of the password (see `adoptions hash-password`)
    pub password_hash: String,

    #[serde(default = "default_roles")]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("json" or "text")
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus exposition
    #[serde(default)]
    pub enabled: bool,

    /// Metrics listener port
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_storage_kind() -> StorageKind {
    StorageKind::InMemory
}

fn default_max_connections() -> u32 {
    5
}

fn default_accepted_locations() -> Vec<String> {
    vec!["Brasov".to_string(), "Iasi".to_string()]
}

fn default_realm() -> String {
    "adoptions".to_string()
}

fn default_roles() -> Vec<Role> {
    vec![Role::User]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_metrics_port() -> u16 {
    9090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_api_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageKind::InMemory,
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            accepted_locations: default_accepted_locations(),
            enforce_content_rules: false,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            realm: default_realm(),
            users: vec![],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

impl Default for AdoptionsConfig {
    fn default() -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "adoptions".to_string());

        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: hostname,
                version: Some("1.0.0".to_string()),
            },
            spec: AdoptionsConfigSpec::default(),
        }
    }
}

impl StorageConfig {
    pub fn to_backend(&self) -> anyhow::Result<StorageBackend> {
        match self.backend {
            StorageKind::InMemory => Ok(StorageBackend::InMemory),
            StorageKind::Postgres => {
                let url = self
                    .url
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("storage.url is required for the postgres backend"))?;
                Ok(StorageBackend::PostgreSQL(PostgresConfig {
                    connection_string: url,
                    max_connections: self.max_connections,
                }))
            }
        }
    }
}

impl ValidationConfig {
    pub fn to_validator(&self) -> ShelterValidator {
        ShelterValidator::new(
            LocationPolicy::new(self.accepted_locations.clone()),
            self.enforce_content_rules,
        )
    }
}

impl AdoptionsConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. ADOPTIONS_CONFIG_PATH environment variable
    /// 2. ./adoptions-config.yaml (working directory)
    /// 3. ~/.adoptions/config.yaml (user home)
    /// 4. /etc/adoptions/config.yaml (Unix)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ADOPTIONS_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./adoptions-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".adoptions").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        {
            let system_config = PathBuf::from("/etc/adoptions/config.yaml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ADOPTIONS_DATABASE_URL") {
            tracing::info!("Environment override: ADOPTIONS_DATABASE_URL (postgres backend)");
            self.spec.storage.backend = StorageKind::Postgres;
            self.spec.storage.url = Some(url);
        }

        if let Ok(val) = std::env::var("ADOPTIONS_PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: ADOPTIONS_PORT={}", port);
                    self.spec.server.port = port;
                }
                Err(_) => {
                    tracing::warn!("Invalid value for ADOPTIONS_PORT: '{}'. Ignoring.", val);
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let spec = &self.spec;

        if spec.validation.accepted_locations.is_empty() {
            anyhow::bail!("validation.accepted_locations must list at least one location");
        }
        if spec.validation.accepted_locations.iter().any(|l| l.trim().is_empty()) {
            anyhow::bail!("validation.accepted_locations cannot contain blank entries");
        }

        if spec.storage.backend == StorageKind::Postgres {
            match &spec.storage.url {
                Some(url) if !url.is_empty() => {}
                _ => anyhow::bail!("storage.url is required for the postgres backend"),
            }
        }
        if spec.storage.max_connections == 0 {
            anyhow::bail!("storage.max_connections must be greater than zero");
        }

        let mut seen = HashSet::new();
        for user in &spec.security.users {
            if user.username.is_empty() {
                anyhow::bail!("security.users: username cannot be empty");
            }
            if user.username.contains(':') {
                anyhow::bail!("security.users: username '{}' cannot contain ':'", user.username);
            }
            if !seen.insert(user.username.as_str()) {
                anyhow::bail!("security.users: duplicate username '{}'", user.username);
            }
            if user.roles.is_empty() {
                anyhow::bail!("security.users: user '{}' must have at least one role", user.username);
            }
            let is_sha256_hex = user.password_hash.len() == 64
                && user.password_hash.chars().all(|c| c.is_ascii_hexdigit());
            if !is_sha256_hex {
                anyhow::bail!(
                    "security.users: password_hash for '{}' must be a hex SHA-256 digest",
                    user.username
                );
            }
        }

        match spec.observability.logging.format.as_str() {
            "text" | "json" => {}
            other => anyhow::bail!("Invalid logging format: '{}'. Expected 'text' or 'json'", other),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD_HASH: &str = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

    #[test]
    fn test_default_config() {
        let config = AdoptionsConfig::default();
        assert_eq!(config.api_version, API_VERSION);
        assert_eq!(config.kind, KIND);
        assert!(!config.metadata.name.is_empty());
        assert_eq!(config.spec.storage.backend, StorageKind::InMemory);
        assert_eq!(config.spec.validation.accepted_locations, vec!["Brasov", "Iasi"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
apiVersion: adoptions/v1
kind: AdoptionsConfig
metadata:
  name: test-node
spec:
  server:
    port: 9000
  security:
    users:
      - username: user
        password_hash: 5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8
"#;
        let config = AdoptionsConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.spec.server.port, 9000);
        assert_eq!(config.spec.server.bind_address, "0.0.0.0");
        assert_eq!(config.spec.security.users[0].roles, vec![Role::User]);
        assert_eq!(config.spec.security.realm, "adoptions");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adoptions-config.yaml");

        let mut config = AdoptionsConfig::default();
        config.metadata.name = "roundtrip".to_string();
        config.spec.storage = StorageConfig {
            backend: StorageKind::Postgres,
            url: Some("postgres://localhost/adoptions".to_string()),
            max_connections: 10,
        };
        config.to_yaml_file(&path).unwrap();

        let parsed = AdoptionsConfig::from_yaml_file(&path).unwrap();
        assert_eq!(parsed.metadata.name, "roundtrip");
        assert_eq!(parsed.spec.storage.backend, StorageKind::Postgres);
        assert_eq!(parsed.spec.storage.max_connections, 10);
        assert!(matches!(
            parsed.spec.storage.to_backend().unwrap(),
            StorageBackend::PostgreSQL(PostgresConfig { max_connections: 10, .. })
        ));
    }

    #[test]
    fn test_validation() {
        let mut config = AdoptionsConfig::default();

        config.api_version = "wrong/v1".to_string();
        assert!(config.validate().is_err());
        config.api_version = API_VERSION.to_string();

        config.spec.validation.accepted_locations.clear();
        assert!(config.validate().is_err());
        config.spec.validation.accepted_locations = vec!["Brasov".to_string()];

        config.spec.storage.backend = StorageKind::Postgres;
        assert!(config.validate().is_err());
        assert!(config.spec.storage.to_backend().is_err());
        config.spec.storage.backend = StorageKind::InMemory;

        config.spec.security.users.push(UserConfig {
            username: "user".to_string(),
            password_hash: "not-a-hash".to_string(),
            roles: vec![Role::User],
        });
        assert!(config.validate().is_err());
        config.spec.security.users[0].password_hash = PASSWORD_HASH.to_string();
        assert!(config.validate().is_ok());

        config.spec.security.users.push(config.spec.security.users[0].clone());
        assert!(config.validate().is_err());
        config.spec.security.users.pop();

        config.spec.observability.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validator_uses_configured_locations() {
        let config = ValidationConfig {
            accepted_locations: vec!["Cluj".to_string()],
            enforce_content_rules: false,
        };
        let validator = config.to_validator();
        assert!(validator.location_policy().check("Cluj-Napoca").is_ok());
        assert!(validator.location_policy().check("Brasov").is_err());
    }
}
