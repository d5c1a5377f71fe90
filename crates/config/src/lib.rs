use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "corkboard.toml",
    "config/corkboard.toml",
    "crates/config/corkboard.toml",
    "../corkboard.toml",
    "../config/corkboard.toml",
    "../crates/config/corkboard.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub mentions: MentionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://corkboard.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Configuration for mention resolution and attachment signing.
///
/// ```
/// use corkboard_config::MentionsConfig;
///
/// let mentions = MentionsConfig::default();
/// assert_eq!(mentions.sgid_issuer, "corkboard");
/// assert!(!mentions.signing_secret.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionsConfig {
    /// Secret used to sign attachment reference identifiers.
    #[serde(default = "MentionsConfig::default_signing_secret")]
    pub signing_secret: String,
    /// Issuer recorded in signed identifiers.
    #[serde(default = "MentionsConfig::default_sgid_issuer")]
    pub sgid_issuer: String,
    /// Maximum number of results returned by the live search endpoint.
    #[serde(default = "MentionsConfig::default_search_limit")]
    pub search_limit: u32,
}

impl MentionsConfig {
    fn default_signing_secret() -> String {
        "default_secret_change_in_production".to_string()
    }

    fn default_sgid_issuer() -> String {
        "corkboard".to_string()
    }

    const fn default_search_limit() -> u32 {
        25
    }
}

impl Default for MentionsConfig {
    fn default() -> Self {
        Self {
            signing_secret: Self::default_signing_secret(),
            sgid_issuer: Self::default_sgid_issuer(),
            search_limit: Self::default_search_limit(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use corkboard_config::load;
///
/// std::env::remove_var("CORKBOARD_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default(
            "mentions.signing_secret",
            defaults.mentions.signing_secret.clone(),
        )
        .unwrap()
        .set_default("mentions.sgid_issuer", defaults.mentions.sgid_issuer.clone())
        .unwrap()
        .set_default(
            "mentions.search_limit",
            i64::from(defaults.mentions.search_limit),
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("CORKBOARD").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("CORKBOARD_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via CORKBOARD_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
