//! Configuration module for the catalog admin

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File, Map};
use std::path::{Path, PathBuf};

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub seed: SeedSettings,
    pub web: WebSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// PostgreSQL connection settings
///
/// When `url` is set it wins over the discrete fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: Option<usize>,
}

/// How image references are persisted and turned into browser URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlPolicy {
    /// Persist a stable public URL
    Public,
    /// Persist the object key, sign a fresh GET URL on every read
    Presigned,
}

/// S3 bucket configuration for product images
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub region: String,
    pub bucket: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...)
    pub endpoint: Option<String>,
    /// Overrides the virtual-hosted AWS URL for public links
    pub public_base_url: Option<String>,
    pub url_policy: UrlPolicy,
    pub presign_ttl_secs: u64,
    pub key_prefix: String,
}

/// First-run demo data
#[derive(Debug, Clone, Deserialize)]
pub struct SeedSettings {
    pub enabled: bool,
    pub assets_dir: PathBuf,
}

/// Static assets and upload limits
#[derive(Debug, Clone, Deserialize)]
pub struct WebSettings {
    pub static_dir: PathBuf,
    pub upload_limit_bytes: usize,
}

/// Flat environment names used by existing deployments, mapped onto settings keys
const LEGACY_ENV: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("AWS_REGION", "storage.region"),
    ("S3_BUCKET_NAME", "storage.bucket"),
    ("AWS_ACCESS_KEY_ID", "storage.access_key_id"),
    ("AWS_SECRET_ACCESS_KEY", "storage.secret_access_key"),
    ("AWS_SESSION_TOKEN", "storage.session_token"),
];

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Flat deployment variables (PORT, DB_HOST, S3_BUCKET_NAME, ...)
    /// 2. Environment variables (prefixed with CATALOG_, e.g. CATALOG_SERVER__PORT)
    /// 3. config/local.toml (gitignored)
    /// 4. config/default.toml
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        Self::load_from(&config_dir, None)
    }

    /// Load with an explicit config directory and, optionally, an environment
    /// snapshot used instead of the process environment.
    pub fn load_from(
        config_dir: &Path,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| match env {
            Some(ref vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        };

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432_i64)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "catalog")?
            .set_default("database.max_connections", 16_i64)?
            .set_default("storage.region", "us-east-1")?
            .set_default("storage.bucket", "")?
            .set_default("storage.url_policy", "public")?
            .set_default("storage.presign_ttl_secs", 3600_i64)?
            .set_default("storage.key_prefix", "products")?
            .set_default("seed.enabled", true)?
            .set_default("seed.assets_dir", "public/dummy")?
            .set_default("web.static_dir", "public")?
            .set_default("web.upload_limit_bytes", 10_i64 * 1024 * 1024)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("CATALOG")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env.clone()),
            );

        // Blank entries (`AWS_SESSION_TOKEN=` in a .env file) count as unset
        for (name, key) in LEGACY_ENV {
            let value = lookup(*name).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Settings {
        let env = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::load_from(Path::new("does-not-exist"), Some(env)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = load(&[]);
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.bind_addr(), "0.0.0.0:3000");
        assert_eq!(settings.database.port, 5432);
        assert!(settings.database.url.is_none());
        assert_eq!(settings.storage.url_policy, UrlPolicy::Public);
        assert_eq!(settings.storage.presign_ttl_secs, 3600);
        assert_eq!(settings.storage.key_prefix, "products");
        assert!(settings.storage.access_key_id.is_none());
        assert!(settings.seed.enabled);
        assert_eq!(settings.seed.assets_dir, PathBuf::from("public/dummy"));
    }

    #[test]
    fn test_flat_deployment_variables() {
        let settings = load(&[
            ("PORT", "8080"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "admin"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "shop"),
            ("AWS_REGION", "ap-southeast-1"),
            ("S3_BUCKET_NAME", "shop-images"),
            ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "shh"),
            ("AWS_SESSION_TOKEN", "token"),
        ]);

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.database.port, 6543);
        assert_eq!(settings.database.user, "admin");
        assert_eq!(settings.database.password, "secret");
        assert_eq!(settings.database.name, "shop");
        assert_eq!(settings.storage.region, "ap-southeast-1");
        assert_eq!(settings.storage.bucket, "shop-images");
        assert_eq!(settings.storage.access_key_id.as_deref(), Some("AKIAEXAMPLE"));
        assert_eq!(settings.storage.session_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_prefixed_variables() {
        let settings = load(&[
            ("CATALOG_STORAGE__URL_POLICY", "presigned"),
            ("CATALOG_STORAGE__PRESIGN_TTL_SECS", "600"),
            ("CATALOG_SEED__ENABLED", "false"),
        ]);

        assert_eq!(settings.storage.url_policy, UrlPolicy::Presigned);
        assert_eq!(settings.storage.presign_ttl_secs, 600);
        assert!(!settings.seed.enabled);
    }

    #[test]
    fn test_blank_flat_variables_are_unset() {
        let settings = load(&[
            ("S3_BUCKET_NAME", "shop-images"),
            ("AWS_ACCESS_KEY_ID", ""),
            ("AWS_SECRET_ACCESS_KEY", "  "),
            ("AWS_SESSION_TOKEN", ""),
            ("PORT", ""),
        ]);

        assert!(settings.storage.access_key_id.is_none());
        assert!(settings.storage.secret_access_key.is_none());
        assert!(settings.storage.session_token.is_none());
        assert_eq!(settings.storage.bucket, "shop-images");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_flat_variables_win_over_prefixed() {
        let settings = load(&[("CATALOG_SERVER__PORT", "9000"), ("PORT", "9100")]);
        assert_eq!(settings.server.port, 9100);
    }
}
