//! Always-present base settings

use crate::env_keys::{
    ADMIN_CORS, AUTH_CORS, BACKEND_URL, COOKIE_SECRET, DATABASE_URL, DISABLE_ADMIN, JWT_SECRET,
    REDIS_URL, STORE_CORS,
};
use crate::error::{ConfigError, ConfigResult};
use crate::providers::utils::string_or;
use crate::snapshot::EnvironmentSnapshot;
use crate::validation::{validate_cors_list, validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};

/// Public URL of the backend when `BACKEND_URL` is not provided
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:9000";

/// Placeholder used for both secrets when they are not provided.
/// Insecure; only suitable for local development.
pub const INSECURE_DEFAULT_SECRET: &str = "supersecret";

/// Value of `MEDUSA_DISABLE_ADMIN` that turns the admin dashboard off
pub const DISABLE_ADMIN_TOKEN: &str = "true";

/// Settings handed to the host regardless of which integrations are active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseSettings {
    /// Database connection string
    pub database_url: String,

    /// Driver options passed alongside the database URL
    #[serde(default)]
    pub database_driver_options: DatabaseDriverOptions,

    /// Shared Redis connection (sessions), when provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis_url: Option<String>,

    /// Public URL of the backend
    pub network_url: String,

    pub store_cors: String,
    pub admin_cors: String,
    pub auth_cors: String,

    pub jwt_secret: String,
    pub cookie_secret: String,

    /// Whether the admin dashboard is turned off
    pub admin_disabled: bool,
}

/// Database driver options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDriverOptions {
    pub ssl: bool,
    pub sslmode: String,
}

impl Default for DatabaseDriverOptions {
    fn default() -> Self {
        Self {
            ssl: false,
            sslmode: "disable".to_string(),
        }
    }
}

impl BaseSettings {
    /// Populate base settings from a snapshot.
    ///
    /// Fails only when the database location is absent; every other field
    /// has a literal default.
    pub fn from_snapshot(snapshot: &EnvironmentSnapshot) -> ConfigResult<Self> {
        let database_url = snapshot
            .get(DATABASE_URL)
            .ok_or_else(|| ConfigError::MissingRequiredInput {
                name: DATABASE_URL.to_string(),
            })?
            .to_string();

        let network_url = network_url(snapshot);

        Ok(Self {
            database_url,
            database_driver_options: DatabaseDriverOptions::default(),
            redis_url: snapshot.get(REDIS_URL).map(str::to_string),
            store_cors: string_or(snapshot.get(STORE_CORS), &network_url),
            admin_cors: string_or(snapshot.get(ADMIN_CORS), &network_url),
            auth_cors: string_or(snapshot.get(AUTH_CORS), &network_url),
            jwt_secret: string_or(snapshot.get(JWT_SECRET), INSECURE_DEFAULT_SECRET),
            cookie_secret: string_or(snapshot.get(COOKIE_SECRET), INSECURE_DEFAULT_SECRET),
            admin_disabled: snapshot.get(DISABLE_ADMIN) == Some(DISABLE_ADMIN_TOKEN),
            network_url,
        })
    }

    /// Whether either secret is still the insecure placeholder
    pub fn uses_default_secrets(&self) -> bool {
        self.jwt_secret == INSECURE_DEFAULT_SECRET || self.cookie_secret == INSECURE_DEFAULT_SECRET
    }
}

/// Resolved public URL of the backend
pub fn network_url(snapshot: &EnvironmentSnapshot) -> String {
    string_or(snapshot.get(BACKEND_URL), DEFAULT_BACKEND_URL)
}

impl Validatable for BaseSettings {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.database_url, "database_url", self.domain_name())?;
        validate_url(&self.network_url, "network_url", self.domain_name())?;
        validate_cors_list(&self.store_cors, "store_cors", self.domain_name())?;
        validate_cors_list(&self.admin_cors, "admin_cors", self.domain_name())?;
        validate_cors_list(&self.auth_cors, "auth_cors", self.domain_name())?;
        validate_required_string(&self.jwt_secret, "jwt_secret", self.domain_name())?;
        validate_required_string(&self.cookie_secret, "cookie_secret", self.domain_name())?;

        if let Some(redis_url) = &self.redis_url {
            validate_url(redis_url, "redis_url", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "base"
    }
}
