//! Meilisearch plugin
//!
//! Search is registered as a host plugin rather than a module, so it sits
//! outside the capability slots and is resolved on its own.

use super::Activation;
use crate::env_keys::{MEILISEARCH_API_KEY, MEILISEARCH_HOST};
use crate::snapshot::EnvironmentSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const PLUGIN_ID: &str = "meilisearch";
pub const RESOLVE: &str = "@rokmohar/medusa-plugin-meilisearch";
pub const ACTIVATION: Activation =
    Activation::RequiresAll(&[MEILISEARCH_HOST, MEILISEARCH_API_KEY]);

/// Resolved search plugin registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlugin {
    pub resolve: String,
    pub host: String,
    pub api_key: String,
    /// Index definitions keyed by index name
    pub settings: Value,
    pub i18n: Value,
}

impl SearchPlugin {
    /// Plugin entry in the shape the host's plugin loader expects
    pub fn to_host_entry(&self) -> Value {
        json!({
            "resolve": self.resolve,
            "options": {
                "config": {
                    "host": self.host,
                    "apiKey": self.api_key,
                },
                "settings": self.settings,
                "i18n": self.i18n,
            }
        })
    }
}

/// Build the plugin registration when both host and key are provided
pub fn resolve(snapshot: &EnvironmentSnapshot) -> Option<SearchPlugin> {
    if !ACTIVATION.is_satisfied(snapshot) {
        return None;
    }

    Some(SearchPlugin {
        resolve: RESOLVE.to_string(),
        host: snapshot.get(MEILISEARCH_HOST)?.to_string(),
        api_key: snapshot.get(MEILISEARCH_API_KEY)?.to_string(),
        settings: index_settings(),
        i18n: i18n_settings(),
    })
}

fn index_settings() -> Value {
    json!({
        "products": {
            "type": "products",
            "enabled": true,
            "fields": ["id", "title", "description", "handle", "variant_sku", "thumbnail"],
            "indexSettings": {
                "searchableAttributes": ["title", "description", "variant_sku"],
                "displayedAttributes": ["id", "handle", "title", "description", "variant_sku", "thumbnail"],
                "filterableAttributes": ["id", "handle"],
            },
            "primaryKey": "id",
        },
        "categories": {
            "type": "categories",
            "enabled": true,
            "fields": ["id", "name", "description", "handle", "is_active", "parent_id"],
            "indexSettings": {
                "searchableAttributes": ["name", "description"],
                "displayedAttributes": ["id", "name", "description", "handle", "is_active", "parent_id"],
                "filterableAttributes": ["id", "handle", "is_active", "parent_id"],
            },
            "primaryKey": "id",
        },
    })
}

fn i18n_settings() -> Value {
    json!({
        "strategy": "field-suffix",
        "languages": ["en", "fr", "de"],
        "defaultLanguage": "en",
        "translatableFields": ["title", "description"],
    })
}
