//! Output of an assembly run

use crate::base::BaseSettings;
use crate::error::ConfigResult;
use crate::providers::search::SearchPlugin;
use crate::providers::{self, Capability, Cardinality, ModuleLayout, OptionsMap};
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One resolved `(capability, provider, options)` triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub capability: Capability,
    pub provider_id: String,
    pub resolve: String,
    #[serde(default)]
    pub is_default: bool,
    pub options: OptionsMap,
}

/// Fully assembled configuration for the host platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfiguration {
    pub base: BaseSettings,

    /// Bindings in slot order, then rule priority order
    #[serde(default)]
    pub active_bindings: Vec<Binding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_plugin: Option<SearchPlugin>,
}

impl ResolvedConfiguration {
    /// Bindings registered for one capability
    pub fn bindings_for(&self, capability: Capability) -> impl Iterator<Item = &Binding> {
        self.active_bindings
            .iter()
            .filter(move |binding| binding.capability == capability)
    }

    /// The single binding of a capability, if any
    pub fn binding(&self, capability: Capability) -> Option<&Binding> {
        self.bindings_for(capability).next()
    }

    pub fn is_active(&self, capability: Capability) -> bool {
        self.binding(capability).is_some()
    }

    /// Render the startup document the host platform loads.
    ///
    /// Provider-list modules group their bindings under `options.providers`;
    /// direct modules are registered by the provider's own path.
    pub fn to_host_config(&self) -> Value {
        let mut modules = Vec::new();

        for slot in providers::slots() {
            let bindings: Vec<&Binding> = self.bindings_for(slot.capability).collect();
            if bindings.is_empty() {
                continue;
            }

            match slot.layout {
                ModuleLayout::ProviderList => {
                    let entries: Vec<Value> = bindings.iter().map(|b| provider_entry(b)).collect();
                    modules.push(json!({
                        "resolve": slot.module,
                        "options": { "providers": entries },
                    }));
                }
                ModuleLayout::Direct => {
                    for binding in bindings {
                        modules.push(json!({
                            "resolve": binding.resolve,
                            "options": binding.options,
                        }));
                    }
                }
            }
        }

        let plugins: Vec<Value> = self
            .search_plugin
            .iter()
            .map(SearchPlugin::to_host_entry)
            .collect();

        let mut project_config = json!({
            "databaseUrl": self.base.database_url,
            "databaseDriverOptions": self.base.database_driver_options,
            "http": {
                "storeCors": self.base.store_cors,
                "adminCors": self.base.admin_cors,
                "authCors": self.base.auth_cors,
                "jwtSecret": self.base.jwt_secret,
                "cookieSecret": self.base.cookie_secret,
            },
        });
        if let (Some(redis_url), Some(project)) =
            (&self.base.redis_url, project_config.as_object_mut())
        {
            project.insert("redisUrl".to_string(), Value::String(redis_url.clone()));
        }

        json!({
            "projectConfig": project_config,
            "admin": {
                "backendUrl": self.base.network_url,
                "disable": self.base.admin_disabled,
            },
            "modules": modules,
            "plugins": plugins,
        })
    }
}

fn provider_entry(binding: &Binding) -> Value {
    let mut entry = json!({
        "resolve": binding.resolve,
        "id": binding.provider_id,
        "options": binding.options,
    });
    if binding.is_default {
        if let Some(entry) = entry.as_object_mut() {
            entry.insert("is_default".to_string(), Value::Bool(true));
        }
    }
    entry
}

impl Validatable for ResolvedConfiguration {
    fn validate(&self) -> ConfigResult<()> {
        self.base.validate()?;

        for slot in providers::slots() {
            let count = self.bindings_for(slot.capability).count();
            if slot.cardinality == Cardinality::AtMostOne && count > 1 {
                return Err(self.validation_error(format!(
                    "{} allows one provider but {} are bound",
                    slot.capability, count
                )));
            }
        }

        for binding in &self.active_bindings {
            if providers::find_rule(binding.capability, &binding.provider_id).is_none() {
                return Err(self.validation_error(format!(
                    "unknown provider '{}' for {}",
                    binding.provider_id, binding.capability
                )));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "bindings"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use crate::env_keys::*;
    use crate::snapshot::EnvironmentSnapshot;

    fn full_snapshot() -> EnvironmentSnapshot {
        EnvironmentSnapshot::from_pairs([
            (DATABASE_URL, "postgres://db/shop"),
            (REDIS_URL, "redis://sessions:6379"),
            (CACHE_REDIS_URL, "redis://cache:6379"),
            (EVENTS_REDIS_URL, "redis://events:6379"),
            (WORKFLOW_REDIS_URL, "redis://we:6379"),
            (LOCKING_REDIS_URL, "redis://lock:6379"),
            (SENDGRID_API_KEY, "SG.key"),
            (SENDGRID_FROM, "a@shop.test"),
            (RESEND_API_KEY, "re_key"),
            (RESEND_FROM_EMAIL, "b@shop.test"),
            (MEILISEARCH_HOST, "http://search:7700"),
            (MEILISEARCH_API_KEY, "master"),
        ])
    }

    #[test]
    fn test_host_config_modules() {
        let config = assemble(&full_snapshot()).unwrap();
        let host = config.to_host_config();
        let modules = host["modules"].as_array().unwrap();

        let resolves: Vec<&str> = modules
            .iter()
            .map(|m| m["resolve"].as_str().unwrap())
            .collect();
        assert_eq!(
            resolves,
            vec![
                "@medusajs/medusa/caching",
                "@medusajs/medusa/event-bus-redis",
                "@medusajs/medusa/workflow-engine-redis",
                "@medusajs/medusa/locking",
                "@medusajs/medusa/file",
                "@medusajs/medusa/notification",
            ]
        );

        // Direct module carries options without a providers list
        assert_eq!(modules[1]["options"]["redisUrl"], json!("redis://events:6379"));

        let cache_provider = &modules[0]["options"]["providers"][0];
        assert_eq!(cache_provider["id"], json!("caching-redis"));
        assert_eq!(cache_provider["is_default"], json!(true));

        let storage_provider = &modules[4]["options"]["providers"][0];
        assert_eq!(storage_provider["id"], json!("local"));
        assert!(storage_provider.get("is_default").is_none());

        let notification = modules[5]["options"]["providers"].as_array().unwrap();
        assert_eq!(notification.len(), 2);
    }

    #[test]
    fn test_host_config_project_and_plugins() {
        let config = assemble(&full_snapshot()).unwrap();
        let host = config.to_host_config();

        assert_eq!(host["projectConfig"]["databaseUrl"], json!("postgres://db/shop"));
        assert_eq!(host["projectConfig"]["redisUrl"], json!("redis://sessions:6379"));
        assert_eq!(
            host["projectConfig"]["databaseDriverOptions"]["sslmode"],
            json!("disable")
        );
        assert_eq!(host["admin"]["disable"], json!(false));
        assert_eq!(host["plugins"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_host_config_without_redis_url() {
        let snapshot = EnvironmentSnapshot::from_pairs([(DATABASE_URL, "postgres://db/shop")]);
        let host = assemble(&snapshot).unwrap().to_host_config();
        assert!(host["projectConfig"].get("redisUrl").is_none());
        assert!(host["plugins"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_validate_rejects_double_storage() {
        let mut config = assemble(&full_snapshot()).unwrap();
        assert!(config.validate().is_ok());

        let duplicate = config.binding(Capability::Storage).unwrap().clone();
        config.active_bindings.push(duplicate);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_two_notifications() {
        let config = assemble(&full_snapshot()).unwrap();
        assert_eq!(config.bindings_for(Capability::Notification).count(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = assemble(&full_snapshot()).unwrap();
        config.active_bindings.push(Binding {
            capability: Capability::Payment,
            provider_id: "paypal".to_string(),
            resolve: "./paypal".to_string(),
            is_default: false,
            options: OptionsMap::new(),
        });
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("paypal"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = assemble(&full_snapshot()).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"activeBindings\""));
        assert!(json.contains("\"providerId\":\"caching-redis\""));
        let parsed: ResolvedConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
