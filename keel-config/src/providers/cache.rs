//! Cache module backed by Redis

use super::utils::redis_url_options;
use super::{
    Activation, Capability, CapabilitySlot, Cardinality, ModuleLayout, OptionsMap, ProviderRule,
};
use crate::env_keys::CACHE_REDIS_URL;
use crate::snapshot::EnvironmentSnapshot;

pub const REDIS: ProviderRule = ProviderRule {
    capability: Capability::Cache,
    provider_id: "caching-redis",
    resolve: "@medusajs/caching-redis",
    activation: Activation::RequiresAll(&[CACHE_REDIS_URL]),
    build_options: redis_options,
    is_default: true,
};

pub const SLOT: CapabilitySlot = CapabilitySlot {
    capability: Capability::Cache,
    cardinality: Cardinality::AtMostOne,
    module: "@medusajs/medusa/caching",
    layout: ModuleLayout::ProviderList,
    rules: &[REDIS],
};

fn redis_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    redis_url_options(snapshot, CACHE_REDIS_URL)
}
