//! Locking module backed by Redis

use super::utils::redis_url_options;
use super::{
    Activation, Capability, CapabilitySlot, Cardinality, ModuleLayout, OptionsMap, ProviderRule,
};
use crate::env_keys::LOCKING_REDIS_URL;
use crate::snapshot::EnvironmentSnapshot;

pub const REDIS: ProviderRule = ProviderRule {
    capability: Capability::Locking,
    provider_id: "locking-redis",
    resolve: "@medusajs/medusa/locking-redis",
    activation: Activation::RequiresAll(&[LOCKING_REDIS_URL]),
    build_options: redis_options,
    is_default: true,
};

pub const SLOT: CapabilitySlot = CapabilitySlot {
    capability: Capability::Locking,
    cardinality: Cardinality::AtMostOne,
    module: "@medusajs/medusa/locking",
    layout: ModuleLayout::ProviderList,
    rules: &[REDIS],
};

fn redis_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    redis_url_options(snapshot, LOCKING_REDIS_URL)
}
