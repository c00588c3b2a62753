//! Event bus module backed by Redis

use super::utils::redis_url_options;
use super::{
    Activation, Capability, CapabilitySlot, Cardinality, ModuleLayout, OptionsMap, ProviderRule,
};
use crate::env_keys::EVENTS_REDIS_URL;
use crate::snapshot::EnvironmentSnapshot;

pub const REDIS: ProviderRule = ProviderRule {
    capability: Capability::EventBus,
    provider_id: "event-bus-redis",
    resolve: "@medusajs/medusa/event-bus-redis",
    activation: Activation::RequiresAll(&[EVENTS_REDIS_URL]),
    build_options: redis_options,
    is_default: false,
};

pub const SLOT: CapabilitySlot = CapabilitySlot {
    capability: Capability::EventBus,
    cardinality: Cardinality::AtMostOne,
    module: "@medusajs/medusa/event-bus-redis",
    layout: ModuleLayout::Direct,
    rules: &[REDIS],
};

fn redis_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    redis_url_options(snapshot, EVENTS_REDIS_URL)
}
