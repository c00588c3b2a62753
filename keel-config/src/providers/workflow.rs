//! Workflow engine module backed by Redis

use super::utils::{into_options, required};
use super::{
    Activation, Capability, CapabilitySlot, Cardinality, ModuleLayout, OptionsMap, ProviderRule,
};
use crate::env_keys::WORKFLOW_REDIS_URL;
use crate::snapshot::EnvironmentSnapshot;
use serde_json::json;

pub const REDIS: ProviderRule = ProviderRule {
    capability: Capability::WorkflowEngine,
    provider_id: "workflow-engine-redis",
    resolve: "@medusajs/medusa/workflow-engine-redis",
    activation: Activation::RequiresAll(&[WORKFLOW_REDIS_URL]),
    build_options: redis_options,
    is_default: false,
};

pub const SLOT: CapabilitySlot = CapabilitySlot {
    capability: Capability::WorkflowEngine,
    cardinality: Cardinality::AtMostOne,
    module: "@medusajs/medusa/workflow-engine-redis",
    layout: ModuleLayout::Direct,
    rules: &[REDIS],
};

// The workflow engine nests its connection under `redis.url`
fn redis_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    into_options(json!({
        "redis": { "url": required(snapshot, WORKFLOW_REDIS_URL) }
    }))
}
