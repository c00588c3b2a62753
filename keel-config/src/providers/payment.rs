//! Payment module backed by Stripe

use super::utils::{into_options, required};
use super::{
    Activation, Capability, CapabilitySlot, Cardinality, ModuleLayout, OptionsMap, ProviderRule,
};
use crate::env_keys::{STRIPE_API_KEY, STRIPE_WEBHOOK_SECRET};
use crate::snapshot::EnvironmentSnapshot;
use serde_json::json;

pub const STRIPE: ProviderRule = ProviderRule {
    capability: Capability::Payment,
    provider_id: "stripe",
    resolve: "@medusajs/medusa/payment-stripe",
    activation: Activation::RequiresAll(&[STRIPE_API_KEY, STRIPE_WEBHOOK_SECRET]),
    build_options: stripe_options,
    is_default: false,
};

pub const SLOT: CapabilitySlot = CapabilitySlot {
    capability: Capability::Payment,
    cardinality: Cardinality::AtMostOne,
    module: "@medusajs/medusa/payment",
    layout: ModuleLayout::ProviderList,
    rules: &[STRIPE],
};

fn stripe_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    into_options(json!({
        "apiKey": required(snapshot, STRIPE_API_KEY),
        "webhookSecret": required(snapshot, STRIPE_WEBHOOK_SECRET),
    }))
}
