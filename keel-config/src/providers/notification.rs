//! Email notification providers
//!
//! Each provider feeds its own channel, so both may be bound at the same time.

use super::utils::{into_options, required};
use super::{
    Activation, Capability, CapabilitySlot, Cardinality, ModuleLayout, OptionsMap, ProviderRule,
};
use crate::env_keys::{RESEND_API_KEY, RESEND_FROM_EMAIL, SENDGRID_API_KEY, SENDGRID_FROM};
use crate::snapshot::EnvironmentSnapshot;
use serde_json::json;

pub const SENDGRID: ProviderRule = ProviderRule {
    capability: Capability::Notification,
    provider_id: "sendgrid",
    resolve: "@medusajs/medusa/notification-sendgrid",
    activation: Activation::RequiresAll(&[SENDGRID_API_KEY, SENDGRID_FROM]),
    build_options: sendgrid_options,
    is_default: false,
};

pub const RESEND: ProviderRule = ProviderRule {
    capability: Capability::Notification,
    provider_id: "resend",
    resolve: "./src/modules/email-notifications",
    activation: Activation::RequiresAll(&[RESEND_API_KEY, RESEND_FROM_EMAIL]),
    build_options: resend_options,
    is_default: false,
};

pub const SLOT: CapabilitySlot = CapabilitySlot {
    capability: Capability::Notification,
    cardinality: Cardinality::AtMostN,
    module: "@medusajs/medusa/notification",
    layout: ModuleLayout::ProviderList,
    rules: &[SENDGRID, RESEND],
};

fn sendgrid_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    email_options(snapshot, SENDGRID_API_KEY, SENDGRID_FROM)
}

fn resend_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    email_options(snapshot, RESEND_API_KEY, RESEND_FROM_EMAIL)
}

fn email_options(snapshot: &EnvironmentSnapshot, api_key: &str, from: &str) -> OptionsMap {
    into_options(json!({
        "channels": ["email"],
        "api_key": required(snapshot, api_key),
        "from": required(snapshot, from),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_resend_options() {
        let snapshot = EnvironmentSnapshot::from_pairs([
            (RESEND_API_KEY, "re_123"),
            (RESEND_FROM_EMAIL, "shop@example.com"),
        ]);
        assert!(RESEND.is_active(&snapshot));
        assert!(!SENDGRID.is_active(&snapshot));
        assert_eq!(
            Value::Object(RESEND.options(&snapshot)),
            json!({
                "channels": ["email"],
                "api_key": "re_123",
                "from": "shop@example.com",
            })
        );
    }

    #[test]
    fn test_from_address_required() {
        let snapshot = EnvironmentSnapshot::from_pairs([(SENDGRID_API_KEY, "SG.key")]);
        assert!(!SENDGRID.is_active(&snapshot));
    }
}
