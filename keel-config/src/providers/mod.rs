//! Declarative provider table
//!
//! Every optional integration the host platform understands is described here
//! as data: a [`CapabilitySlot`] per integration point, each holding its
//! [`ProviderRule`]s in priority order. The assembler walks this table with a
//! single generic loop, so precedence is read straight off the declarations.

pub mod cache;
pub mod event_bus;
pub mod locking;
pub mod notification;
pub mod payment;
pub mod search;
pub mod storage;
pub mod utils;
pub mod workflow;

use crate::snapshot::EnvironmentSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options payload handed to a provider
pub type OptionsMap = serde_json::Map<String, serde_json::Value>;

/// Integration points of the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Cache,
    EventBus,
    WorkflowEngine,
    Locking,
    Storage,
    Notification,
    Payment,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Cache => "cache",
            Capability::EventBus => "eventBus",
            Capability::WorkflowEngine => "workflowEngine",
            Capability::Locking => "locking",
            Capability::Storage => "storage",
            Capability::Notification => "notification",
            Capability::Payment => "payment",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many providers a slot may bind at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
    /// First active rule wins, the rest are not evaluated
    AtMostOne,
    /// Every active rule binds independently
    AtMostN,
}

/// How the host expects a module's providers to be laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleLayout {
    /// `{ resolve: module, options: { providers: [...] } }`
    ProviderList,
    /// `{ resolve: provider, options }`
    Direct,
}

/// When a provider rule is eligible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Eligible only when every listed input is provided
    RequiresAll(&'static [&'static str]),
    /// Always eligible; only reached when nothing above it in the slot matched
    Fallback,
}

impl Activation {
    pub fn is_satisfied(&self, snapshot: &EnvironmentSnapshot) -> bool {
        match self {
            Activation::RequiresAll(names) => snapshot.has_all(names),
            Activation::Fallback => true,
        }
    }

    /// Inputs this activation depends on
    pub fn required_inputs(&self) -> &'static [&'static str] {
        match self {
            Activation::RequiresAll(names) => *names,
            Activation::Fallback => &[],
        }
    }
}

/// One candidate provider for one capability
#[derive(Debug, Clone, Copy)]
pub struct ProviderRule {
    pub capability: Capability,
    pub provider_id: &'static str,
    /// Module path the host loads for this provider
    pub resolve: &'static str,
    pub activation: Activation,
    pub build_options: fn(&EnvironmentSnapshot) -> OptionsMap,
    pub is_default: bool,
}

impl ProviderRule {
    pub fn is_active(&self, snapshot: &EnvironmentSnapshot) -> bool {
        self.activation.is_satisfied(snapshot)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.activation, Activation::Fallback)
    }

    /// Materialize the options payload for this provider
    pub fn options(&self, snapshot: &EnvironmentSnapshot) -> OptionsMap {
        (self.build_options)(snapshot)
    }
}

/// A named integration point with its providers in priority order
#[derive(Debug, Clone, Copy)]
pub struct CapabilitySlot {
    pub capability: Capability,
    pub cardinality: Cardinality,
    /// Module path the host loads for provider-list modules
    pub module: &'static str,
    pub layout: ModuleLayout,
    pub rules: &'static [ProviderRule],
}

impl CapabilitySlot {
    pub fn fallback(&self) -> Option<&'static ProviderRule> {
        self.rules.iter().find(|rule| rule.is_fallback())
    }
}

/// All capability slots in evaluation order
pub static CAPABILITY_SLOTS: [CapabilitySlot; 7] = [
    cache::SLOT,
    event_bus::SLOT,
    workflow::SLOT,
    locking::SLOT,
    storage::SLOT,
    notification::SLOT,
    payment::SLOT,
];

pub fn slots() -> &'static [CapabilitySlot] {
    &CAPABILITY_SLOTS
}

pub fn slot(capability: Capability) -> Option<&'static CapabilitySlot> {
    CAPABILITY_SLOTS
        .iter()
        .find(|slot| slot.capability == capability)
}

pub fn find_rule(capability: Capability, provider_id: &str) -> Option<&'static ProviderRule> {
    slot(capability)?
        .rules
        .iter()
        .find(|rule| rule.provider_id == provider_id)
}
