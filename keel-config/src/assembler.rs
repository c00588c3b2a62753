//! Composition of the provider table against a snapshot

use crate::base::BaseSettings;
use crate::error::ConfigResult;
use crate::providers::{self, search, CapabilitySlot, Cardinality, ProviderRule};
use crate::resolved::{Binding, ResolvedConfiguration};
use crate::snapshot::EnvironmentSnapshot;

/// Evaluates capability slots against a snapshot
#[derive(Debug, Clone, Copy)]
pub struct ConfigAssembler {
    slots: &'static [CapabilitySlot],
}

impl ConfigAssembler {
    /// Assembler over the built-in provider table
    pub fn new() -> Self {
        Self {
            slots: providers::slots(),
        }
    }

    /// Assembler over a custom slot table
    pub fn with_slots(slots: &'static [CapabilitySlot]) -> Self {
        Self { slots }
    }

    /// Assemble the configuration for one snapshot.
    ///
    /// Deterministic and free of side effects apart from debug logging. The
    /// only error is a missing base input without a default; incomplete
    /// provider inputs leave that provider inactive.
    pub fn assemble(&self, snapshot: &EnvironmentSnapshot) -> ConfigResult<ResolvedConfiguration> {
        let base = BaseSettings::from_snapshot(snapshot)?;

        let mut active_bindings = Vec::new();
        for slot in self.slots {
            for rule in resolve_slot(slot, snapshot) {
                log::debug!(
                    "Binding {} to provider '{}'",
                    slot.capability,
                    rule.provider_id
                );
                active_bindings.push(Binding {
                    capability: rule.capability,
                    provider_id: rule.provider_id.to_string(),
                    resolve: rule.resolve.to_string(),
                    is_default: rule.is_default,
                    options: rule.options(snapshot),
                });
            }
        }

        let search_plugin = search::resolve(snapshot);
        if search_plugin.is_some() {
            log::debug!("Registering search plugin '{}'", search::PLUGIN_ID);
        }

        Ok(ResolvedConfiguration {
            base,
            active_bindings,
            search_plugin,
        })
    }
}

impl Default for ConfigAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble with the built-in provider table
pub fn assemble(snapshot: &EnvironmentSnapshot) -> ConfigResult<ResolvedConfiguration> {
    ConfigAssembler::new().assemble(snapshot)
}

/// Rules of one slot that win against the snapshot, in priority order
pub fn resolve_slot(
    slot: &CapabilitySlot,
    snapshot: &EnvironmentSnapshot,
) -> Vec<&'static ProviderRule> {
    let mut candidates = slot
        .rules
        .iter()
        .filter(|rule| !rule.is_fallback() && rule.is_active(snapshot));

    let winners: Vec<&'static ProviderRule> = match slot.cardinality {
        Cardinality::AtMostOne => candidates.next().into_iter().collect(),
        Cardinality::AtMostN => candidates.collect(),
    };

    if winners.is_empty() {
        match slot.fallback() {
            Some(fallback) => {
                log::debug!(
                    "No provider configured for {}, falling back to '{}'",
                    slot.capability,
                    fallback.provider_id
                );
                vec![fallback]
            }
            None => {
                log::debug!("{} not configured", slot.capability);
                Vec::new()
            }
        }
    } else {
        winners
    }
}
