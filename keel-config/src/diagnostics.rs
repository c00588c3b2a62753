//! Operator-facing findings about a snapshot
//!
//! Assembly treats a provider with incomplete inputs as simply inactive. That
//! keeps startup predictable but hides typos such as a secret key without its
//! access key. [`diagnose`] reports those cases, along with placeholder secrets
//! and providers hidden by a higher-priority one, without changing what
//! [`crate::assemble`] produces.

use crate::base::INSECURE_DEFAULT_SECRET;
use crate::env_keys::{COOKIE_SECRET, JWT_SECRET};
use crate::providers::{self, search, Activation, Cardinality};
use crate::snapshot::EnvironmentSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A finding worth surfacing to whoever operates the deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Some but not all inputs of a provider were provided
    #[serde(rename_all = "camelCase")]
    PartialCredentials {
        target: String,
        present: Vec<String>,
        missing: Vec<String>,
    },

    /// A secret falls back to the well-known placeholder
    #[serde(rename_all = "camelCase")]
    InsecureDefaultSecret { input: String },

    /// A fully configured provider lost to a higher-priority one
    #[serde(rename_all = "camelCase")]
    ShadowedProvider { target: String, winner: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PartialCredentials {
                target,
                present,
                missing,
            } => write!(
                f,
                "{} is partially configured and stays inactive (set: {}; missing: {})",
                target,
                present.join(", "),
                missing.join(", ")
            ),
            Diagnostic::InsecureDefaultSecret { input } => write!(
                f,
                "{} falls back to the insecure placeholder secret",
                input
            ),
            Diagnostic::ShadowedProvider { target, winner } => {
                write!(f, "{} is configured but {} takes precedence", target, winner)
            }
        }
    }
}

/// Inspect a snapshot for partial, shadowed and insecure settings
pub fn diagnose(snapshot: &EnvironmentSnapshot) -> Vec<Diagnostic> {
    let mut findings = Vec::new();

    for slot in providers::slots() {
        let mut winner: Option<&str> = None;

        for rule in slot.rules {
            let target = format!("{}/{}", slot.capability, rule.provider_id);

            if let Some(partial) = partial_credentials(&target, &rule.activation, snapshot) {
                findings.push(partial);
                continue;
            }

            if rule.is_fallback() || !rule.is_active(snapshot) {
                continue;
            }

            match (slot.cardinality, winner) {
                (Cardinality::AtMostOne, Some(winner)) => {
                    findings.push(Diagnostic::ShadowedProvider {
                        target,
                        winner: format!("{}/{}", slot.capability, winner),
                    });
                }
                _ => winner = Some(rule.provider_id),
            }
        }
    }

    let search_target = format!("search/{}", search::PLUGIN_ID);
    if let Some(partial) = partial_credentials(&search_target, &search::ACTIVATION, snapshot) {
        findings.push(partial);
    }

    for input in [JWT_SECRET, COOKIE_SECRET] {
        if matches!(snapshot.get(input), None | Some(INSECURE_DEFAULT_SECRET)) {
            findings.push(Diagnostic::InsecureDefaultSecret {
                input: input.to_string(),
            });
        }
    }

    findings
}

fn partial_credentials(
    target: &str,
    activation: &Activation,
    snapshot: &EnvironmentSnapshot,
) -> Option<Diagnostic> {
    let required = activation.required_inputs();
    let present = snapshot.present_of(required);

    if present.is_empty() || present.len() == required.len() {
        return None;
    }

    let missing = required
        .iter()
        .filter(|name| !present.contains(*name))
        .map(|name| name.to_string())
        .collect();

    Some(Diagnostic::PartialCredentials {
        target: target.to_string(),
        present: present.iter().map(|name| name.to_string()).collect(),
        missing,
    })
}
