//! Environment-driven configuration composition for the commerce backend
//!
//! A flat snapshot of deployment inputs is turned into the base settings and
//! the list of infrastructure providers the host platform should load. The
//! provider table in [`providers`] decides which integrations are active and
//! which provider wins when several could serve the same capability.

pub mod assembler;
pub mod base;
pub mod diagnostics;
pub mod env_keys;
pub mod error;
pub mod loader;
pub mod providers;
pub mod resolved;
pub mod snapshot;
pub mod validation;

// Re-export main types
pub use assembler::{assemble, ConfigAssembler};
pub use base::BaseSettings;
pub use diagnostics::{diagnose, Diagnostic};
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use providers::search::SearchPlugin;
pub use providers::{
    Activation, Capability, CapabilitySlot, Cardinality, ModuleLayout, OptionsMap, ProviderRule,
};
pub use resolved::{Binding, ResolvedConfiguration};
pub use snapshot::EnvironmentSnapshot;
pub use validation::Validatable;
