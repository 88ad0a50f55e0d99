use std::sync::Arc;

use reqfields_core::builtin::BuiltinFields;
use reqfields_core::flash::InMemoryFlashStore;
use reqfields_core::settings::RequiredFieldSettings;

use crate::config::ServerConfig;
use crate::rule_table::RuleTable;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Settings, registrations and the registry built from them.
    pub rules: Arc<RuleTable>,
    /// Pending validation failures per (post, user).
    pub flash: Arc<InMemoryFlashStore>,
}

impl AppState {
    /// Build state with the default built-in descriptors, switching on the
    /// fields listed in `config.required_fields`.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_builtins(config, BuiltinFields::defaults())
    }

    /// Build state with a caller-supplied descriptor list.
    pub fn with_builtins(config: ServerConfig, builtins: BuiltinFields) -> Self {
        for name in &config.required_fields {
            if builtins.get(name).is_none() {
                tracing::warn!(field = %name, "REQUIRED_FIELDS names an unknown built-in field");
            }
        }
        let settings = RequiredFieldSettings::from_enabled(config.required_fields.iter().cloned());
        let rules = RuleTable::new(config.public_post_types.clone(), builtins, settings);
        Self {
            config: Arc::new(config),
            rules: Arc::new(rules),
            flash: Arc::new(InMemoryFlashStore::new()),
        }
    }
}
