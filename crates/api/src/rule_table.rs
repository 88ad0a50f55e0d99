//! The live rule table behind the API.
//!
//! Holds the operator settings, the externally registered fields and the
//! frozen [`RuleRegistry`] built from both. Any change rebuilds a complete
//! registry and swaps the shared `Arc`; saves already running keep the
//! table they started with.
//!
//! Built-in rules are derived from the current settings on every rebuild,
//! so they carry no registration time of their own. Each post type's rules
//! run in two blocks: the switched-on built-ins in descriptor order, then
//! external registrations in the order they arrived. Toggling a setting
//! never moves a built-in behind a registration made earlier.

use std::sync::Arc;

use reqfields_core::builtin::{BuiltinFieldView, BuiltinFields};
use reqfields_core::error::CoreError;
use reqfields_core::registry::{ContentTypes, RegistryBuilder, RuleRegistry};
use reqfields_core::rules::Validator;
use reqfields_core::settings::RequiredFieldSettings;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

/// A required field registered through the public registration API.
#[derive(Debug, Clone)]
pub struct Registration {
    pub label: String,
    pub field_name: String,
    /// Empty means the default message.
    pub message: String,
    pub validator: Validator,
    pub post_types: ContentTypes,
}

/// Serializable view of a [`Registration`].
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationView {
    pub label: String,
    pub field_name: String,
    pub message: String,
    pub validator: String,
    pub post_types: ContentTypes,
}

impl From<&Registration> for RegistrationView {
    fn from(r: &Registration) -> Self {
        Self {
            label: r.label.clone(),
            field_name: r.field_name.clone(),
            message: r.message.clone(),
            validator: r.validator.name().to_string(),
            post_types: r.post_types.clone(),
        }
    }
}

struct TableState {
    settings: RequiredFieldSettings,
    registrations: Vec<Registration>,
    registry: Arc<RuleRegistry>,
}

/// Settings + registrations + the registry compiled from them.
pub struct RuleTable {
    public_post_types: Vec<String>,
    builtins: BuiltinFields,
    state: RwLock<TableState>,
}

impl RuleTable {
    pub fn new(
        public_post_types: Vec<String>,
        builtins: BuiltinFields,
        settings: RequiredFieldSettings,
    ) -> Self {
        let registry = compile(&public_post_types, &builtins, &settings, &[]);
        tracing::info!(rules = registry.rule_count(), "Rule registry built");
        Self {
            public_post_types,
            builtins,
            state: RwLock::new(TableState {
                settings,
                registrations: Vec::new(),
                registry: Arc::new(registry),
            }),
        }
    }

    /// The current frozen registry.
    pub async fn registry(&self) -> Arc<RuleRegistry> {
        Arc::clone(&self.state.read().await.registry)
    }

    /// Built-in descriptors with their current on/off state.
    pub async fn builtin_views(&self) -> Vec<BuiltinFieldView> {
        self.builtins.views(&self.state.read().await.settings)
    }

    /// Store the raw `require_<name>` option and rebuild the registry.
    ///
    /// Returns the view of the toggled field.
    pub async fn set_builtin(&self, name: &str, raw: &Value) -> Result<BuiltinFieldView, CoreError> {
        self.builtins.require_known(name)?;

        let mut state = self.state.write().await;
        let enabled = state.settings.set_raw(name, raw);
        self.rebuild(&mut state);
        tracing::info!(field = %name, enabled, "Required-field setting changed");

        self.builtins
            .views(&state.settings)
            .into_iter()
            .find(|v| v.name == name)
            .ok_or_else(|| CoreError::Internal(format!("built-in field '{name}' vanished")))
    }

    /// Append an external registration and rebuild the registry.
    pub async fn register(&self, registration: Registration) {
        let mut state = self.state.write().await;
        tracing::info!(
            field = %registration.field_name,
            validator = registration.validator.name(),
            "External required field registered"
        );
        state.registrations.push(registration);
        self.rebuild(&mut state);
    }

    pub async fn registrations(&self) -> Vec<RegistrationView> {
        self.state
            .read()
            .await
            .registrations
            .iter()
            .map(RegistrationView::from)
            .collect()
    }

    fn rebuild(&self, state: &mut TableState) {
        let registry = compile(
            &self.public_post_types,
            &self.builtins,
            &state.settings,
            &state.registrations,
        );
        tracing::debug!(rules = registry.rule_count(), "Rule registry rebuilt");
        state.registry = Arc::new(registry);
    }
}

/// Built-ins first (when switched on, in descriptor order), then external
/// registrations in the order they arrived.
fn compile(
    public_post_types: &[String],
    builtins: &BuiltinFields,
    settings: &RequiredFieldSettings,
    registrations: &[Registration],
) -> RuleRegistry {
    let mut builder = RegistryBuilder::with_public_post_types(public_post_types.iter().cloned());
    builtins.apply(&mut builder, settings);
    for r in registrations {
        builder.register_required_field(
            &r.label,
            &r.field_name,
            &r.message,
            r.validator.to_predicate(),
            r.post_types.clone(),
        );
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn table() -> RuleTable {
        RuleTable::new(
            vec!["post".into(), "page".into()],
            BuiltinFields::defaults(),
            RequiredFieldSettings::new(),
        )
    }

    #[tokio::test]
    async fn starts_empty_without_settings() {
        assert!(table().registry().await.is_empty());
    }

    #[tokio::test]
    async fn toggling_builtin_rebuilds() {
        let table = table();
        let before = table.registry().await;

        let view = table.set_builtin("post_title", &json!(1)).await.unwrap();
        assert!(view.enabled);
        assert_eq!(table.registry().await.rules_for("page").len(), 1);
        // The old snapshot is untouched.
        assert!(before.is_empty());
    }

    #[tokio::test]
    async fn unknown_builtin_is_rejected() {
        let err = table().set_builtin("author", &json!(1)).await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { .. });
    }

    fn subtitle() -> Registration {
        Registration {
            label: "Subtitle".into(),
            field_name: "subtitle".into(),
            message: String::new(),
            validator: Validator::Default,
            post_types: ContentTypes::from("post"),
        }
    }

    async fn post_fields(table: &RuleTable) -> Vec<String> {
        table
            .registry()
            .await
            .rules_for("post")
            .iter()
            .map(|r| r.field_name.clone())
            .collect()
    }

    #[tokio::test]
    async fn registrations_survive_setting_changes() {
        let table = table();
        table.register(subtitle()).await;
        table.set_builtin("post_excerpt", &json!("1")).await.unwrap();

        assert_eq!(post_fields(&table).await, ["post_excerpt", "subtitle"]);
        assert_eq!(table.registrations().await.len(), 1);
    }

    #[tokio::test]
    async fn builtins_keep_descriptor_order_regardless_of_toggle_time() {
        let table = table();
        table.set_builtin("post_excerpt", &json!(1)).await.unwrap();
        table.register(subtitle()).await;
        table.set_builtin("post_title", &json!(1)).await.unwrap();

        assert_eq!(
            post_fields(&table).await,
            ["post_title", "post_excerpt", "subtitle"]
        );
    }
}
