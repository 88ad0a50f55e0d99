//! Built-in required-field descriptors.
//!
//! The operator can make the title, content, excerpt and category of a post
//! required. External code may reshape the descriptor list before it is
//! applied to a [`RegistryBuilder`].

use serde::Serialize;

use crate::error::CoreError;
use crate::registry::{ContentTypes, RegistryBuilder};
use crate::rules::{Validator, PREDICATE_HAS_CATEGORY};
use crate::settings::{setting_flag, RequiredFieldSettings};

pub const FIELD_POST_TITLE: &str = "post_title";
pub const FIELD_POST_CONTENT: &str = "post_content";
pub const FIELD_POST_EXCERPT: &str = "post_excerpt";
pub const FIELD_CATEGORY: &str = "category";

/// Message shown when only the default category is selected.
pub const CATEGORY_MESSAGE: &str = "You must choose a category other than the default.";

/// One field the operator can toggle as required.
#[derive(Debug, Clone)]
pub struct BuiltinField {
    pub name: String,
    pub title: String,
    /// Empty means the default "`{title}` is required" message.
    pub message: String,
    pub validator: Validator,
    pub post_types: ContentTypes,
}

impl BuiltinField {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        post_types: impl Into<ContentTypes>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            message: String::new(),
            validator: Validator::Default,
            post_types: post_types.into(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// The option that switches this field on, e.g. `require_post_title`.
    pub fn setting_flag(&self) -> String {
        setting_flag(&self.name)
    }
}

/// Serializable view of a [`BuiltinField`] and whether it is switched on.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltinFieldView {
    pub name: String,
    pub title: String,
    pub setting_flag: String,
    pub message: String,
    pub validator: String,
    pub post_types: ContentTypes,
    pub enabled: bool,
}

/// Ordered, editable list of built-in descriptors.
#[derive(Debug, Clone)]
pub struct BuiltinFields(Vec<BuiltinField>);

impl BuiltinFields {
    /// Title, content, excerpt and category, in that order.
    pub fn defaults() -> Self {
        Self(vec![
            BuiltinField::new(FIELD_POST_TITLE, "Title", ContentTypes::Any),
            BuiltinField::new(FIELD_POST_CONTENT, "Content", ContentTypes::Any),
            BuiltinField::new(FIELD_POST_EXCERPT, "Excerpt", "post"),
            BuiltinField::new(FIELD_CATEGORY, "Category", "post")
                .with_message(CATEGORY_MESSAGE)
                .with_validator(Validator::Named(PREDICATE_HAS_CATEGORY.to_string())),
        ])
    }

    pub fn push(&mut self, field: BuiltinField) {
        self.0.push(field);
    }

    /// Remove a descriptor by field name.
    pub fn remove(&mut self, name: &str) -> Option<BuiltinField> {
        let index = self.0.iter().position(|f| f.name == name)?;
        Some(self.0.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&BuiltinField> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut BuiltinField> {
        self.0.iter_mut().find(|f| f.name == name)
    }

    /// Like [`get`](Self::get) but a missing name is an error.
    pub fn require_known(&self, name: &str) -> Result<&BuiltinField, CoreError> {
        self.get(name).ok_or_else(|| CoreError::NotFound {
            entity: "BuiltinField",
            key: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltinField> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Register every descriptor the operator has switched on.
    pub fn apply(&self, builder: &mut RegistryBuilder, settings: &RequiredFieldSettings) {
        for field in self.iter().filter(|f| settings.is_required(&f.name)) {
            builder.register_required_field(
                &field.title,
                &field.name,
                &field.message,
                field.validator.to_predicate(),
                field.post_types.clone(),
            );
        }
    }

    /// Descriptor views annotated with the current settings.
    pub fn views(&self, settings: &RequiredFieldSettings) -> Vec<BuiltinFieldView> {
        self.iter()
            .map(|f| BuiltinFieldView {
                name: f.name.clone(),
                title: f.title.clone(),
                setting_flag: f.setting_flag(),
                message: f.message.clone(),
                validator: f.validator.name().to_string(),
                post_types: f.post_types.clone(),
                enabled: settings.is_required(&f.name),
            })
            .collect()
    }
}

impl Default for BuiltinFields {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rules::named_predicate;

    fn field_names(builder: &RegistryBuilder, post_type: &str) -> Vec<String> {
        builder
            .rules_for(post_type)
            .iter()
            .map(|r| r.field_name.clone())
            .collect()
    }

    #[test]
    fn defaults_are_ordered() {
        let names: Vec<_> = BuiltinFields::defaults()
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(names, ["post_title", "post_content", "post_excerpt", "category"]);
    }

    #[test]
    fn nothing_registered_without_settings() {
        let mut builder = RegistryBuilder::new();
        BuiltinFields::defaults().apply(&mut builder, &RequiredFieldSettings::new());
        assert!(builder.build().is_empty());
    }

    #[test]
    fn enabled_fields_register_for_their_types() {
        let settings = RequiredFieldSettings::from_enabled(["post_title", "post_excerpt"]);
        let mut builder = RegistryBuilder::new();
        BuiltinFields::defaults().apply(&mut builder, &settings);

        assert_eq!(field_names(&builder, "post"), ["post_title", "post_excerpt"]);
        assert_eq!(field_names(&builder, "page"), ["post_title"]);
    }

    #[test]
    fn category_uses_its_own_message_and_check() {
        let settings = RequiredFieldSettings::from_enabled(["category"]);
        let mut builder = RegistryBuilder::new();
        BuiltinFields::defaults().apply(&mut builder, &settings);

        let rule = &builder.rules_for("post")[0];
        assert_eq!(rule.message, CATEGORY_MESSAGE);
        assert!(!rule.passes(&json!({"post_category": [1]})));
        assert!(rule.passes(&json!({"post_category": [1, 5]})));
    }

    #[test]
    fn descriptors_can_be_reshaped_before_apply() {
        let mut fields = BuiltinFields::defaults();
        fields.remove("post_excerpt");
        if let Some(title) = fields.get_mut("post_title") {
            title.post_types = ContentTypes::from("post");
        }
        fields.push(
            BuiltinField::new("featured_image", "Featured image", "post")
                .with_validator(Validator::Custom(named_predicate("not_empty"))),
        );

        let settings =
            RequiredFieldSettings::from_enabled(["post_title", "post_excerpt", "featured_image"]);
        let mut builder = RegistryBuilder::new();
        fields.apply(&mut builder, &settings);

        assert_eq!(field_names(&builder, "post"), ["post_title", "featured_image"]);
        assert!(builder.rules_for("page").is_empty());
    }

    #[test]
    fn unknown_field_is_not_found() {
        let err = BuiltinFields::defaults().require_known("author").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn views_report_flags() {
        let settings = RequiredFieldSettings::from_enabled(["category"]);
        let views = BuiltinFields::defaults().views(&settings);
        let category = views.iter().find(|v| v.name == "category").unwrap();
        assert!(category.enabled);
        assert_eq!(category.setting_flag, "require_category");
        assert_eq!(category.validator, "has_category");
        assert!(!views[0].enabled);
    }
}
