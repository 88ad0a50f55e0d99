//! Rule registry: post type -> ordered required-field rules.
//!
//! Rules are collected in a [`RegistryBuilder`] during startup and then
//! frozen into a [`RuleRegistry`] that the gate only ever reads. There is
//! no removal API; a different rule set means building a new registry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rules::{Predicate, Rule};

/// Content-type selector meaning "every public post type".
pub const ANY_CONTENT_TYPE: &str = "any";

/// Public post types known to a freshly created builder.
pub const DEFAULT_PUBLIC_POST_TYPES: &[&str] = &["post", "page", "attachment"];

// ---------------------------------------------------------------------------
// Content type selection
// ---------------------------------------------------------------------------

/// Which post types a registration applies to.
///
/// `Any` is expanded when the registration happens, against the public post
/// types known at that moment. Post types added afterwards do not pick up
/// earlier `Any` registrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawContentTypes", into = "RawContentTypes")]
pub enum ContentTypes {
    #[default]
    Any,
    Only(Vec<String>),
}

/// Wire shape: `"any"`, a single type name, or a list of names.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawContentTypes {
    One(String),
    Many(Vec<String>),
}

impl From<RawContentTypes> for ContentTypes {
    fn from(raw: RawContentTypes) -> Self {
        match raw {
            RawContentTypes::One(name) => Self::from(name),
            RawContentTypes::Many(names) => Self::Only(names),
        }
    }
}

impl From<ContentTypes> for RawContentTypes {
    fn from(types: ContentTypes) -> Self {
        match types {
            ContentTypes::Any => RawContentTypes::One(ANY_CONTENT_TYPE.to_string()),
            ContentTypes::Only(names) => RawContentTypes::Many(names),
        }
    }
}

impl From<String> for ContentTypes {
    fn from(name: String) -> Self {
        if name == ANY_CONTENT_TYPE {
            Self::Any
        } else {
            Self::Only(vec![name])
        }
    }
}

impl From<&str> for ContentTypes {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<Vec<String>> for ContentTypes {
    fn from(names: Vec<String>) -> Self {
        Self::Only(names)
    }
}

impl From<&[&str]> for ContentTypes {
    fn from(names: &[&str]) -> Self {
        Self::Only(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ContentTypes {
    fn from(names: [&str; N]) -> Self {
        Self::from(&names[..])
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Mutable registration phase of the rule table.
#[derive(Debug)]
pub struct RegistryBuilder {
    public_post_types: Vec<String>,
    rules: IndexMap<String, Vec<Rule>>,
}

impl RegistryBuilder {
    /// A builder that knows the [`DEFAULT_PUBLIC_POST_TYPES`].
    pub fn new() -> Self {
        Self::with_public_post_types(DEFAULT_PUBLIC_POST_TYPES.iter().copied())
    }

    /// A builder with an explicit list of public post types.
    pub fn with_public_post_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self {
            public_post_types: Vec::new(),
            rules: IndexMap::new(),
        };
        for post_type in types {
            builder.add_public_post_type(post_type);
        }
        builder
    }

    /// Make another post type public. Only later `Any` registrations see it.
    pub fn add_public_post_type(&mut self, post_type: impl Into<String>) {
        let post_type = post_type.into();
        if !self.public_post_types.contains(&post_type) {
            self.public_post_types.push(post_type);
        }
    }

    pub fn public_post_types(&self) -> &[String] {
        &self.public_post_types
    }

    /// Register a required field.
    ///
    /// An empty `message` and a `None` predicate get the defaults described
    /// on [`Rule::new`]. One rule is appended per resolved post type; rules
    /// on the same field are never merged.
    pub fn register_required_field(
        &mut self,
        label: &str,
        field_name: &str,
        message: &str,
        predicate: Option<Predicate>,
        content_types: impl Into<ContentTypes>,
    ) {
        let rule = Rule::new(label, field_name, message, predicate);
        self.register_rule(rule, content_types);
    }

    /// Append an already built rule for each resolved post type.
    pub fn register_rule(&mut self, rule: Rule, content_types: impl Into<ContentTypes>) {
        let post_types = self.expand(content_types.into());
        tracing::debug!(
            field = %rule.field_name,
            post_types = ?post_types,
            "Registered required field"
        );
        for post_type in post_types {
            self.rules.entry(post_type).or_default().push(rule.clone());
        }
    }

    /// Rules registered so far for `post_type`.
    pub fn rules_for(&self, post_type: &str) -> &[Rule] {
        self.rules.get(post_type).map_or(&[], Vec::as_slice)
    }

    /// Freeze the table.
    pub fn build(self) -> RuleRegistry {
        RuleRegistry { rules: self.rules }
    }

    fn expand(&self, content_types: ContentTypes) -> Vec<String> {
        match content_types {
            ContentTypes::Any => self.public_post_types.clone(),
            ContentTypes::Only(names) => names,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Frozen registry
// ---------------------------------------------------------------------------

/// Read-only rule table consulted by the gate. Share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, Vec<Rule>>,
}

impl RuleRegistry {
    /// Rules for `post_type` in registration order; empty when none exist.
    pub fn rules_for(&self, post_type: &str) -> &[Rule] {
        self.rules.get(post_type).map_or(&[], Vec::as_slice)
    }

    /// Post types that carry at least one rule.
    pub fn post_types(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Total number of rule entries across all post types.
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }
}
