//! Required-field rules and the predicates they run.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A field check. Returns `true` when the value is acceptable.
///
/// Predicates run inline with the save and must be fast, pure and free of
/// I/O. A predicate that blocks stalls the host's save pipeline.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Name of the default predicate in [`named_predicate`].
pub const PREDICATE_NOT_EMPTY: &str = "not_empty";

/// Name of the category predicate in [`named_predicate`].
pub const PREDICATE_HAS_CATEGORY: &str = "has_category";

/// ID of the default "Uncategorized" category, which does not count.
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// One registered check on one field for one post type.
#[derive(Clone)]
pub struct Rule {
    pub label: String,
    pub field_name: String,
    pub predicate: Predicate,
    pub message: String,
}

impl Rule {
    /// Build a rule, filling in the default predicate and message.
    ///
    /// An empty `message` becomes "`{label}` is required before you can
    /// publish." and a missing predicate becomes [`not_empty`].
    pub fn new(
        label: impl Into<String>,
        field_name: impl Into<String>,
        message: &str,
        predicate: Option<Predicate>,
    ) -> Self {
        let label = label.into();
        let message = if message.is_empty() {
            default_message(&label)
        } else {
            message.to_string()
        };
        Self {
            field_name: field_name.into(),
            predicate: predicate.unwrap_or_else(default_predicate),
            message,
            label,
        }
    }

    /// Run the predicate against `value`.
    pub fn passes(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("label", &self.label)
            .field("field_name", &self.field_name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// How a registration chooses its predicate.
#[derive(Clone, Default)]
pub enum Validator {
    /// [`not_empty`].
    #[default]
    Default,
    /// Looked up through [`named_predicate`].
    Named(String),
    Custom(Predicate),
}

impl Validator {
    /// The predicate to register, `None` meaning "use the default".
    pub fn to_predicate(&self) -> Option<Predicate> {
        match self {
            Self::Default => None,
            Self::Named(name) => Some(named_predicate(name)),
            Self::Custom(predicate) => Some(Arc::clone(predicate)),
        }
    }

    /// Display name: the predicate name, or `custom`.
    pub fn name(&self) -> &str {
        match self {
            Self::Default => PREDICATE_NOT_EMPTY,
            Self::Named(name) => name.as_str(),
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.name())
    }
}

impl From<Option<String>> for Validator {
    fn from(name: Option<String>) -> Self {
        name.map_or(Self::Default, Self::Named)
    }
}

/// "`{label}` is required before you can publish."
pub fn default_message(label: &str) -> String {
    format!("{label} is required before you can publish.")
}

/// The [`not_empty`] check as a shareable predicate.
pub fn default_predicate() -> Predicate {
    Arc::new(not_empty)
}

/// Look up a predicate by name.
///
/// Unknown names fall back to [`not_empty`] instead of failing, so a rule
/// naming a validator that does not exist still behaves as a plain
/// required-field check.
pub fn named_predicate(name: &str) -> Predicate {
    match name {
        PREDICATE_HAS_CATEGORY => Arc::new(has_category),
        PREDICATE_NOT_EMPTY => default_predicate(),
        other => {
            tracing::warn!(predicate = %other, "Unknown predicate, using not_empty");
            default_predicate()
        }
    }
}

/// Default check: the value is present and not empty.
///
/// Strings are trimmed first. `null`, `false`, zero, `""`, `"0"`, `[]`
/// and `{}` count as empty.
pub fn not_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed != "0"
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Category check: at least one category other than the default is set.
///
/// Receives the whole record (the `category` field never resolves on its
/// own) and inspects `post_category`. Numeric strings count as IDs.
pub fn has_category(record: &Value) -> bool {
    let Some(categories) = record.get("post_category").and_then(Value::as_array) else {
        return false;
    };
    categories
        .iter()
        .filter_map(category_id)
        .any(|id| id > DEFAULT_CATEGORY_ID as f64)
}

fn category_id(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
