//! In-flight post records and their auxiliary meta store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::DbId;

/// Record key carrying the post identity.
pub const ID_KEY: &str = "ID";

/// Record key carrying the post type.
pub const POST_TYPE_KEY: &str = "post_type";

/// The outgoing save payload the host is about to persist.
pub type PostData = Map<String, Value>;

/// Multi-valued custom fields attached to a post.
///
/// Keys keep insertion order and every key maps to a list of values, the
/// first of which is what validation looks at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostMeta(IndexMap<String, Vec<Value>>);

impl PostMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`, keeping any existing values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// All values stored under `key`.
    pub fn get_all(&self, key: &str) -> Option<&[Value]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// The first value stored under `key`, if any.
    pub fn first(&self, key: &str) -> Option<&Value> {
        self.0.get(key).and_then(|values| values.first())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A post as submitted by a save or publish attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRecord {
    /// `None` or `Some(0)` while the post has never been stored.
    pub id: Option<DbId>,
    pub post_type: String,
    /// Primary attributes (`post_title`, `post_content`, `post_category`, ...).
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub meta: PostMeta,
}

impl PostRecord {
    pub fn new(id: Option<DbId>, post_type: impl Into<String>) -> Self {
        Self {
            id,
            post_type: post_type.into(),
            attributes: Map::new(),
            meta: PostMeta::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style meta setter; appends to any existing values.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.add(key, value);
        self
    }

    /// The stored identity, treating `0` as "not stored yet".
    pub fn identity(&self) -> Option<DbId> {
        self.id.filter(|id| *id != 0)
    }

    /// Whether `name` is a primary attribute of this record.
    ///
    /// The identity keys are always present, matching the shape of
    /// [`to_value`](Self::to_value).
    pub fn has_attribute(&self, name: &str) -> bool {
        name == ID_KEY || name == POST_TYPE_KEY || self.attributes.contains_key(name)
    }

    /// Look up a primary attribute, including the identity keys.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            ID_KEY => Some(self.id.map_or(Value::from(0), Value::from)),
            POST_TYPE_KEY => Some(Value::from(self.post_type.clone())),
            _ => self.attributes.get(name).cloned(),
        }
    }

    /// The whole record as one JSON object.
    ///
    /// Predicates receive this when their field resolves to nothing.
    pub fn to_value(&self) -> Value {
        let mut object = self.attributes.clone();
        object.insert(ID_KEY.to_string(), Value::from(self.id.unwrap_or(0)));
        object.insert(
            POST_TYPE_KEY.to_string(),
            Value::from(self.post_type.clone()),
        );
        Value::Object(object)
    }
}
