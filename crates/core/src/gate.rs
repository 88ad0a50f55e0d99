//! The publish gate.
//!
//! Runs on every save attempt before the host persists the post. When any
//! required-field rule fails, the outgoing status is forced to draft and
//! the failures are flashed for the editing user.

use serde::Serialize;
use serde_json::Value;

use crate::flash::{FailureSet, FlashStore};
use crate::keys::{FieldKeyAllocator, FlashKey};
use crate::post_status::{STATUS_DRAFT, STATUS_FIELD};
use crate::record::{PostData, PostRecord};
use crate::registry::RuleRegistry;
use crate::resolver::value_under_test;
use crate::types::DbId;

/// Who is saving, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveContext {
    pub user_id: DbId,
    pub doing_autosave: bool,
    pub can_edit_posts: bool,
}

impl SaveContext {
    /// An interactive (non-autosave) save by a user who may edit posts.
    pub fn editor(user_id: DbId) -> Self {
        Self {
            user_id,
            doing_autosave: false,
            can_edit_posts: true,
        }
    }
}

/// Why the gate let a save through without looking at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoIdentity,
    Autosave,
    PermissionDenied,
}

/// What the gate decided for one save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Skipped(SkipReason),
    Passed,
    Failed(FailureSet),
}

impl GateVerdict {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn failures(&self) -> Option<&FailureSet> {
        match self {
            Self::Failed(failures) => Some(failures),
            _ => None,
        }
    }

    /// Short lowercase name (`skipped`, `passed`, `failed`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Passed => "passed",
            Self::Failed(_) => "failed",
        }
    }
}

/// The (possibly rewritten) payload plus the verdict that shaped it.
#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub data: PostData,
    pub verdict: GateVerdict,
}

/// Validates save attempts against a frozen [`RuleRegistry`].
pub struct ValidationGate<'a> {
    registry: &'a RuleRegistry,
    store: &'a dyn FlashStore,
}

impl<'a> ValidationGate<'a> {
    pub fn new(registry: &'a RuleRegistry, store: &'a dyn FlashStore) -> Self {
        Self { registry, store }
    }

    /// Run every rule for the record's post type and collect the failures.
    ///
    /// No early exit: a failing rule never hides the ones after it.
    pub fn evaluate(&self, record: &PostRecord) -> FailureSet {
        let mut keys = FieldKeyAllocator::new();
        let mut failures = FailureSet::new();

        for rule in self.registry.rules_for(&record.post_type) {
            let value: Value = value_under_test(&rule.field_name, record);
            if !rule.passes(&value) {
                failures.insert(keys.allocate(&rule.field_name), rule.message.clone());
            }
        }

        failures
    }

    /// Validate a save attempt and report how it was handled.
    pub fn guard_save(
        &self,
        record: &PostRecord,
        mut data: PostData,
        ctx: &SaveContext,
    ) -> GateOutcome {
        let Some(post_id) = record.identity() else {
            return skipped(data, SkipReason::NoIdentity);
        };
        if ctx.doing_autosave {
            return skipped(data, SkipReason::Autosave);
        }
        if !ctx.can_edit_posts {
            return skipped(data, SkipReason::PermissionDenied);
        }

        let key = FlashKey::new(post_id, ctx.user_id);
        self.store.clear(key);

        let failures = self.evaluate(record);
        if failures.is_empty() {
            tracing::debug!(post_id, user_id = ctx.user_id, "Publish gate passed");
            return GateOutcome {
                data,
                verdict: GateVerdict::Passed,
            };
        }

        tracing::info!(
            post_id,
            user_id = ctx.user_id,
            post_type = %record.post_type,
            failures = failures.len(),
            "Required fields missing, forcing post back to draft"
        );
        self.store.write(key, failures.clone());
        data.insert(STATUS_FIELD.to_string(), Value::from(STATUS_DRAFT));

        GateOutcome {
            data,
            verdict: GateVerdict::Failed(failures),
        }
    }

    /// Host hook: returns the payload to persist, never an error.
    pub fn on_save_attempt(
        &self,
        record: &PostRecord,
        data: PostData,
        ctx: &SaveContext,
    ) -> PostData {
        self.guard_save(record, data, ctx).data
    }
}

fn skipped(data: PostData, reason: SkipReason) -> GateOutcome {
    tracing::debug!(reason = ?reason, "Publish gate skipped");
    GateOutcome {
        data,
        verdict: GateVerdict::Skipped(reason),
    }
}
