//! Field resolution: find the value a rule should test.

use serde_json::Value;

use crate::record::PostRecord;

/// Find `field_name` in the record's primary attributes, then in its meta.
///
/// A primary attribute is returned verbatim, even when it is `null` or
/// empty. For meta the first stored value is returned. `None` means the
/// field exists in neither place.
pub fn resolve(field_name: &str, record: &PostRecord) -> Option<Value> {
    if record.has_attribute(field_name) {
        return record.attribute(field_name);
    }
    record.meta.first(field_name).cloned()
}

/// The value a predicate is called with.
///
/// Falls back to the whole record when the field cannot be resolved, so
/// predicates that look across several attributes (the category check,
/// for one) can be registered under a name that is not a real field.
pub fn value_under_test(field_name: &str, record: &PostRecord) -> Value {
    resolve(field_name, record).unwrap_or_else(|| record.to_value())
}
