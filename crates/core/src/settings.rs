//! Operator settings: which built-in fields are required.
//!
//! Each built-in field has a `require_<name>` option. Stored values are
//! coerced the integer way, so `1`, `"1"` and `true` switch a field on while
//! `0`, `""` and `null` switch it off.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Prefix of every per-field option name.
pub const SETTING_FLAG_PREFIX: &str = "require_";

/// Option name for a built-in field, e.g. `require_post_title`.
pub fn setting_flag(field_name: &str) -> String {
    format!("{SETTING_FLAG_PREFIX}{field_name}")
}

/// Integer coercion used for stored option values.
///
/// Strings contribute their leading (optionally signed) digits, so `"1abc"`
/// is `1` and `"abc"` is `0`. Arrays and objects are `1` unless empty.
pub fn intval(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s.trim_start()),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
    }
}

fn leading_int(s: &str) -> i64 {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

/// The `require_<name>` option values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequiredFieldSettings {
    flags: IndexMap<String, bool>,
}

impl RequiredFieldSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with every field in `names` switched on.
    pub fn from_enabled<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings = Self::new();
        for name in names {
            settings.enable(name);
        }
        settings
    }

    pub fn enable(&mut self, field_name: impl Into<String>) {
        self.flags.insert(field_name.into(), true);
    }

    pub fn disable(&mut self, field_name: impl Into<String>) {
        self.flags.insert(field_name.into(), false);
    }

    /// Store a raw option value, coercing it to on/off. Returns the result.
    pub fn set_raw(&mut self, field_name: impl Into<String>, raw: &Value) -> bool {
        let enabled = intval(raw) != 0;
        self.flags.insert(field_name.into(), enabled);
        enabled
    }

    /// Whether the operator made `field_name` required. Unset means no.
    pub fn is_required(&self, field_name: &str) -> bool {
        self.flags.get(field_name).copied().unwrap_or(false)
    }
}
