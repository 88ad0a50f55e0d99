//! Key sanitizing and flash-slot keys.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Characters that survive [`sanitize_key`] are `a-z`, `0-9`, `_` and `-`.
static DISALLOWED_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\-]").expect("valid regex"));

/// Prefix of the flash slot name.
pub const FLASH_KEY_PREFIX: &str = "save_post_error";

/// Lowercase `raw` and strip every character outside `[a-z0-9_-]`.
pub fn sanitize_key(raw: &str) -> String {
    DISALLOWED_KEY_CHARS
        .replace_all(&raw.to_lowercase(), "")
        .into_owned()
}

/// Hands out field keys that are unique within one gate run.
///
/// The first rule on a field gets the sanitized name; later rules that
/// sanitize to the same key get `-2`, `-3`, and so on.
#[derive(Debug, Default)]
pub struct FieldKeyAllocator {
    taken: HashSet<String>,
}

impl FieldKeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, field_name: &str) -> String {
        let base = sanitize_key(field_name);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Identifies one flash slot: a post as seen by one editing user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlashKey {
    pub post_id: DbId,
    pub user_id: DbId,
}

impl FlashKey {
    pub fn new(post_id: DbId, user_id: DbId) -> Self {
        Self { post_id, user_id }
    }
}

impl fmt::Display for FlashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{FLASH_KEY_PREFIX}_{}_{}", self.post_id, self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_lowercases_and_strips() {
        assert_eq!(sanitize_key("Post_Title"), "post_title");
        assert_eq!(sanitize_key("hero image!"), "heroimage");
        assert_eq!(sanitize_key("a-b_c.d"), "a-b_cd");
        assert_eq!(sanitize_key("Ünïcode"), "ncode");
    }

    #[test]
    fn allocator_disambiguates_repeats() {
        let mut keys = FieldKeyAllocator::new();
        assert_eq!(keys.allocate("post_title"), "post_title");
        assert_eq!(keys.allocate("Post_Title"), "post_title-2");
        assert_eq!(keys.allocate("post_title"), "post_title-3");
        assert_eq!(keys.allocate("category"), "category");
    }

    #[test]
    fn flash_key_display_combines_post_and_user() {
        assert_eq!(FlashKey::new(42, 7).to_string(), "save_post_error_42_7");
    }

    #[test]
    fn flash_keys_differ_per_user() {
        assert_ne!(FlashKey::new(42, 7), FlashKey::new(42, 8));
    }
}
