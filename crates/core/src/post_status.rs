//! Post status constants and admin message codes.
//!
//! Statuses are opaque to the gate. Hosts use more than the core set
//! (`inherit` for attachments, `auto-draft`, `trash`, plugin-defined ones),
//! and every one of them still goes through validation.

/// Unpublished working copy. The gate forces failing saves here.
pub const STATUS_DRAFT: &str = "draft";

/// Key of the status field inside an outgoing save payload.
pub const STATUS_FIELD: &str = "post_status";

/// Admin message code the host shows after a successful publish.
pub const MESSAGE_PUBLISHED: u32 = 6;

/// Returns `true` if `status` can name a post status at all.
///
/// Any non-blank string does; the set of statuses belongs to the host.
pub fn is_status_name(status: &str) -> bool {
    !status.trim().is_empty()
}
