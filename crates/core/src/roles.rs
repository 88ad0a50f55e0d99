//! Well-known role names and the capabilities the gate cares about.

pub const ROLE_ADMINISTRATOR: &str = "administrator";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_AUTHOR: &str = "author";
pub const ROLE_CONTRIBUTOR: &str = "contributor";
pub const ROLE_SUBSCRIBER: &str = "subscriber";

/// Roles allowed to edit posts. Saves by anyone else bypass the gate.
const EDIT_POSTS_ROLES: &[&str] = &[
    ROLE_ADMINISTRATOR,
    ROLE_EDITOR,
    ROLE_AUTHOR,
    ROLE_CONTRIBUTOR,
];

/// Whether `role` carries the `edit_posts` capability.
pub fn can_edit_posts(role: &str) -> bool {
    EDIT_POSTS_ROLES.contains(&role)
}

/// Whether `role` may change site options such as the required-field settings.
pub fn can_manage_options(role: &str) -> bool {
    role == ROLE_ADMINISTRATOR
}
