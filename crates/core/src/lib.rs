//! Publish-gate validation for CMS posts.
//!
//! Required-field rules are collected into a frozen [`registry::RuleRegistry`]
//! at startup. Every save attempt passes through the [`gate::ValidationGate`],
//! which forces failing posts back to draft and leaves the failure messages
//! in a [`flash::FlashStore`] for the next edit screen to show exactly once.

pub mod builtin;
pub mod error;
pub mod flash;
pub mod gate;
pub mod keys;
pub mod notice;
pub mod post_status;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod roles;
pub mod rules;
pub mod settings;
pub mod types;
