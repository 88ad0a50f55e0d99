//! HTTP host for the publish gate.
//!
//! A CMS calls this service from its save pipeline and its edit screen.
//! The library exposes config, state, error handling and routes so the
//! binary and the integration tests build the exact same router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod rule_table;
pub mod state;
