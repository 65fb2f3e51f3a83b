//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireResearcher`] -- Requires the `researcher` role and a workspace session.
//! - [`rbac::RequireEditor`] -- Requires the `editor` role.

pub mod auth;
pub mod rbac;
