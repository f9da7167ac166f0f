//! Request extractors for authentication and authorization.
//!
//! - [`auth::AuthUser`] -- any logged-in member, from the JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- an administrator.

pub mod auth;
pub mod rbac;
