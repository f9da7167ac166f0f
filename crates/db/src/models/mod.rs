//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for request bodies
//! - For moderated kinds, a validated `New*` value that the repository inserts

pub mod achievement;
pub mod blog;
pub mod forum;
pub mod inquiry;
pub mod moderation;
pub mod registration_request;
pub mod session;
pub mod user;
