//! Domain layer for the alumni association backend.
//!
//! Pure logic with no database or HTTP access: identifier types, the
//! domain error taxonomy, moderation statuses, and the validation rules
//! for every user-authored record.

pub mod achievement;
pub mod blog;
pub mod error;
pub mod forum;
pub mod inquiry;
pub mod moderation;
pub mod registration;
pub mod roles;
pub mod search;
pub mod submission;
pub mod types;
