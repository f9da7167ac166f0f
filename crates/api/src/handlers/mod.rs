pub mod achievements;
pub mod admin;
pub mod auth;
pub mod blogs;
pub mod forum;
pub mod inquiries;
pub mod moderation;
pub mod registration_requests;
