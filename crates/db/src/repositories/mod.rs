//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a `&mut PgConnection` inside a transaction) as the
//! first argument. Moderated kinds share [`ModerationRepo`].

pub mod achievement_repo;
pub mod blog_repo;
pub mod forum_repo;
pub mod inquiry_repo;
pub mod moderation_repo;
pub mod registration_request_repo;
pub mod session_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use blog_repo::BlogRepo;
pub use forum_repo::ForumRepo;
pub use inquiry_repo::InquiryRepo;
pub use moderation_repo::{ModerationRepo, NewSubmission};
pub use registration_request_repo::RegistrationRequestRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
