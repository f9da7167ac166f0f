//! Integration tests for the moderation workflow shared by achievements,
//! blogs and registration requests.
//!
//! Covers duplicate suppression (including concurrent submits), status
//! transitions and their `updated_at` behaviour, and filtered listing.

use alumni_core::moderation::{ModerationStatus, Transition};
use alumni_core::submission::DedupWindow;
use alumni_db::models::achievement::{Achievement, CreateAchievement, NewAchievement};
use alumni_db::models::blog::{Blog, CreateBlog, NewBlog};
use alumni_db::models::moderation::{ModerationFilter, SubmissionAuthor};
use alumni_db::models::registration_request::{
    CreateRegistrationRequest, NewRegistrationRequest, RegistrationRequest,
};
use alumni_db::models::user::CreateUser;
use alumni_db::repositories::{ModerationRepo, UserRepo};
use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_admin(pool: &PgPool) -> i64 {
    let input = CreateUser {
        email: "admin@alumni.test".to_string(),
        display_name: "Admin".to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role: "admin".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn new_blog(author: &str, title: &str) -> NewBlog {
    let author = SubmissionAuthor::new(None, author).unwrap();
    let input = CreateBlog {
        title: title.to_string(),
        summary: None,
        body: "Lorem ipsum dolor sit amet.".to_string(),
    };
    NewBlog::new(author, &input).unwrap()
}

fn filter() -> ModerationFilter {
    ModerationFilter {
        status: None,
        author_identity: None,
        search: None,
        limit: 50,
        offset: 0,
    }
}

async fn submit_blog(pool: &PgPool, author: &str, title: &str) -> Blog {
    ModerationRepo::submit(pool, &new_blog(author, title), DedupWindow::default())
        .await
        .unwrap()
        .record
}

async fn count_blogs(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blogs")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Duplicate suppression
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_submit_returns_existing_record(pool: PgPool) {
    let input = new_blog("Jane Doe", "My First Post");

    let first = ModerationRepo::submit(&pool, &input, DedupWindow::default())
        .await
        .unwrap();
    let second = ModerationRepo::submit(&pool, &input, DedupWindow::default())
        .await
        .unwrap();

    assert!(!first.reused);
    assert!(second.reused);
    assert_eq!(first.record.id, second.record.id);
    assert_eq!(first.record.status, "pending");
    assert_eq!(count_blogs(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn author_identity_is_whitespace_normalized(pool: PgPool) {
    let first = submit_blog(&pool, "Jane Doe", "My First Post").await;
    let second = ModerationRepo::submit(
        &pool,
        &new_blog("  Jane   Doe ", "My First Post"),
        DedupWindow::default(),
    )
    .await
    .unwrap();

    assert!(second.reused);
    assert_eq!(second.record.id, first.id);
    assert_eq!(second.record.author_identity, "Jane Doe");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn different_title_or_author_inserts(pool: PgPool) {
    let a = submit_blog(&pool, "Jane Doe", "My First Post").await;
    let b = submit_blog(&pool, "Jane Doe", "My Second Post").await;
    let c = submit_blog(&pool, "John Smith", "My First Post").await;

    assert_ne!(a.id, b.id);
    assert_ne!(a.id, c.id);
    assert_eq!(count_blogs(&pool).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_after_window_inserts_new_record(pool: PgPool) {
    let first = submit_blog(&pool, "Jane Doe", "My First Post").await;

    sqlx::query("UPDATE blogs SET created_at = NOW() - INTERVAL '10 minutes' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .unwrap();

    let second = ModerationRepo::submit(
        &pool,
        &new_blog("Jane Doe", "My First Post"),
        DedupWindow::from_secs(300).unwrap(),
    )
    .await
    .unwrap();

    assert!(!second.reused);
    assert_ne!(second.record.id, first.id);
    assert_eq!(count_blogs(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_lookup_ignores_status(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let first = submit_blog(&pool, "Jane Doe", "My First Post").await;
    ModerationRepo::update_status::<Blog>(&pool, first.id, ModerationStatus::Denied, admin)
        .await
        .unwrap();

    let again = ModerationRepo::submit(
        &pool,
        &new_blog("Jane Doe", "My First Post"),
        DedupWindow::default(),
    )
    .await
    .unwrap();

    assert!(again.reused);
    assert_eq!(again.record.status, "denied");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_identical_submits_insert_once(pool: PgPool) {
    let input = new_blog("Jane Doe", "Race Condition");
    let window = DedupWindow::default();

    let (a, b, c) = tokio::join!(
        ModerationRepo::submit(&pool, &input, window),
        ModerationRepo::submit(&pool, &input, window),
        ModerationRepo::submit(&pool, &input, window),
    );
    let results = [a.unwrap(), b.unwrap(), c.unwrap()];

    assert_eq!(count_blogs(&pool).await, 1);
    assert_eq!(results.iter().filter(|r| !r.reused).count(), 1);
    let id = results[0].record.id;
    assert!(results.iter().all(|r| r.record.id == id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn registration_requests_dedup_on_registration_number(pool: PgPool) {
    let input = CreateRegistrationRequest {
        full_name: "Asha Rao".to_string(),
        branch: "Computer Science".to_string(),
        registration_number: "cs/2019-042".to_string(),
        email: "Asha.Rao@Example.com".to_string(),
        graduation_year: Some(2023),
        linkedin_url: None,
    };
    let request = NewRegistrationRequest::new(&input, 2026).unwrap();

    let first = ModerationRepo::submit(&pool, &request, DedupWindow::default())
        .await
        .unwrap();
    let second = ModerationRepo::submit(&pool, &request, DedupWindow::default())
        .await
        .unwrap();

    assert!(second.reused);
    assert_eq!(first.record.id, second.record.id);
    assert_eq!(first.record.author_identity, "asha.rao@example.com");
    assert_eq!(first.record.registration_number, "CS/2019-042");

    let other = CreateRegistrationRequest {
        registration_number: "CS/2019-043".to_string(),
        ..input
    };
    let third = ModerationRepo::submit(
        &pool,
        &NewRegistrationRequest::new(&other, 2026).unwrap(),
        DedupWindow::default(),
    )
    .await
    .unwrap();
    assert!(!third.reused);

    let all = ModerationRepo::list_filtered::<RegistrationRequest>(&pool, &filter())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn achievement_submission_stores_normalized_fields(pool: PgPool) {
    let author = SubmissionAuthor::new(None, "Jane Doe").unwrap();
    let input = CreateAchievement {
        title: "  Hackathon winner ".to_string(),
        description: "First place at the national hackathon.".to_string(),
        category: "Competition".to_string(),
        achieved_on: NaiveDate::from_ymd_opt(2025, 11, 2),
    };
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let achievement = NewAchievement::new(author, &input, today).unwrap();

    let submitted = ModerationRepo::submit(&pool, &achievement, DedupWindow::default())
        .await
        .unwrap();

    let record: Achievement = submitted.record;
    assert!(!submitted.reused);
    assert_eq!(record.title, "Hackathon winner");
    assert_eq!(record.category, "competition");
    assert_eq!(record.achieved_on, NaiveDate::from_ymd_opt(2025, 11, 2));
    assert_eq!(record.status, "pending");
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_moves_record_between_status_lists(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let blog = submit_blog(&pool, "Jane Doe", "My First Post").await;

    let change = ModerationRepo::update_status::<Blog>(
        &pool,
        blog.id,
        ModerationStatus::Approved,
        admin,
    )
    .await
    .unwrap()
    .unwrap();

    assert!(change.changed());
    assert_eq!(change.record.status, "approved");
    assert_eq!(change.record.reviewed_by, Some(admin));

    let pending = ModerationRepo::list_filtered::<Blog>(
        &pool,
        &ModerationFilter {
            status: Some(ModerationStatus::Pending),
            ..filter()
        },
    )
    .await
    .unwrap();
    assert!(pending.iter().all(|b| b.id != blog.id));

    let approved = ModerationRepo::list_filtered::<Blog>(
        &pool,
        &ModerationFilter {
            status: Some(ModerationStatus::Approved),
            ..filter()
        },
    )
    .await
    .unwrap();
    assert!(approved.iter().any(|b| b.id == blog.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_status_is_noop(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let blog = submit_blog(&pool, "Jane Doe", "My First Post").await;

    let change = ModerationRepo::update_status::<Blog>(
        &pool,
        blog.id,
        ModerationStatus::Pending,
        admin,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(change.transition, Transition::Unchanged);
    assert_eq!(change.record.updated_at, blog.updated_at);
    assert_eq!(change.record.reviewed_by, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn effective_transition_advances_updated_at(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let blog = submit_blog(&pool, "Jane Doe", "My First Post").await;

    let approved = ModerationRepo::update_status::<Blog>(
        &pool,
        blog.id,
        ModerationStatus::Approved,
        admin,
    )
    .await
    .unwrap()
    .unwrap();
    let denied = ModerationRepo::update_status::<Blog>(
        &pool,
        blog.id,
        ModerationStatus::Denied,
        admin,
    )
    .await
    .unwrap()
    .unwrap();

    assert!(approved.record.updated_at > blog.updated_at);
    assert!(denied.record.updated_at > approved.record.updated_at);
    assert_eq!(denied.record.created_at, blog.created_at);
    assert_matches!(
        denied.transition,
        Transition::Changed {
            from: ModerationStatus::Approved,
            to: ModerationStatus::Denied,
        }
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_status_of_missing_record_returns_none(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let result =
        ModerationRepo::update_status::<Blog>(&pool, 999_999, ModerationStatus::Approved, admin)
            .await
            .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_column_rejects_unknown_values(pool: PgPool) {
    let blog = submit_blog(&pool, "Jane Doe", "My First Post").await;
    let result = sqlx::query("UPDATE blogs SET status = 'archived' WHERE id = $1")
        .bind(blog.id)
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_author_returns_own_records_newest_first(pool: PgPool) {
    let first = submit_blog(&pool, "Jane Doe", "Post one").await;
    submit_blog(&pool, "John Smith", "Post two").await;
    let third = submit_blog(&pool, "Jane Doe", "Post three").await;

    let list = ModerationRepo::list_filtered::<Blog>(
        &pool,
        &ModerationFilter {
            author_identity: Some("Jane Doe".to_string()),
            ..filter()
        },
    )
    .await
    .unwrap();

    let ids: Vec<i64> = list.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_case_insensitive_and_literal(pool: PgPool) {
    submit_blog(&pool, "Jane Doe", "Campus Placements 2025").await;
    submit_blog(&pool, "Jane Doe", "100% attendance").await;
    submit_blog(&pool, "John Smith", "Reunion photos").await;

    let by_title = ModerationRepo::list_filtered::<Blog>(
        &pool,
        &ModerationFilter {
            search: Some("placements".to_string()),
            ..filter()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Campus Placements 2025");

    let by_author = ModerationRepo::list_filtered::<Blog>(
        &pool,
        &ModerationFilter {
            search: Some("smith".to_string()),
            ..filter()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_author.len(), 1);

    let wildcard = ModerationRepo::list_filtered::<Blog>(
        &pool,
        &ModerationFilter {
            search: Some("%".to_string()),
            ..filter()
        },
    )
    .await
    .unwrap();
    assert_eq!(wildcard.len(), 1);
    assert_eq!(wildcard[0].title, "100% attendance");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_paginates(pool: PgPool) {
    for i in 0..5 {
        submit_blog(&pool, "Jane Doe", &format!("Post {i}")).await;
    }

    let page = ModerationRepo::list_filtered::<Blog>(
        &pool,
        &ModerationFilter {
            limit: 2,
            offset: 2,
            ..filter()
        },
    )
    .await
    .unwrap();

    let titles: Vec<&str> = page.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Post 2", "Post 1"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn count_by_status_groups_records(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let a = submit_blog(&pool, "Jane Doe", "Post one").await;
    submit_blog(&pool, "Jane Doe", "Post two").await;
    ModerationRepo::update_status::<Blog>(&pool, a.id, ModerationStatus::Approved, admin)
        .await
        .unwrap();

    let counts = ModerationRepo::count_by_status::<Blog>(&pool).await.unwrap();
    let pairs: Vec<(&str, i64)> = counts.iter().map(|c| (c.status.as_str(), c.count)).collect();
    assert_eq!(pairs, vec![("approved", 1), ("pending", 1)]);
}
