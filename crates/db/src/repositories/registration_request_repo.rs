//! Repository for the `registration_requests` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::moderation_repo::NewSubmission;
use crate::models::moderation::ModeratedRecord;
use crate::models::registration_request::{NewRegistrationRequest, RegistrationRequest};

/// Provides registration-request-specific writes.
pub struct RegistrationRequestRepo;

impl RegistrationRequestRepo {
    /// Insert a new pending registration request, returning the full row.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &NewRegistrationRequest,
    ) -> Result<RegistrationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO registration_requests \
                (author_identity, full_name, branch, registration_number, \
                 graduation_year, linkedin_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            RegistrationRequest::COLUMNS
        );
        sqlx::query_as::<_, RegistrationRequest>(&query)
            .bind(&input.author.identity)
            .bind(&input.full_name)
            .bind(&input.branch)
            .bind(&input.registration_number)
            .bind(input.graduation_year)
            .bind(&input.linkedin_url)
            .fetch_one(conn)
            .await
    }
}

#[async_trait]
impl NewSubmission for NewRegistrationRequest {
    type Record = RegistrationRequest;

    fn author_identity(&self) -> &str {
        &self.author.identity
    }

    fn dedup_key(&self) -> &str {
        &self.registration_number
    }

    async fn insert(&self, conn: &mut PgConnection) -> Result<RegistrationRequest, sqlx::Error> {
        RegistrationRequestRepo::insert(conn, self).await
    }
}
