//! Repository for the `contact_queries` table.

use alumni_core::search::ilike_pattern;
use alumni_core::types::DbId;
use sqlx::PgPool;

use crate::models::inquiry::{CreateInquiry, Inquiry};

/// Column list for `contact_queries` queries.
const COLUMNS: &str = "\
    id, name, email, subject, message, is_resolved, resolved_by, resolved_at, \
    created_at, updated_at";

/// Provides CRUD operations for contact queries.
pub struct InquiryRepo;

impl InquiryRepo {
    /// Insert a new contact query, returning the full row.
    pub async fn create(pool: &PgPool, input: &CreateInquiry) -> Result<Inquiry, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_queries (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Find a contact query by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_queries WHERE id = $1");
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List contact queries, optionally filtered by resolution state and a
    /// case-insensitive search over name, e-mail, subject and message.
    ///
    /// Results are ordered newest-first.
    pub async fn list_filtered(
        pool: &PgPool,
        resolved: Option<bool>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Inquiry>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if resolved.is_some() {
            conditions.push(format!("is_resolved = ${param_idx}"));
            param_idx += 1;
        }
        if search.is_some() {
            conditions.push(format!(
                "(name ILIKE ${param_idx} OR email ILIKE ${param_idx} \
                  OR subject ILIKE ${param_idx} OR message ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM contact_queries {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Inquiry>(&query);

        if let Some(r) = resolved {
            q = q.bind(r);
        }
        if let Some(term) = search {
            q = q.bind(ilike_pattern(term));
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Mark a query resolved by `admin_id`.
    ///
    /// Already-resolved queries are returned untouched. Returns `None` if
    /// no query with the given `id` exists.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_queries SET \
                is_resolved = true, resolved_by = $2, resolved_at = NOW() \
             WHERE id = $1 AND is_resolved = false \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .bind(admin_id)
            .fetch_optional(pool)
            .await?;

        match updated {
            Some(inquiry) => Ok(Some(inquiry)),
            None => Self::find_by_id(pool, id).await,
        }
    }
}
