//! Generic moderation workflow over the moderated tables.
//!
//! The same three operations serve achievements, blogs and registration
//! requests: duplicate-safe submission, status transition and filtered
//! listing. Table-specific SQL lives behind [`ModeratedRecord`] and
//! [`NewSubmission`].

use alumni_core::moderation::{plan_transition, ModerationStatus, Transition};
use alumni_core::search::ilike_pattern;
use alumni_core::submission::DedupWindow;
use alumni_core::types::DbId;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::models::moderation::{
    ModeratedRecord, ModerationFilter, StatusChange, StatusCount, Submitted,
};

/// A validated submission that knows how to insert itself.
#[async_trait]
pub trait NewSubmission: Send + Sync {
    type Record: ModeratedRecord;

    /// Normalised author identity.
    fn author_identity(&self) -> &str;

    /// Value of the record's title-equivalent column.
    fn dedup_key(&self) -> &str;

    /// Insert a new `pending` row and return it.
    async fn insert(&self, conn: &mut PgConnection) -> Result<Self::Record, sqlx::Error>;
}

/// Provides the moderation workflow for any [`ModeratedRecord`].
pub struct ModerationRepo;

impl ModerationRepo {
    /// Insert `input` unless the same author submitted the same
    /// title-equivalent value within `window`, in which case the newest
    /// such record is returned with `reused = true`.
    ///
    /// The lookup and insert share one transaction holding an advisory
    /// lock keyed on (table, author, dedup key), so concurrent identical
    /// submissions serialise and only the first inserts.
    pub async fn submit<N: NewSubmission>(
        pool: &PgPool,
        input: &N,
        window: DedupWindow,
    ) -> Result<Submitted<N::Record>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_key = format!(
            "{}\u{1f}{}\u{1f}{}",
            N::Record::TABLE,
            input.author_identity(),
            input.dedup_key()
        );
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(&lock_key)
            .execute(&mut *tx)
            .await?;

        let existing = Self::find_recent_duplicate::<N::Record>(
            &mut *tx,
            input.author_identity(),
            input.dedup_key(),
            window,
        )
        .await?;

        if let Some(record) = existing {
            tx.commit().await?;
            tracing::debug!(
                table = N::Record::TABLE,
                id = record.id(),
                "Duplicate submission suppressed",
            );
            return Ok(Submitted {
                record,
                reused: true,
            });
        }

        let record = input.insert(&mut *tx).await?;
        tx.commit().await?;

        Ok(Submitted {
            record,
            reused: false,
        })
    }

    /// Newest record by `author_identity` with the same dedup key created
    /// within `window` of the transaction clock.
    pub async fn find_recent_duplicate<T: ModeratedRecord>(
        conn: &mut PgConnection,
        author_identity: &str,
        dedup_key: &str,
        window: DedupWindow,
    ) -> Result<Option<T>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM {table} \
             WHERE author_identity = $1 AND {key} = $2 \
               AND created_at > NOW() - make_interval(secs => $3) \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1",
            cols = T::COLUMNS,
            table = T::TABLE,
            key = T::DEDUP_COLUMN,
        );
        sqlx::query_as::<_, T>(&query)
            .bind(author_identity)
            .bind(dedup_key)
            .bind(window.as_secs_f64())
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find a record by ID.
    pub async fn find_by_id<T: ModeratedRecord>(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<T>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE);
        sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a record to `status` on behalf of reviewer `reviewer_id`.
    ///
    /// Returns `None` if the record does not exist. Requesting the current
    /// status is a no-op: nothing is written and `updated_at` keeps its
    /// value. An effective change sets `reviewed_by` and advances
    /// `updated_at` to `max(now, previous + 1µs)` so it strictly increases.
    pub async fn update_status<T: ModeratedRecord>(
        pool: &PgPool,
        id: DbId,
        status: ModerationStatus,
        reviewer_id: DbId,
    ) -> Result<Option<StatusChange<T>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!(
            "SELECT {} FROM {} WHERE id = $1 FOR UPDATE",
            T::COLUMNS,
            T::TABLE
        );
        let Some(current) = sqlx::query_as::<_, T>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let current_status = current
            .status()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        let transition = plan_transition(current_status, status);
        if transition == Transition::Unchanged {
            tx.commit().await?;
            return Ok(Some(StatusChange {
                record: current,
                transition,
            }));
        }

        let update = format!(
            "UPDATE {} SET \
                status = $2, \
                reviewed_by = $3, \
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond') \
             WHERE id = $1 \
             RETURNING {}",
            T::TABLE,
            T::COLUMNS
        );
        let record = sqlx::query_as::<_, T>(&update)
            .bind(id)
            .bind(status.as_str())
            .bind(reviewer_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(StatusChange { record, transition }))
    }

    /// List records matching `filter`, newest first.
    ///
    /// The free-text search is a case-insensitive substring match over the
    /// table's search columns and `author_identity`.
    pub async fn list_filtered<T: ModeratedRecord>(
        pool: &PgPool,
        filter: &ModerationFilter,
    ) -> Result<Vec<T>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.author_identity.is_some() {
            conditions.push(format!("author_identity = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            let matches: Vec<String> = T::SEARCH_COLUMNS
                .iter()
                .chain(std::iter::once(&"author_identity"))
                .map(|col| format!("{col} ILIKE ${param_idx}"))
                .collect();
            conditions.push(format!("({})", matches.join(" OR ")));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {cols} FROM {table} {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1,
            cols = T::COLUMNS,
            table = T::TABLE,
        );

        let mut q = sqlx::query_as::<_, T>(&query);

        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(author) = &filter.author_identity {
            q = q.bind(author.as_str());
        }
        if let Some(term) = &filter.search {
            q = q.bind(ilike_pattern(term));
        }
        q = q.bind(filter.limit).bind(filter.offset);

        q.fetch_all(pool).await
    }

    /// Count records per status.
    pub async fn count_by_status<T: ModeratedRecord>(
        pool: &PgPool,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        let query = format!(
            "SELECT status, COUNT(*) AS count FROM {} GROUP BY status ORDER BY status",
            T::TABLE
        );
        sqlx::query_as::<_, StatusCount>(&query).fetch_all(pool).await
    }
}
