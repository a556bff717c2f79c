//! PostgreSQL implementation of PollRepository.
//!
//! Multi-row writes run inside one `sqlx::Transaction`. Returning early
//! drops the transaction, which rolls it back, so every `?` below is also a
//! rollback point. Poll totals are maintained by the `votes` trigger; option
//! counters get a relative increment in the vote transaction.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use crate::domain::foundation::{
    DomainError, ErrorCode, OptionId, PollId, Timestamp, VoteId, VoterId,
};
use crate::domain::poll::{NewVote, Poll, PollDraft, PollOption, PollWithOptions, Vote};
use crate::ports::{HealthCheck, ListOptions, PollRepository, PoolStats};

/// Constraint guarding option-belongs-to-poll on `votes`.
const OPTION_IN_POLL_CONSTRAINT: &str = "fk_votes_option_in_poll";

const POLL_COLUMNS: &str =
    "id, question, description, created_at, expires_at, is_active, total_votes";

const OPTION_COLUMNS: &str = "id, poll_id, option_text, vote_count, position, created_at";

/// PostgreSQL implementation of the PollRepository port.
#[derive(Clone)]
pub struct PostgresPollRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresPollRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresPollRepository")
            .field("pool", &"PgPool")
            .finish()
    }
}

impl PostgresPollRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_options_for(
        &self,
        poll_ids: &[uuid::Uuid],
    ) -> Result<HashMap<PollId, Vec<PollOption>>, DomainError> {
        if poll_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(&format!(
            "SELECT {} FROM poll_options WHERE poll_id = ANY($1) ORDER BY poll_id, position ASC",
            OPTION_COLUMNS
        ))
        .bind(poll_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch options", e))?;

        let mut grouped: HashMap<PollId, Vec<PollOption>> = HashMap::new();
        for row in &rows {
            let option = row_to_option(row)?;
            grouped.entry(*option.poll_id()).or_default().push(option);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl PollRepository for PostgresPollRepository {
    async fn create_poll_with_options(
        &self,
        draft: &PollDraft,
    ) -> Result<PollWithOptions, DomainError> {
        let poll_id = PollId::new();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin transaction", e))?;

        let row = sqlx::query(
            r#"
            INSERT INTO polls (id, question, description, expires_at, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING created_at, total_votes
            "#,
        )
        .bind(poll_id.as_uuid())
        .bind(draft.question())
        .bind(draft.description())
        .bind(draft.expires_at().map(|t| *t.as_datetime()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database("insert poll", e))?;

        let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
        let total_votes: i64 = get(&row, "total_votes")?;

        let mut options = Vec::with_capacity(draft.options().len());
        for (position, text) in draft.positioned_options() {
            let option_id = OptionId::new();
            let row = sqlx::query(
                r#"
                INSERT INTO poll_options (id, poll_id, option_text, position)
                VALUES ($1, $2, $3, $4)
                RETURNING created_at, vote_count
                "#,
            )
            .bind(option_id.as_uuid())
            .bind(poll_id.as_uuid())
            .bind(text)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::database("insert option", e))?;

            let option_created: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
            let vote_count: i64 = get(&row, "vote_count")?;
            options.push(PollOption::reconstitute(
                option_id,
                poll_id,
                text.to_string(),
                counter(vote_count),
                position,
                Timestamp::from_datetime(option_created),
            ));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit poll", e))?;

        let poll = Poll::reconstitute(
            poll_id,
            draft.question().to_string(),
            draft.description().map(str::to_string),
            Timestamp::from_datetime(created_at),
            draft.expires_at().copied(),
            true,
            counter(total_votes),
        );

        Ok(PollWithOptions { poll, options })
    }

    async fn find_by_id(&self, id: &PollId) -> Result<Option<Poll>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM polls WHERE id = $1", POLL_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch poll", e))?;

        row.as_ref().map(row_to_poll).transpose()
    }

    async fn find_options(&self, poll_id: &PollId) -> Result<Vec<PollOption>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM poll_options WHERE poll_id = $1 ORDER BY position ASC",
            OPTION_COLUMNS
        ))
        .bind(poll_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch options", e))?;

        rows.iter().map(row_to_option).collect()
    }

    async fn list_polls(&self, options: &ListOptions) -> Result<Vec<Poll>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM polls
            WHERE (NOT $1 OR (is_active AND (expires_at IS NULL OR expires_at > NOW())))
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
            POLL_COLUMNS
        ))
        .bind(options.active_only)
        .bind(options.limit as i64)
        .bind(options.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list polls", e))?;

        rows.iter().map(row_to_poll).collect()
    }

    async fn list_polls_with_options(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<PollWithOptions>, DomainError> {
        let polls = self.list_polls(options).await?;
        let ids: Vec<uuid::Uuid> = polls.iter().map(|p| *p.id().as_uuid()).collect();
        let mut grouped = self.fetch_options_for(&ids).await?;

        Ok(polls
            .into_iter()
            .map(|poll| {
                let options = grouped.remove(poll.id()).unwrap_or_default();
                PollWithOptions { poll, options }
            })
            .collect())
    }

    async fn count_polls(&self, active_only: bool) -> Result<u64, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM polls
            WHERE (NOT $1 OR (is_active AND (expires_at IS NULL OR expires_at > NOW())))
            "#,
        )
        .bind(active_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("count polls", e))?;

        let total: i64 = get(&row, "total")?;
        Ok(counter(total))
    }

    async fn cast_vote(&self, vote: &NewVote) -> Result<Vote, DomainError> {
        let vote_id = VoteId::new();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin transaction", e))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO votes (id, poll_id, option_id, voter_identifier)
            VALUES ($1, $2, $3, $4)
            RETURNING voted_at
            "#,
        )
        .bind(vote_id.as_uuid())
        .bind(vote.poll_id.as_uuid())
        .bind(vote.option_id.as_uuid())
        .bind(vote.voter.as_str())
        .fetch_one(&mut *tx)
        .await;

        let row = match inserted {
            Ok(row) => row,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(DomainError::new(
                    ErrorCode::DuplicateVote,
                    format!("Voter already voted on poll {}", vote.poll_id),
                ));
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                let code = foreign_key_code(db_err.constraint());
                return Err(DomainError::new(
                    code,
                    format!(
                        "Option {} is not part of poll {}",
                        vote.option_id, vote.poll_id
                    ),
                ));
            }
            Err(e) => return Err(DomainError::database("insert vote", e)),
        };
        let voted_at: chrono::DateTime<chrono::Utc> = get(&row, "voted_at")?;

        let updated = sqlx::query(
            r#"
            UPDATE poll_options
            SET vote_count = vote_count + 1
            WHERE id = $1 AND poll_id = $2
            "#,
        )
        .bind(vote.option_id.as_uuid())
        .bind(vote.poll_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("increment option count", e))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidOption,
                format!("Option {} is not part of poll {}", vote.option_id, vote.poll_id),
            ));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit vote", e))?;

        Ok(Vote {
            id: vote_id,
            poll_id: vote.poll_id,
            option_id: vote.option_id,
            voter: vote.voter.clone(),
            voted_at: Timestamp::from_datetime(voted_at),
        })
    }

    async fn has_voted(
        &self,
        poll_id: &PollId,
        voter: &VoterId,
    ) -> Result<Option<OptionId>, DomainError> {
        let row = sqlx::query(
            "SELECT option_id FROM votes WHERE poll_id = $1 AND voter_identifier = $2",
        )
        .bind(poll_id.as_uuid())
        .bind(voter.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("check vote", e))?;

        row.map(|r| get::<uuid::Uuid>(&r, "option_id").map(OptionId::from_uuid))
            .transpose()
    }

    async fn deactivate(&self, id: &PollId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE polls SET is_active = FALSE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("deactivate poll", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PollNotFound,
                format!("Poll not found: {}", id),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for PostgresPollRepository {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("ping database", e))?;
        Ok(())
    }

    fn pool_stats(&self) -> Option<PoolStats> {
        let open = self.pool.size();
        let idle = self.pool.num_idle() as u32;
        Some(PoolStats {
            open_connections: open,
            in_use: open.saturating_sub(idle),
            idle,
            max_connections: self.pool.options().get_max_connections(),
        })
    }
}

// === Row mapping ===

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read column {}: {}", column, e),
        )
    })
}

fn row_to_poll(row: &PgRow) -> Result<Poll, DomainError> {
    let expires_at: Option<chrono::DateTime<chrono::Utc>> = get(row, "expires_at")?;
    Ok(Poll::reconstitute(
        PollId::from_uuid(get(row, "id")?),
        get(row, "question")?,
        get(row, "description")?,
        Timestamp::from_datetime(get(row, "created_at")?),
        expires_at.map(Timestamp::from_datetime),
        get(row, "is_active")?,
        counter(get(row, "total_votes")?),
    ))
}

fn row_to_option(row: &PgRow) -> Result<PollOption, DomainError> {
    let position: i32 = get(row, "position")?;
    Ok(PollOption::reconstitute(
        OptionId::from_uuid(get(row, "id")?),
        PollId::from_uuid(get(row, "poll_id")?),
        get(row, "option_text")?,
        counter(get(row, "vote_count")?),
        position.max(0) as u32,
        Timestamp::from_datetime(get(row, "created_at")?),
    ))
}

/// Counters are CHECKed non-negative in the schema.
fn counter(raw: i64) -> u64 {
    raw.max(0) as u64
}

/// Maps a foreign-key violation on `votes` to the error the caller sees.
fn foreign_key_code(constraint: Option<&str>) -> ErrorCode {
    match constraint {
        Some(OPTION_IN_POLL_CONSTRAINT) => ErrorCode::InvalidOption,
        _ => ErrorCode::PollNotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_clamps_negative_values() {
        assert_eq!(counter(-1), 0);
        assert_eq!(counter(42), 42);
    }

    #[test]
    fn option_constraint_maps_to_invalid_option() {
        assert_eq!(
            foreign_key_code(Some("fk_votes_option_in_poll")),
            ErrorCode::InvalidOption
        );
    }

    #[test]
    fn poll_constraint_maps_to_not_found() {
        assert_eq!(
            foreign_key_code(Some("votes_poll_id_fkey")),
            ErrorCode::PollNotFound
        );
        assert_eq!(foreign_key_code(None), ErrorCode::PollNotFound);
    }
}
