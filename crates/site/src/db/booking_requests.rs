//! Booking request repository.
//!
//! Insert and read only. There is deliberately no update or delete here:
//! a booking request is immutable once stored.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use gigbook_core::{BookingRequest, BookingRequestId, NewBookingRequest};

use super::RepositoryError;

const SELECT_COLUMNS: &str = "id, name, email, city_venue, event_date, details, \
                              marketing_opt_in, created_at";

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingStats {
    /// Total number of stored requests.
    pub total: i64,
    /// Requests whose sender opted in to marketing.
    pub opted_in: i64,
}

/// Internal row type for database queries.
#[derive(Debug, sqlx::FromRow)]
struct BookingRequestRow {
    id: BookingRequestId,
    name: String,
    email: String,
    city_venue: Option<String>,
    event_date: Option<String>,
    details: Option<String>,
    marketing_opt_in: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRequestRow> for BookingRequest {
    type Error = RepositoryError;

    fn try_from(row: BookingRequestRow) -> Result<Self, Self::Error> {
        if row.name.trim().is_empty() || row.email.trim().is_empty() {
            return Err(RepositoryError::DataCorruption(format!(
                "booking request {} has a blank name or email",
                row.id
            )));
        }

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            city_venue: row.city_venue,
            event_date: row.event_date,
            details: row.details,
            marketing_opt_in: row.marketing_opt_in,
            created_at: row.created_at,
        })
    }
}

/// Repository for booking request database operations.
pub struct BookingRequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRequestRepository<'a> {
    /// Create a new booking request repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a validated booking request and return the stored record.
    ///
    /// The id is generated here; `created_at` is assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate id.
    /// Returns `RepositoryError::Database` for any other database error.
    #[instrument(skip(self, new), fields(booking_id = tracing::field::Empty))]
    pub async fn create(&self, new: &NewBookingRequest) -> Result<BookingRequest, RepositoryError> {
        let id = BookingRequestId::generate();
        tracing::Span::current().record("booking_id", tracing::field::display(&id));

        let row = sqlx::query_as::<_, BookingRequestRow>(&format!(
            r"
            INSERT INTO site.booking_request
                (id, name, email, city_venue, event_date, details, marketing_opt_in)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SELECT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(new.name())
        .bind(new.email())
        .bind(new.city_venue())
        .bind(new.event_date())
        .bind(new.details())
        .bind(new.marketing_opt_in())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!("booking request {id} already exists"));
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Get a booking request by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row breaks an invariant.
    pub async fn get_by_id(
        &self,
        id: BookingRequestId,
    ) -> Result<Option<BookingRequest>, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRequestRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM site.booking_request WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List the most recent booking requests, newest first.
    ///
    /// Rows created in the same instant are ordered by id so that paging is stable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<BookingRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRequestRow>(&format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM site.booking_request
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "
        ))
        .bind(limit.max(0))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count stored requests and marketing opt-ins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<BookingStats, RepositoryError> {
        let (total, opted_in) = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE marketing_opt_in)
            FROM site.booking_request
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(BookingStats { total, opted_in })
    }
}
