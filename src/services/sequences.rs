//! Scoped document number generation.
//!
//! Numbers look like `PO202501-0001`: prefix, period key, zero-padded suffix.
//! Each (company, prefix, period) scope has one counter row which is read
//! under an exclusive row lock and incremented in the caller's transaction,
//! so two concurrent callers can never be handed the same number.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
    SqlErr,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    entities::sequence_counter,
    errors::ServiceError,
    workflow::DocumentKind,
};

/// Width of the numeric suffix.
const SUFFIX_WIDTH: usize = 4;

/// Period scope key for a document date, e.g. `202501`.
pub fn period_key(date: DateTime<Utc>) -> String {
    date.format("%Y%m").to_string()
}

fn format_number(prefix: &str, period: &str, value: i64) -> String {
    format!("{prefix}{period}-{value:0width$}", width = SUFFIX_WIDTH)
}

/// Issues the next document number for `kind` in the company/period scope.
///
/// Must be called on an open transaction; the increment commits or rolls back
/// with the document insert it numbers. A concurrent first-use insert for the
/// same scope surfaces as [`ServiceError::ConcurrencyConflict`], which the
/// caller may retry.
pub async fn next_number<C: ConnectionTrait>(
    conn: &C,
    company_id: Uuid,
    kind: DocumentKind,
    document_date: DateTime<Utc>,
) -> Result<String, ServiceError> {
    let prefix = kind.number_prefix();
    let period = period_key(document_date);

    let existing = sequence_counter::Entity::find()
        .filter(sequence_counter::Column::CompanyId.eq(company_id))
        .filter(sequence_counter::Column::Prefix.eq(prefix))
        .filter(sequence_counter::Column::PeriodKey.eq(period.as_str()))
        .lock_exclusive()
        .one(conn)
        .await?;

    let value = match existing {
        Some(counter) => {
            let next = counter.last_value + 1;
            let mut active: sequence_counter::ActiveModel = counter.into();
            active.last_value = Set(next);
            active.updated_at = Set(Utc::now());
            active.update(conn).await?;
            next
        }
        None => {
            // First document of a new scope starts at 1. The unique index on
            // (company, prefix, period) catches a concurrent first insert.
            let counter = sequence_counter::ActiveModel {
                company_id: Set(company_id),
                prefix: Set(prefix.to_string()),
                period_key: Set(period.clone()),
                last_value: Set(1),
                updated_at: Set(Utc::now()),
                ..Default::default()
            };
            counter.insert(conn).await.map_err(|err| {
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    ServiceError::ConcurrencyConflict(format!(
                        "sequence scope {prefix}{period} was initialized concurrently"
                    ))
                } else {
                    ServiceError::DatabaseError(err)
                }
            })?;
            1
        }
    };

    let number = format_number(prefix, &period, value);
    debug!(%company_id, %kind, %number, "issued document number");
    Ok(number)
}
