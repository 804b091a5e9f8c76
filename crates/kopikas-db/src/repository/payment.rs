//! # Payment Repository
//!
//! Database operations for payment records, always scoped by owner.
//!
//! ## Scoping Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Owner Scoping                                       │
//! │                                                                         │
//! │  EVERY query carries `WHERE owner_id = ?`.                             │
//! │                                                                         │
//! │  A lookup for someone else's record and a lookup for a record that     │
//! │  never existed produce the same outcome (no row / zero rows            │
//! │  affected), so callers can't probe whether a foreign id exists.        │
//! │                                                                         │
//! │  Concurrent edits of the same id are last-write-wins by design; the    │
//! │  repository adds no locking of its own.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kopikas_core::{Payment, PaymentFields};

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

/// Columns selected for every Payment read, in struct order.
const PAYMENT_COLUMNS: &str = "id, owner_id, date, coffee_type, weight_kg, total_price, image";

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Gets a single payment by id, scoped to the owner.
    ///
    /// Returns `Ok(None)` both when the id doesn't exist and when it belongs
    /// to a different owner.
    pub async fn find_one(&self, owner_id: i64, id: i64) -> DbResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE owner_id = ?1 AND id = ?2"
        ))
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Gets all payments for one owner, newest transaction date first.
    ///
    /// Secondary ordering by id keeps same-day records stable.
    pub async fn find_all(&self, owner_id: i64) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments \
             WHERE owner_id = ?1 \
             ORDER BY date DESC, id DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Inserts a new payment and returns the stored record.
    ///
    /// ## Arguments
    /// * `owner_id` - owning user, immutable from here on
    /// * `fields` - validated payment fields
    /// * `image` - attachment reference, if an upload accompanied the create
    pub async fn insert(
        &self,
        owner_id: i64,
        fields: &PaymentFields,
        image: Option<&str>,
    ) -> DbResult<Payment> {
        debug!(owner_id, date = %fields.date, "Inserting payment");

        let result = sqlx::query(
            "INSERT INTO payments (owner_id, date, coffee_type, weight_kg, total_price, image) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(owner_id)
        .bind(fields.date)
        .bind(&fields.coffee_type)
        .bind(fields.weight_kg)
        .bind(fields.total_price)
        .bind(image)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        // Read back what SQLite stored rather than trusting our own echo
        self.find_one(owner_id, id)
            .await?
            .ok_or_else(|| DbError::not_found("Payment", id))
    }

    /// Updates an existing payment's fields, scoped to the owner.
    ///
    /// ## Arguments
    /// * `image` - `Some(reference)` replaces the stored reference,
    ///   `None` leaves the existing one untouched
    ///
    /// ## Errors
    /// `DbError::NotFound` when zero rows match (missing id or foreign owner).
    pub async fn update(
        &self,
        owner_id: i64,
        id: i64,
        fields: &PaymentFields,
        image: Option<&str>,
    ) -> DbResult<()> {
        debug!(owner_id, id, replace_image = image.is_some(), "Updating payment");

        let result = match image {
            Some(reference) => {
                sqlx::query(
                    "UPDATE payments SET \
                         date = ?3, coffee_type = ?4, weight_kg = ?5, total_price = ?6, \
                         image = ?7, updated_at = datetime('now') \
                     WHERE owner_id = ?1 AND id = ?2",
                )
                .bind(owner_id)
                .bind(id)
                .bind(fields.date)
                .bind(&fields.coffee_type)
                .bind(fields.weight_kg)
                .bind(fields.total_price)
                .bind(reference)
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "UPDATE payments SET \
                         date = ?3, coffee_type = ?4, weight_kg = ?5, total_price = ?6, \
                         updated_at = datetime('now') \
                     WHERE owner_id = ?1 AND id = ?2",
                )
                .bind(owner_id)
                .bind(id)
                .bind(fields.date)
                .bind(&fields.coffee_type)
                .bind(fields.weight_kg)
                .bind(fields.total_price)
                .execute(&self.pool)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Payment", id));
        }

        Ok(())
    }

    /// Deletes a payment, scoped to the owner.
    ///
    /// ## Errors
    /// `DbError::NotFound` when zero rows match. Attachment cleanup is the
    /// service's job; this method only removes the record.
    pub async fn delete(&self, owner_id: i64, id: i64) -> DbResult<()> {
        debug!(owner_id, id, "Deleting payment");

        let result = sqlx::query("DELETE FROM payments WHERE owner_id = ?1 AND id = ?2")
            .bind(owner_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Payment", id));
        }

        Ok(())
    }

    /// Counts all payments for one owner.
    pub async fn count(&self, owner_id: i64) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE owner_id = ?1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use kopikas_core::Rupiah;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn fields(date: &str, coffee_type: &str, weight_kg: f64, price: i64) -> PaymentFields {
        PaymentFields {
            date: date.parse().unwrap(),
            coffee_type: coffee_type.to_string(),
            weight_kg,
            total_price: Rupiah::new(price),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_one() {
        let db = test_db().await;
        let repo = db.payments();

        let created = repo
            .insert(7, &fields("2026-03-14", "Kopi Bubuk", 1.5, 199_000), None)
            .await
            .unwrap();

        assert_eq!(created.owner_id, 7);
        assert_eq!(created.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert_eq!(created.total_price, Rupiah::new(199_000));
        assert_eq!(created.image, None);

        let found = repo.find_one(7, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_one_is_owner_scoped() {
        let db = test_db().await;
        let repo = db.payments();

        let created = repo
            .insert(7, &fields("2026-03-14", "Kopi Bubuk", 1.0, 100_000), None)
            .await
            .unwrap();

        // Same id, different owner: indistinguishable from missing
        assert!(repo.find_one(8, created.id).await.unwrap().is_none());
        assert!(repo.find_one(7, 9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_is_date_descending() {
        let db = test_db().await;
        let repo = db.payments();

        repo.insert(7, &fields("2026-01-10", "Kopi Bubuk", 1.0, 100_000), None)
            .await
            .unwrap();
        repo.insert(7, &fields("2026-03-05", "Kopi Bijian", 2.0, 200_000), None)
            .await
            .unwrap();
        repo.insert(7, &fields("2026-02-20", "Kopi Bubuk", 1.0, 150_000), None)
            .await
            .unwrap();
        // Foreign owner's record must never leak into the list
        repo.insert(8, &fields("2026-12-31", "Kopi Bubuk", 1.0, 999_000), None)
            .await
            .unwrap();

        let all = repo.find_all(7).await.unwrap();
        let dates: Vec<String> = all.iter().map(|p| p.date.to_string()).collect();

        assert_eq!(dates, ["2026-03-05", "2026-02-20", "2026-01-10"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_optionally_image() {
        let db = test_db().await;
        let repo = db.payments();

        let created = repo
            .insert(
                7,
                &fields("2026-03-14", "Kopi Bubuk", 1.0, 100_000),
                Some("/uploads/a.jpg"),
            )
            .await
            .unwrap();

        // Update without touching the image
        repo.update(7, created.id, &fields("2026-03-15", "Kopi Bijian", 2.0, 250_000), None)
            .await
            .unwrap();

        let updated = repo.find_one(7, created.id).await.unwrap().unwrap();
        assert_eq!(updated.coffee_type, "Kopi Bijian");
        assert_eq!(updated.image.as_deref(), Some("/uploads/a.jpg"));

        // Update replacing the image
        repo.update(
            7,
            created.id,
            &fields("2026-03-15", "Kopi Bijian", 2.0, 250_000),
            Some("/uploads/b.jpg"),
        )
        .await
        .unwrap();

        let replaced = repo.find_one(7, created.id).await.unwrap().unwrap();
        assert_eq!(replaced.image.as_deref(), Some("/uploads/b.jpg"));
    }

    #[tokio::test]
    async fn test_update_foreign_or_missing_is_not_found() {
        let db = test_db().await;
        let repo = db.payments();

        let created = repo
            .insert(7, &fields("2026-03-14", "Kopi Bubuk", 1.0, 100_000), None)
            .await
            .unwrap();

        let err = repo
            .update(8, created.id, &fields("2026-03-15", "Kopi Bubuk", 1.0, 100_000), None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        // The record is untouched
        let unchanged = repo.find_one(7, created.id).await.unwrap().unwrap();
        assert_eq!(unchanged.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() {
        let db = test_db().await;
        let repo = db.payments();

        let created = repo
            .insert(7, &fields("2026-03-14", "Kopi Bubuk", 1.0, 100_000), None)
            .await
            .unwrap();

        assert!(repo.delete(8, created.id).await.unwrap_err().is_not_found());
        assert_eq!(repo.count(7).await.unwrap(), 1);

        repo.delete(7, created.id).await.unwrap();
        assert_eq!(repo.count(7).await.unwrap(), 0);

        assert!(repo.delete(7, created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_negative_price() {
        let db = test_db().await;
        let repo = db.payments();

        // Bypass boundary validation on purpose: the schema is the last line
        let bad = PaymentFields {
            date: "2026-03-14".parse().unwrap(),
            coffee_type: "Kopi Bubuk".to_string(),
            weight_kg: 1.0,
            total_price: Rupiah::new(-1),
        };

        let err = repo.insert(7, &bad, None).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
