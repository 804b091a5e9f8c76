//! # Reporting Service
//!
//! Thin orchestration over the pure aggregation functions in
//! `kopikas_core::report`: loads the caller's full payment history once,
//! then derives every figure from that single snapshot so the dashboard
//! numbers are mutually consistent.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ServiceResult;
use kopikas_core::report;
use kopikas_core::{DashboardStats, ReportRow, CANONICAL_COFFEE_TYPES};
use kopikas_db::{Database, PaymentRepository};

// =============================================================================
// Report Service
// =============================================================================

/// Read-only reporting over a caller's payment history.
pub struct ReportService {
    repo: PaymentRepository,
}

impl ReportService {
    /// Creates the service on top of an open database handle.
    pub fn new(db: &Database) -> Self {
        ReportService { repo: db.payments() }
    }

    /// Computes the full dashboard for one owner.
    ///
    /// `now` anchors the growth comparison windows; the transport layer
    /// passes today's date so tests can pin it.
    pub async fn dashboard(&self, owner_id: i64, now: NaiveDate) -> ServiceResult<DashboardStats> {
        let records = self.repo.find_all(owner_id).await?;
        debug!(owner_id, records = records.len(), "Computing dashboard");
        Ok(report::dashboard(&records, now))
    }

    /// Totals without the growth and breakdown sections, for lightweight
    /// header widgets.
    pub async fn summary(&self, owner_id: i64) -> ServiceResult<kopikas_core::Summary> {
        let records = self.repo.find_all(owner_id).await?;
        Ok(report::summarize(&records))
    }

    /// Flattens the history into export rows, newest first, with display
    /// dates and the canonical category labels passed through verbatim.
    pub async fn export(&self, owner_id: i64) -> ServiceResult<Vec<ReportRow>> {
        let records = self.repo.find_all(owner_id).await?;
        Ok(report::report_rows(&records))
    }

    /// The labels the category breakdown always reports, in order.
    pub fn category_labels(&self) -> &'static [&'static str] {
        &CANONICAL_COFFEE_TYPES
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
