//! Usage analytics.
//!
//! The backend exposes a pre-aggregated summary document and a per-day
//! breakdown; month-level figures are computed client-side by filtering and
//! summing the daily records (at most one month's worth of elements, so a
//! plain reduce).

use crate::access::DataAccess;
use crate::error::Result;
use crate::types::{DailyUsage, MonthlyUsage, UsageSummary};
use chrono::Datelike;
use std::sync::Arc;

/// Service for usage and cost analytics.
#[derive(Clone)]
pub struct UsageService {
    access: Arc<dyn DataAccess>,
}

impl std::fmt::Debug for UsageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageService")
            .field("adapter", &self.access.adapter_name())
            .finish()
    }
}

impl UsageService {
    #[must_use]
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self { access }
    }

    /// Backend-aggregated lifetime totals for an agent.
    pub async fn summary(&self, agent_id: &str) -> Result<Option<UsageSummary>> {
        self.access.get_usage_summary(agent_id).await
    }

    /// Per-day usage records for an agent.
    pub async fn daily(&self, agent_id: &str) -> Result<Vec<DailyUsage>> {
        self.access.list_daily_usage(agent_id).await
    }

    /// Usage totals for one calendar month.
    ///
    /// Sums the daily breakdown for the given month; when the backend
    /// returns no daily records at all, falls back to the aggregate summary
    /// document's totals.
    pub async fn monthly(&self, agent_id: &str, year: i32, month: u32) -> Result<MonthlyUsage> {
        let daily = self.access.list_daily_usage(agent_id).await?;
        if daily.is_empty() {
            let summary = self.access.get_usage_summary(agent_id).await?;
            return Ok(from_summary(summary, year, month));
        }
        Ok(aggregate_month(&daily, year, month))
    }

    /// Months with recorded usage for an agent.
    ///
    /// The listing endpoint is not implemented server-side yet; empty until
    /// it ships.
    pub async fn available_months(&self, _agent_id: &str) -> Result<Vec<(i32, u32)>> {
        Ok(Vec::new())
    }

    /// Organization-wide usage rollup.
    ///
    /// The rollup endpoint is not implemented server-side yet; empty until
    /// it ships.
    pub async fn organization_usage(&self, _org_id: &str) -> Result<Vec<MonthlyUsage>> {
        Ok(Vec::new())
    }
}

fn aggregate_month(daily: &[DailyUsage], year: i32, month: u32) -> MonthlyUsage {
    daily
        .iter()
        .filter(|day| day.date.year() == year && day.date.month() == month)
        .fold(
            MonthlyUsage {
                year,
                month,
                total_tokens: 0,
                total_cost: 0.0,
            },
            |mut acc, day| {
                acc.total_tokens += day.total_tokens;
                acc.total_cost += day.total_cost;
                acc
            },
        )
}

fn from_summary(summary: Option<UsageSummary>, year: i32, month: u32) -> MonthlyUsage {
    let (total_tokens, total_cost) = summary
        .map(|s| (s.total_tokens, s.total_cost))
        .unwrap_or((0, 0.0));
    MonthlyUsage {
        year,
        month,
        total_tokens,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32, tokens: u64, cost: f64) -> DailyUsage {
        DailyUsage {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            total_tokens: tokens,
            total_cost: cost,
            requests: None,
        }
    }

    #[test]
    fn test_month_filter_sums_only_that_month() {
        let daily = vec![
            day(2026, 7, 30, 100, 0.10),
            day(2026, 7, 31, 200, 0.20),
            day(2026, 8, 1, 1000, 1.00),
            day(2026, 8, 2, 500, 0.50),
        ];

        let july = aggregate_month(&daily, 2026, 7);
        assert_eq!(july.total_tokens, 300);
        assert!((july.total_cost - 0.30).abs() < 1e-9);

        let august = aggregate_month(&daily, 2026, 8);
        assert_eq!(august.total_tokens, 1500);
        assert!((august.total_cost - 1.50).abs() < 1e-9);
    }

    #[test]
    fn test_month_with_no_records_is_zero() {
        let daily = vec![day(2026, 7, 1, 100, 0.10)];
        let june = aggregate_month(&daily, 2026, 6);
        assert_eq!(june.total_tokens, 0);
        assert_eq!(june.total_cost, 0.0);
    }

    #[test]
    fn test_summary_fallback_uses_backend_totals() {
        let summary = UsageSummary {
            total_tokens: 4200,
            total_cost: 3.14,
            total_requests: None,
            period: None,
        };
        let monthly = from_summary(Some(summary), 2026, 8);
        assert_eq!(monthly.total_tokens, 4200);
        assert!((monthly.total_cost - 3.14).abs() < 1e-9);
        assert_eq!((monthly.year, monthly.month), (2026, 8));
    }

    #[test]
    fn test_summary_fallback_without_summary_is_zero() {
        let monthly = from_summary(None, 2026, 8);
        assert_eq!(monthly.total_tokens, 0);
        assert_eq!(monthly.total_cost, 0.0);
    }
}
