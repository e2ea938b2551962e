//! Financial summary and dashboard statistics.

use vb_core::entities::{Client, Project};
use vb_core::summary::{DashboardStats, FinancialSummary};

use crate::error::DatabaseError;
use crate::helpers::get_total;
use crate::service::VaultService;

impl VaultService {
    /// Revenue (by gross profit) minus expenses. Empty tables total `0.0`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either aggregate query fails.
    pub async fn financial_summary(&self) -> Result<FinancialSummary, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT (SELECT TOTAL(gross_profit) FROM revenues),
                        (SELECT TOTAL(amount) FROM expenses)",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let total_revenue = get_total(&row, 0)?;
        let total_expenses = get_total(&row, 1)?;
        Ok(FinancialSummary::from_totals(total_revenue, total_expenses))
    }

    /// Financial summary plus client and project counts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query fails.
    pub async fn dashboard(&self) -> Result<DashboardStats, DatabaseError> {
        Ok(DashboardStats {
            summary: self.financial_summary().await?,
            client_count: self.records::<Client>().count().await?,
            project_count: self.records::<Project>().count().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vb_core::entities::{Expense, Revenue};
    use vb_core::summary::FinancialSummary;

    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn empty_summary_is_zero() {
        let svc = test_service().await;
        assert_eq!(svc.financial_summary().await.unwrap(), FinancialSummary::default());
    }

    #[tokio::test]
    async fn revenue_counts_gross_profit_not_amount() {
        let svc = test_service().await;
        svc.records::<Revenue>()
            .insert(&Revenue {
                source: "Consulting".into(),
                amount: 30000.0,
                date: "2023-10-20".into(),
                gross_profit: 25000.0,
            })
            .await
            .unwrap();
        svc.records::<Expense>()
            .insert(&Expense {
                category: "Office Supplies".into(),
                amount: 5000.0,
                date: "2023-10-10".into(),
                description: String::new(),
            })
            .await
            .unwrap();

        let summary = svc.financial_summary().await.unwrap();
        assert_eq!(summary, FinancialSummary::from_totals(25000.0, 5000.0));
        assert!((summary.net_profit - 20000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn dashboard_counts_clients_and_projects() {
        let svc = test_service().await;
        svc.seed_sample_data().await.unwrap();
        let stats = svc.dashboard().await.unwrap();
        assert_eq!(stats.client_count, 4);
        assert_eq!(stats.project_count, 3);
        // 35000 + 25000 gross profit, 5000 + 10000 expenses
        assert_eq!(stats.summary, FinancialSummary::from_totals(60000.0, 15000.0));
    }
}
