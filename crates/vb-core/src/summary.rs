//! Financial summary types.

use serde::{Deserialize, Serialize};

/// Totals over revenues and expenses.
///
/// Revenue is measured by gross profit, not gross amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
}

impl FinancialSummary {
    #[must_use]
    pub fn from_totals(total_revenue: f64, total_expenses: f64) -> Self {
        Self {
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
        }
    }
}

/// Summary plus record counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(flatten)]
    pub summary: FinancialSummary,
    pub client_count: u64,
    pub project_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn net_profit_is_difference() {
        let summary = FinancialSummary::from_totals(60000.0, 15000.0);
        assert_eq!(
            summary,
            FinancialSummary {
                total_revenue: 60000.0,
                total_expenses: 15000.0,
                net_profit: 45000.0,
            }
        );
    }

    #[test]
    fn dashboard_serializes_flat() {
        let stats = DashboardStats {
            summary: FinancialSummary::from_totals(10.0, 4.0),
            client_count: 4,
            project_count: 3,
        };
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["net_profit"], serde_json::json!(6.0));
        assert_eq!(value["client_count"], serde_json::json!(4));
    }
}
