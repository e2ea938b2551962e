//! Demo business data for a fresh database.
//!
//! Each business table is seeded only while it is empty, so running the seed
//! twice (or after the operator has entered data) changes nothing. Password
//! entries are never seeded.

use serde::Serialize;
use tracing::info;
use vb_core::entities::{Advance, Client, Expense, Liability, Project, Provision, Revenue};
use vb_core::enums::{AdvanceType, EntityKind, LiabilityType, ProjectStatus};
use vb_core::schema::Entity;

use crate::error::DatabaseError;
use crate::service::VaultService;

/// Outcome for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeededKind {
    pub kind: EntityKind,
    pub inserted: usize,
    /// The table already had rows, so nothing was inserted.
    pub skipped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub kinds: Vec<SeededKind>,
}

impl SeedReport {
    #[must_use]
    pub fn total_inserted(&self) -> usize {
        self.kinds.iter().map(|k| k.inserted).sum()
    }
}

fn revenue(source: &str, amount: f64, date: &str, gross_profit: f64) -> Revenue {
    Revenue {
        source: source.into(),
        amount,
        date: date.into(),
        gross_profit,
    }
}

fn expense(category: &str, amount: f64, date: &str, description: &str) -> Expense {
    Expense {
        category: category.into(),
        amount,
        date: date.into(),
        description: description.into(),
    }
}

fn provision(title: &str, amount: f64, date: &str, status: &str) -> Provision {
    Provision {
        title: title.into(),
        amount,
        date: date.into(),
        status: status.into(),
    }
}

fn advance(title: &str, amount: f64, date: &str, kind: AdvanceType) -> Advance {
    Advance {
        title: title.into(),
        amount,
        date: date.into(),
        kind,
    }
}

fn liability(title: &str, amount: f64, due_date: &str, kind: LiabilityType) -> Liability {
    Liability {
        title: title.into(),
        amount,
        due_date: due_date.into(),
        kind,
    }
}

fn client(name: &str, email: &str, phone: &str, company: &str, address: &str, joined: &str) -> Client {
    Client {
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        company: company.into(),
        address: address.into(),
        joined_date: joined.into(),
    }
}

fn project(
    name: &str,
    client: &str,
    start: &str,
    end: &str,
    status: ProjectStatus,
    budget: f64,
    description: &str,
) -> Project {
    Project {
        name: name.into(),
        client: client.into(),
        start_date: start.into(),
        end_date: Some(end.into()),
        status,
        budget: Some(budget),
        description: description.into(),
    }
}

impl VaultService {
    /// Insert the demo rows into every empty business table.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a count or insert fails. Tables seeded
    /// before the failure keep their rows.
    pub async fn seed_sample_data(&self) -> Result<SeedReport, DatabaseError> {
        let mut report = SeedReport::default();

        report.kinds.push(
            self.seed_kind(vec![
                revenue("Client Project", 50000.0, "2023-10-15", 35000.0),
                revenue("Consulting", 30000.0, "2023-10-20", 25000.0),
            ])
            .await?,
        );
        report.kinds.push(
            self.seed_kind(vec![
                expense("Office Supplies", 5000.0, "2023-10-10", "Monthly office supplies"),
                expense("Software Subscriptions", 10000.0, "2023-10-05", "Annual software licenses"),
            ])
            .await?,
        );
        report.kinds.push(
            self.seed_kind(vec![
                provision("Tax Provision", 15000.0, "2023-10-01", "Active"),
                provision("Insurance Provision", 8000.0, "2023-11-15", "Pending"),
            ])
            .await?,
        );
        report.kinds.push(
            self.seed_kind(vec![
                advance("Client XYZ Advance", 25000.0, "2023-09-15", AdvanceType::Received),
                advance("Vendor ABC Advance", 12000.0, "2023-10-20", AdvanceType::Paid),
            ])
            .await?,
        );
        report.kinds.push(
            self.seed_kind(vec![
                liability("Bank Loan", 250_000.0, "2024-06-30", LiabilityType::LongTerm),
                liability("Vendor Payment", 45000.0, "2023-11-15", LiabilityType::ShortTerm),
            ])
            .await?,
        );
        report.kinds.push(
            self.seed_kind(vec![
                client(
                    "John Smith",
                    "john.smith@abccorp.com",
                    "+1-555-123-4567",
                    "ABC Corporation",
                    "123 Business Ave, New York, NY 10001",
                    "2023-01-15",
                ),
                client(
                    "Sarah Johnson",
                    "sarah.j@xyzindustries.com",
                    "+1-555-987-6543",
                    "XYZ Industries",
                    "456 Corporate Blvd, Chicago, IL 60601",
                    "2023-03-22",
                ),
                client(
                    "Michael Brown",
                    "michael@localbusiness.com",
                    "+1-555-456-7890",
                    "Local Business",
                    "789 Main St, Boston, MA 02108",
                    "2023-05-10",
                ),
                client(
                    "Emily Davis",
                    "emily@techstart.io",
                    "+1-555-789-0123",
                    "Tech Start",
                    "321 Innovation Way, San Francisco, CA 94107",
                    "2023-07-08",
                ),
            ])
            .await?,
        );
        report.kinds.push(
            self.seed_kind(vec![
                project(
                    "Website Redesign",
                    "ABC Corporation",
                    "2023-09-01",
                    "2023-12-31",
                    ProjectStatus::InProgress,
                    75000.0,
                    "Complete redesign of corporate website",
                ),
                project(
                    "Mobile App Development",
                    "XYZ Industries",
                    "2023-10-15",
                    "2024-03-31",
                    ProjectStatus::Planning,
                    120_000.0,
                    "Development of iOS and Android mobile applications",
                ),
                project(
                    "SEO Optimization",
                    "Local Business",
                    "2023-08-15",
                    "2023-11-15",
                    ProjectStatus::Completed,
                    25000.0,
                    "Search engine optimization campaign",
                ),
            ])
            .await?,
        );

        info!(inserted = report.total_inserted(), "sample data seeded");
        Ok(report)
    }

    async fn seed_kind<E: Entity>(&self, rows: Vec<E>) -> Result<SeededKind, DatabaseError> {
        let store = self.records::<E>();
        if store.count().await? > 0 {
            return Ok(SeededKind {
                kind: E::KIND,
                inserted: 0,
                skipped: true,
            });
        }
        for row in &rows {
            store.insert(row).await?;
        }
        Ok(SeededKind {
            kind: E::KIND,
            inserted: rows.len(),
            skipped: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use vb_core::entities::{Expense, PasswordEntry};

    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn seeds_every_business_table() {
        let svc = test_service().await;
        let report = svc.seed_sample_data().await.unwrap();
        assert_eq!(report.kinds.len(), 7);
        assert_eq!(report.total_inserted(), 17);
        assert!(report.kinds.iter().all(|k| k.kind.is_business()));
        assert_eq!(svc.records::<PasswordEntry>().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn second_seed_is_noop() {
        let svc = test_service().await;
        svc.seed_sample_data().await.unwrap();
        let again = svc.seed_sample_data().await.unwrap();
        assert_eq!(again.total_inserted(), 0);
        assert!(again.kinds.iter().all(|k| k.skipped));
    }

    #[tokio::test]
    async fn non_empty_table_is_left_alone() {
        let svc = test_service().await;
        svc.records::<Expense>()
            .insert(&Expense {
                category: "Rent".into(),
                amount: 1200.0,
                date: "2024-01-01".into(),
                description: String::new(),
            })
            .await
            .unwrap();

        svc.seed_sample_data().await.unwrap();
        let expenses = svc.records::<Expense>().list().await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].fields.category, "Rent");
    }
}
