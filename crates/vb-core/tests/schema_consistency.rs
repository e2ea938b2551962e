//! Every entity must serialize to exactly the columns its schema declares,
//! in any order, so the generic store can bind and decode it.

use std::collections::BTreeSet;

use vb_core::entities::*;
use vb_core::enums::*;
use vb_core::schema::Entity;
use vb_core::validate::Validate;

macro_rules! columns_match_fields {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;
            assert!(val.validate().is_ok(), "sample {} must be valid", stringify!($ty));

            let value = serde_json::to_value(&val).unwrap();
            let keys: BTreeSet<String> = value.as_object().unwrap().keys().cloned().collect();
            let columns: BTreeSet<String> = <$ty>::SCHEMA
                .columns
                .iter()
                .map(|c| c.name.to_string())
                .collect();
            pretty_assertions::assert_eq!(keys, columns, "field/column mismatch for {}", stringify!($ty));

            let recovered: $ty = serde_json::from_value(value).unwrap();
            assert_eq!(recovered, val);
        }
    };
}

columns_match_fields!(
    password_columns,
    PasswordEntry,
    PasswordEntry {
        destination: "example.com".into(),
        user: "alice".into(),
        password: "p@ss".into(),
        notes: String::new(),
    }
);

columns_match_fields!(
    revenue_columns,
    Revenue,
    Revenue {
        source: "Consulting".into(),
        amount: 30000.0,
        date: "2023-10-20".into(),
        gross_profit: 25000.0,
    }
);

columns_match_fields!(
    expense_columns,
    Expense,
    Expense {
        category: "Office Supplies".into(),
        amount: 5000.0,
        date: "2023-10-10".into(),
        description: "Monthly office supplies".into(),
    }
);

columns_match_fields!(
    provision_columns,
    Provision,
    Provision {
        title: "Tax Provision".into(),
        amount: 15000.0,
        date: "2023-10-01".into(),
        status: "Active".into(),
    }
);

columns_match_fields!(
    advance_columns,
    Advance,
    Advance {
        title: "Client XYZ Advance".into(),
        amount: 25000.0,
        date: "2023-09-15".into(),
        kind: AdvanceType::Received,
    }
);

columns_match_fields!(
    liability_columns,
    Liability,
    Liability {
        title: "Bank Loan".into(),
        amount: 250_000.0,
        due_date: "2024-06-30".into(),
        kind: LiabilityType::LongTerm,
    }
);

columns_match_fields!(
    client_columns,
    Client,
    Client {
        name: "Emily Davis".into(),
        email: "emily@techstart.io".into(),
        phone: "+1-555-789-0123".into(),
        company: "Tech Start".into(),
        address: "321 Innovation Way, San Francisco, CA 94107".into(),
        joined_date: "2023-07-08".into(),
    }
);

columns_match_fields!(
    project_columns,
    Project,
    Project {
        name: "Mobile App Development".into(),
        client: "XYZ Industries".into(),
        start_date: "2023-10-15".into(),
        end_date: Some("2024-03-31".into()),
        status: ProjectStatus::Planning,
        budget: Some(120_000.0),
        description: "Development of iOS and Android mobile applications".into(),
    }
);

#[test]
fn kinds_are_distinct_tables() {
    let tables: BTreeSet<&str> = [
        PasswordEntry::SCHEMA.table,
        Revenue::SCHEMA.table,
        Expense::SCHEMA.table,
        Provision::SCHEMA.table,
        Advance::SCHEMA.table,
        Liability::SCHEMA.table,
        Client::SCHEMA.table,
        Project::SCHEMA.table,
    ]
    .into_iter()
    .collect();
    assert_eq!(tables.len(), EntityKind::ALL.len());
}
