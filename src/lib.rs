//! # Tax Follow-up
//!
//! Ingests the published sheet used to follow up pending input VAT
//! (ภาษีซื้อรอโอนคงค้าง, process D7), ages every record from its payment date
//! and prepares everything the follow-up dashboard shows.
//!
//! ## Core Concepts
//!
//! - **Sheet dialect**: a small CSV dialect where every `"` toggles quoted
//!   mode; see [`csv`]
//! - **Aging**: days since the payment date, day-first, Buddhist-era aware,
//!   never negative; see [`aging`]
//! - **Urgency**: `low`/`medium`/`high`/`critical` at the 15/30/60 day marks
//! - **Silent defaults**: bad rows are dropped, bad dates age zero, bad
//!   amounts read as zero, and a failed download yields no records
//!
//! ## Example
//!
//! ```rust,ignore
//! use tax_followup::*;
//!
//! let client = reqwest::Client::new();
//! let records = fetch_tax_data(&client, &SheetSource::from_env()).await;
//! let dashboard = DashboardSnapshot::from_records(records);
//! println!("{} overdue", dashboard.summary.overdue_count);
//! ```

pub mod aging;
pub mod config;
pub mod csv;
pub mod error;
pub mod fetch;
pub mod mapper;
pub mod record;
pub mod stats;
pub mod view;

#[cfg(feature = "loader")]
pub mod loader;

#[cfg(feature = "gemini")]
pub mod llm;

pub use aging::{aging_days, local_today, parse_payment_date, Urgency};
pub use config::SheetSource;
pub use csv::{parse_csv, parse_line, RawRow};
pub use error::{Result, TaxFollowupError};
pub use fetch::{fetch_csv, fetch_tax_data, try_fetch_tax_data};
pub use mapper::{map_rows, parse_amount, records_from_csv, records_from_csv_now};
pub use record::{record_json_schema, TaxRecord};
pub use stats::*;
pub use view::{project, FieldValue, RecordField, SortConfig, SortDirection, ViewState};

#[cfg(feature = "loader")]
pub use loader::{PendingLoad, Refresher};

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything the dashboard renders from one load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub records: Vec<TaxRecord>,
    pub summary: SummaryStats,
    pub aging_buckets: Vec<LabelCount>,
    pub business_types: Vec<LabelCount>,
    pub statuses: Vec<LabelCount>,
    pub payment_flags: PaymentFlags,
}

impl DashboardSnapshot {
    pub fn from_records(records: Vec<TaxRecord>) -> Self {
        let summary = SummaryStats::from_records(&records);
        debug!(
            "Building dashboard for {} records ({} overdue)",
            summary.total_records, summary.overdue_count
        );

        Self {
            aging_buckets: aging_buckets(&records),
            business_types: business_type_counts(&records, TOP_BUSINESS_TYPES),
            statuses: status_counts(&records),
            payment_flags: payment_flags(&records),
            summary,
            records,
        }
    }

    /// Table rows for `state` together with their footer totals.
    pub fn table(&self, state: &ViewState) -> (Vec<&TaxRecord>, FooterTotals) {
        let rows = project(&self.records, state);
        let totals = FooterTotals::from_view(rows.iter().copied());
        (rows, totals)
    }
}
