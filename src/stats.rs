//! Aggregates behind the summary cards, table footer and charts.

use crate::record::TaxRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Label used for records with an empty business type or status.
pub const UNSPECIFIED_LABEL: &str = "ไม่ระบุ";

pub const PAID_STATUS_MARKER: &str = "จ่ายชำระเงินแล้ว";
pub const UNPAID_STATUS_MARKER: &str = "ยังไม่จ่ายชำระเงิน";

/// The dashboard charts the eight largest business types.
pub const TOP_BUSINESS_TYPES: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_records: usize,
    pub total_base_value: f64,
    pub total_vat: f64,
    pub total_product_value: f64,
    pub average_aging: f64,
    pub overdue_count: usize,
}

impl SummaryStats {
    pub fn from_records(records: &[TaxRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total_aging: u64 = records.iter().map(|r| u64::from(r.aging_days)).sum();

        Self {
            total_records: records.len(),
            total_base_value: records.iter().map(|r| r.tax_base_value).sum(),
            total_vat: records.iter().map(|r| r.vat_value).sum(),
            total_product_value: records.iter().map(|r| r.product_value).sum(),
            average_aging: total_aging as f64 / records.len() as f64,
            overdue_count: records.iter().filter(|r| r.is_overdue()).count(),
        }
    }
}

/// Amount totals of whatever rows are currently shown in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FooterTotals {
    pub tax_base_value: f64,
    pub vat_value: f64,
    pub product_value: f64,
}

impl FooterTotals {
    pub fn from_view<'a>(rows: impl IntoIterator<Item = &'a TaxRecord>) -> Self {
        rows.into_iter().fold(Self::default(), |acc, r| Self {
            tax_base_value: acc.tax_base_value + r.tax_base_value,
            vat_value: acc.vat_value + r.vat_value,
            product_value: acc.product_value + r.product_value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LabelCount {
    pub name: String,
    pub count: usize,
}

/// Counts per aging bin: 0-15, 16-30, 31-60 and 60+ days.
pub fn aging_buckets(records: &[TaxRecord]) -> Vec<LabelCount> {
    let mut counts = [0usize; 4];
    for record in records {
        let bin = match record.aging_days {
            0..=15 => 0,
            16..=30 => 1,
            31..=60 => 2,
            _ => 3,
        };
        counts[bin] += 1;
    }

    ["0-15 วัน", "16-30 วัน", "31-60 วัน", "60+ วัน"]
        .iter()
        .zip(counts)
        .map(|(name, count)| LabelCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Business types by record count, largest first, at most `limit` entries.
/// Equal counts keep the order in which the types first appear.
pub fn business_type_counts(records: &[TaxRecord], limit: usize) -> Vec<LabelCount> {
    let mut counts = count_by(records, |r| &r.business_type);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Record count per status label in first-seen order.
pub fn status_counts(records: &[TaxRecord]) -> Vec<LabelCount> {
    count_by(records, |r| &r.status)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFlags {
    pub has_paid: bool,
    pub has_unpaid: bool,
}

pub fn payment_flags(records: &[TaxRecord]) -> PaymentFlags {
    PaymentFlags {
        has_paid: records.iter().any(|r| r.status.contains(PAID_STATUS_MARKER)),
        has_unpaid: records
            .iter()
            .any(|r| r.status.contains(UNPAID_STATUS_MARKER)),
    }
}

fn count_by<F>(records: &[TaxRecord], key: F) -> Vec<LabelCount>
where
    F: Fn(&TaxRecord) -> &String,
{
    let mut counts: Vec<LabelCount> = Vec::new();
    for record in records {
        let value = key(record);
        let name = if value.is_empty() {
            UNSPECIFIED_LABEL
        } else {
            value.as_str()
        };

        match counts.iter_mut().find(|c| c.name == name) {
            Some(entry) => entry.count += 1,
            None => counts.push(LabelCount {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aging::Urgency;

    fn record(business_type: &str, status: &str, aging_days: u32, base: f64) -> TaxRecord {
        TaxRecord {
            id: format!("row-{}", aging_days),
            business_type: business_type.to_string(),
            branch_code: "B".to_string(),
            document_date: String::new(),
            posting_date: String::new(),
            debt_document_no: String::new(),
            period: String::new(),
            payment_document_no: String::new(),
            payment_date: String::new(),
            tax_invoice_no: String::new(),
            vendor_name: String::new(),
            vendor_tax_id: String::new(),
            tax_base_value: base,
            vat_value: base * 0.07,
            product_value: base * 1.07,
            status: status.to_string(),
            aging_days,
            urgency: Urgency::from_aging(aging_days),
        }
    }

    #[test]
    fn test_summary_of_empty_set_is_zeroed() {
        assert_eq!(SummaryStats::from_records(&[]), SummaryStats::default());
        assert_eq!(SummaryStats::from_records(&[]).average_aging, 0.0);
    }

    #[test]
    fn test_summary_totals_and_average() {
        let records = vec![
            record("A", "", 10, 100.0),
            record("A", "", 31, 200.0),
            record("B", "", 61, 300.0),
        ];
        let stats = SummaryStats::from_records(&records);

        assert_eq!(stats.total_records, 3);
        assert!((stats.total_base_value - 600.0).abs() < 1e-9);
        assert!((stats.total_vat - 42.0).abs() < 1e-9);
        assert!((stats.total_product_value - 642.0).abs() < 1e-9);
        assert!((stats.average_aging - 34.0).abs() < 1e-9);
        assert_eq!(stats.overdue_count, 2);
    }

    #[test]
    fn test_aging_bucket_edges() {
        let records: Vec<TaxRecord> = [0, 15, 16, 30, 31, 60, 61, 400]
            .iter()
            .map(|&d| record("A", "", d, 0.0))
            .collect();
        let counts: Vec<usize> = aging_buckets(&records).iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 2, 2]);
        assert_eq!(aging_buckets(&[])[3].name, "60+ วัน");
    }

    #[test]
    fn test_business_types_sorted_and_truncated() {
        let mut records = Vec::new();
        for (name, n) in [("C", 1), ("A", 3), ("", 2), ("B", 3)] {
            for _ in 0..n {
                records.push(record(name, "", 0, 0.0));
            }
        }

        let top = business_type_counts(&records, 3);
        let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", UNSPECIFIED_LABEL]);
        assert_eq!(top[0].count, 3);
    }

    #[test]
    fn test_status_counts_and_payment_flags() {
        let records = vec![
            record("A", "จ่ายชำระเงินแล้ว รอโอนภาษี", 0, 0.0),
            record("A", "", 0, 0.0),
            record("A", "จ่ายชำระเงินแล้ว รอโอนภาษี", 0, 0.0),
        ];
        let statuses = status_counts(&records);
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].count, 2);
        assert_eq!(statuses[1].name, UNSPECIFIED_LABEL);

        let flags = payment_flags(&records);
        assert!(flags.has_paid);
        assert!(!flags.has_unpaid);
    }

    #[test]
    fn test_footer_totals_follow_the_view() {
        let records = vec![record("A", "", 0, 100.0), record("B", "", 0, 50.0)];
        let shown: Vec<&TaxRecord> = records.iter().filter(|r| r.business_type == "B").collect();
        let totals = FooterTotals::from_view(shown);
        assert!((totals.tax_base_value - 50.0).abs() < 1e-9);
        assert!((totals.product_value - 53.5).abs() < 1e-9);
    }
}
