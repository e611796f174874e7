//! Filtering and sorting of the record table.
//!
//! All table state lives in an immutable [`ViewState`]; [`project`] is
//! recomputed from scratch whenever that state or the record set changes.

use crate::record::TaxRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Id,
    BusinessType,
    BranchCode,
    DocumentDate,
    PostingDate,
    DebtDocumentNo,
    Period,
    PaymentDocumentNo,
    PaymentDate,
    TaxInvoiceNo,
    VendorName,
    VendorTaxId,
    TaxBaseValue,
    VatValue,
    ProductValue,
    Status,
    AgingDays,
    Urgency,
}

/// A field value as seen by search, filters and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    /// Textual form used for substring matching.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_string(),
            FieldValue::Number(n) => n.to_string(),
        }
    }

    fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (a, b) => a.to_text().cmp(&b.to_text()),
        }
    }
}

impl RecordField {
    /// Every field of a record, in declaration order.
    pub const ALL: [RecordField; 18] = [
        RecordField::Id,
        RecordField::BusinessType,
        RecordField::BranchCode,
        RecordField::DocumentDate,
        RecordField::PostingDate,
        RecordField::DebtDocumentNo,
        RecordField::Period,
        RecordField::PaymentDocumentNo,
        RecordField::PaymentDate,
        RecordField::TaxInvoiceNo,
        RecordField::VendorName,
        RecordField::VendorTaxId,
        RecordField::TaxBaseValue,
        RecordField::VatValue,
        RecordField::ProductValue,
        RecordField::Status,
        RecordField::AgingDays,
        RecordField::Urgency,
    ];

    /// Columns of the follow-up table, left to right.
    pub const TABLE_COLUMNS: [RecordField; 16] = [
        RecordField::Status,
        RecordField::AgingDays,
        RecordField::BusinessType,
        RecordField::BranchCode,
        RecordField::DocumentDate,
        RecordField::PostingDate,
        RecordField::DebtDocumentNo,
        RecordField::Period,
        RecordField::PaymentDocumentNo,
        RecordField::PaymentDate,
        RecordField::TaxInvoiceNo,
        RecordField::VendorName,
        RecordField::VendorTaxId,
        RecordField::TaxBaseValue,
        RecordField::VatValue,
        RecordField::ProductValue,
    ];

    pub fn value<'a>(&self, record: &'a TaxRecord) -> FieldValue<'a> {
        match self {
            RecordField::Id => FieldValue::Text(&record.id),
            RecordField::BusinessType => FieldValue::Text(&record.business_type),
            RecordField::BranchCode => FieldValue::Text(&record.branch_code),
            RecordField::DocumentDate => FieldValue::Text(&record.document_date),
            RecordField::PostingDate => FieldValue::Text(&record.posting_date),
            RecordField::DebtDocumentNo => FieldValue::Text(&record.debt_document_no),
            RecordField::Period => FieldValue::Text(&record.period),
            RecordField::PaymentDocumentNo => FieldValue::Text(&record.payment_document_no),
            RecordField::PaymentDate => FieldValue::Text(&record.payment_date),
            RecordField::TaxInvoiceNo => FieldValue::Text(&record.tax_invoice_no),
            RecordField::VendorName => FieldValue::Text(&record.vendor_name),
            RecordField::VendorTaxId => FieldValue::Text(&record.vendor_tax_id),
            RecordField::TaxBaseValue => FieldValue::Number(record.tax_base_value),
            RecordField::VatValue => FieldValue::Number(record.vat_value),
            RecordField::ProductValue => FieldValue::Number(record.product_value),
            RecordField::Status => FieldValue::Text(&record.status),
            RecordField::AgingDays => FieldValue::Number(f64::from(record.aging_days)),
            RecordField::Urgency => FieldValue::Text(record.urgency.as_str()),
        }
    }

    /// Thai column heading shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            RecordField::Id => "รหัสรายการ",
            RecordField::BusinessType => "ประเภทธุรกิจ",
            RecordField::BranchCode => "กฟฟ.",
            RecordField::DocumentDate => "วันที่เอกสาร",
            RecordField::PostingDate => "วันที่ผ่านรายการ",
            RecordField::DebtDocumentNo => "เลขที่เอกสารตั้งหนี้",
            RecordField::Period => "ปี/เดือน",
            RecordField::PaymentDocumentNo => "เลขที่เอกสารชำระเงิน",
            RecordField::PaymentDate => "วันที่ชำระเงิน",
            RecordField::TaxInvoiceNo => "เลขที่ใบกำกับภาษี",
            RecordField::VendorName => "ชื่อผู้ขาย/ผู้ให้บริการ",
            RecordField::VendorTaxId => "เลขประจำตัว",
            RecordField::TaxBaseValue => "มูลค่าฐานภาษี",
            RecordField::VatValue => "มูลค่าภาษีซื้อ",
            RecordField::ProductValue => "มูลค่าสินค้า",
            RecordField::Status => "สถานะรายการ",
            RecordField::AgingDays => "Aging (วัน)",
            RecordField::Urgency => "ความเร่งด่วน",
        }
    }

    pub fn is_amount(&self) -> bool {
        matches!(
            self,
            RecordField::TaxBaseValue | RecordField::VatValue | RecordField::ProductValue
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<RecordField>,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Oldest pending items first.
    fn default() -> Self {
        Self {
            key: Some(RecordField::AgingDays),
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    /// Sort state after clicking the `key` column header: a second click on an
    /// ascending column flips it to descending, anything else starts ascending.
    pub fn toggled(&self, key: RecordField) -> Self {
        let direction = if self.key == Some(key) && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self {
            key: Some(key),
            direction,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub search: String,
    pub column_filters: BTreeMap<RecordField, String>,
    pub sort: SortConfig,
}

impl ViewState {
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    pub fn with_filter(&self, key: RecordField, value: impl Into<String>) -> Self {
        let mut column_filters = self.column_filters.clone();
        column_filters.insert(key, value.into());
        Self {
            column_filters,
            ..self.clone()
        }
    }

    pub fn with_sort_toggled(&self, key: RecordField) -> Self {
        Self {
            sort: self.sort.toggled(key),
            ..self.clone()
        }
    }
}

/// Rows matching `state`, in display order.
pub fn project<'a>(records: &'a [TaxRecord], state: &ViewState) -> Vec<&'a TaxRecord> {
    let search = state.search.to_lowercase();
    let filters: Vec<(RecordField, String)> = state
        .column_filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (*key, value.to_lowercase()))
        .collect();

    let mut rows: Vec<&TaxRecord> = records
        .iter()
        .filter(|record| matches_search(record, &search))
        .filter(|record| {
            filters
                .iter()
                .all(|(key, needle)| contains_ignore_case(&key.value(record), needle))
        })
        .collect();

    if let Some(key) = state.sort.key {
        rows.sort_by(|a, b| {
            let ordering = key.value(a).compare(&key.value(b));
            match state.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    rows
}

fn matches_search(record: &TaxRecord, needle: &str) -> bool {
    needle.is_empty()
        || RecordField::ALL
            .iter()
            .any(|field| contains_ignore_case(&field.value(record), needle))
}

fn contains_ignore_case(value: &FieldValue<'_>, lowered_needle: &str) -> bool {
    value.to_text().to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aging::Urgency;

    fn record(id: &str, vendor: &str, branch: &str, aging_days: u32, base: f64) -> TaxRecord {
        TaxRecord {
            id: id.to_string(),
            business_type: "ธุรกิจหลัก".to_string(),
            branch_code: branch.to_string(),
            document_date: String::new(),
            posting_date: String::new(),
            debt_document_no: String::new(),
            period: String::new(),
            payment_document_no: String::new(),
            payment_date: String::new(),
            tax_invoice_no: String::new(),
            vendor_name: vendor.to_string(),
            vendor_tax_id: String::new(),
            tax_base_value: base,
            vat_value: 0.0,
            product_value: 0.0,
            status: String::new(),
            aging_days,
            urgency: Urgency::from_aging(aging_days),
        }
    }

    fn ids(rows: &[&TaxRecord]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    fn sample() -> Vec<TaxRecord> {
        vec![
            record("r1", "Alpha Trading", "B01", 10, 500.0),
            record("r2", "beta supplies", "B02", 45, 1500.0),
            record("r3", "Gamma Co", "B01", 70, 250.0),
        ]
    }

    #[test]
    fn test_default_view_sorts_oldest_first() {
        let records = sample();
        let rows = project(&records, &ViewState::default());
        assert_eq!(ids(&rows), vec!["r3", "r2", "r1"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = sample();
        let state = ViewState::default().with_search("BETA");
        assert_eq!(ids(&project(&records, &state)), vec!["r2"]);

        let state = ViewState::default().with_search("critical");
        assert_eq!(ids(&project(&records, &state)), vec!["r3"]);

        let state = ViewState::default().with_search("1500");
        assert_eq!(ids(&project(&records, &state)), vec!["r2"]);
    }

    #[test]
    fn test_column_filters_all_apply() {
        let records = sample();
        let state = ViewState::default()
            .with_filter(RecordField::BranchCode, "b01")
            .with_filter(RecordField::VendorName, "");
        assert_eq!(ids(&project(&records, &state)), vec!["r3", "r1"]);

        let state = state.with_filter(RecordField::VendorName, "gamma");
        assert_eq!(ids(&project(&records, &state)), vec!["r3"]);
    }

    #[test]
    fn test_sort_toggle() {
        let sort = SortConfig::default();
        let asc = sort.toggled(RecordField::AgingDays);
        assert_eq!(asc.direction, SortDirection::Asc);
        let desc = asc.toggled(RecordField::AgingDays);
        assert_eq!(desc.direction, SortDirection::Desc);
        let other = desc.toggled(RecordField::VendorName);
        assert_eq!(other.key, Some(RecordField::VendorName));
        assert_eq!(other.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_numbers_numerically_and_text_lexically() {
        let records = sample();
        let state = ViewState::default().with_sort_toggled(RecordField::TaxBaseValue);
        assert_eq!(ids(&project(&records, &state)), vec!["r3", "r1", "r2"]);

        let state = ViewState::default().with_sort_toggled(RecordField::VendorName);
        assert_eq!(ids(&project(&records, &state)), vec!["r1", "r3", "r2"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let records = sample();
        let state = ViewState::default().with_sort_toggled(RecordField::BranchCode);
        assert_eq!(ids(&project(&records, &state)), vec!["r1", "r3", "r2"]);

        let state = state.with_sort_toggled(RecordField::BranchCode);
        assert_eq!(ids(&project(&records, &state)), vec!["r2", "r1", "r3"]);
    }

    #[test]
    fn test_unsorted_view_keeps_input_order() {
        let records = sample();
        let state = ViewState {
            sort: SortConfig {
                key: None,
                direction: SortDirection::Asc,
            },
            ..ViewState::default()
        };
        assert_eq!(ids(&project(&records, &state)), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn test_table_columns_have_labels() {
        assert_eq!(RecordField::TABLE_COLUMNS[0].label(), "สถานะรายการ");
        assert!(RecordField::TABLE_COLUMNS
            .iter()
            .filter(|c| c.is_amount())
            .all(|c| matches!(c, RecordField::TaxBaseValue | RecordField::VatValue | RecordField::ProductValue)));
    }
}
