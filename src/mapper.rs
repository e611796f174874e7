use crate::aging::{aging_days, Urgency};
use crate::csv::{parse_csv, RawRow};
use crate::record::TaxRecord;
use chrono::{NaiveDate, Utc};
use log::debug;

/// Rows shorter than this cannot carry a payment date and are dropped.
pub const MIN_FIELDS: usize = 8;

pub const COL_BUSINESS_TYPE: usize = 0;
pub const COL_BRANCH_CODE: usize = 1;
pub const COL_DOCUMENT_DATE: usize = 2;
pub const COL_POSTING_DATE: usize = 3;
pub const COL_DEBT_DOCUMENT_NO: usize = 4;
pub const COL_PERIOD: usize = 5;
pub const COL_PAYMENT_DOCUMENT_NO: usize = 6;
pub const COL_PAYMENT_DATE: usize = 7;
pub const COL_TAX_INVOICE_NO: usize = 8;
pub const COL_VENDOR_NAME: usize = 9;
pub const COL_VENDOR_TAX_ID: usize = 10;
pub const COL_TAX_BASE_VALUE: usize = 11;
pub const COL_VAT_VALUE: usize = 12;
pub const COL_PRODUCT_VALUE: usize = 13;
pub const COL_STATUS: usize = 14;

/// Turns raw CSV text into records, aging each one against `today`.
///
/// `load_stamp` makes the generated ids unique for this load.
pub fn records_from_csv(text: &str, today: NaiveDate, load_stamp: i64) -> Vec<TaxRecord> {
    map_rows(&parse_csv(text), today, load_stamp)
}

/// Same as [`records_from_csv`], stamped with the current time.
pub fn records_from_csv_now(text: &str, today: NaiveDate) -> Vec<TaxRecord> {
    records_from_csv(text, today, Utc::now().timestamp_millis())
}

/// Maps parsed rows to records. The first row is always treated as the
/// header and skipped.
pub fn map_rows(rows: &[RawRow], today: NaiveDate, load_stamp: i64) -> Vec<TaxRecord> {
    let Some((header, data_rows)) = rows.split_first() else {
        return Vec::new();
    };
    debug!("Skipping header row with {} columns", header.len());

    let records: Vec<TaxRecord> = data_rows
        .iter()
        .filter(|row| is_record_row(row))
        .enumerate()
        .map(|(idx, row)| map_row(row, idx, today, load_stamp))
        .collect();

    let dropped = data_rows.len() - records.len();
    if dropped > 0 {
        debug!("Dropped {} rows without identifying fields", dropped);
    }

    records
}

/// A row counts as a record when it is wide enough and has at least one of
/// branch code, document date or posting date.
pub fn is_record_row(row: &[String]) -> bool {
    row.len() >= MIN_FIELDS
        && [COL_BRANCH_CODE, COL_DOCUMENT_DATE, COL_POSTING_DATE]
            .iter()
            .any(|&col| !row[col].is_empty())
}

fn map_row(row: &[String], idx: usize, today: NaiveDate, load_stamp: i64) -> TaxRecord {
    let text = |col: usize| row.get(col).cloned().unwrap_or_default();
    let amount = |col: usize| row.get(col).map(|s| parse_amount(s)).unwrap_or(0.0);

    let payment_date = text(COL_PAYMENT_DATE);
    let aging_days = aging_days(&payment_date, today);

    TaxRecord {
        id: format!("row-{}-{}", idx, load_stamp),
        business_type: text(COL_BUSINESS_TYPE),
        branch_code: text(COL_BRANCH_CODE),
        document_date: text(COL_DOCUMENT_DATE),
        posting_date: text(COL_POSTING_DATE),
        debt_document_no: text(COL_DEBT_DOCUMENT_NO),
        period: text(COL_PERIOD),
        payment_document_no: text(COL_PAYMENT_DOCUMENT_NO),
        payment_date,
        tax_invoice_no: text(COL_TAX_INVOICE_NO),
        vendor_name: text(COL_VENDOR_NAME),
        vendor_tax_id: text(COL_VENDOR_TAX_ID),
        tax_base_value: amount(COL_TAX_BASE_VALUE),
        vat_value: amount(COL_VAT_VALUE),
        product_value: amount(COL_PRODUCT_VALUE),
        status: text(COL_STATUS),
        aging_days,
        urgency: Urgency::from_aging(aging_days),
    }
}

/// Parses a sheet amount such as `1,234.50`.
///
/// Commas are removed, then the longest numeric prefix is read, so `12 THB`
/// gives 12. Empty, non-numeric and NaN input gives 0. Negative amounts are
/// kept.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|&c| c != ',').collect();
    let value = leading_float(cleaned.trim_start()).unwrap_or(0.0);
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Longest prefix of `s` of the form `[+-]? (digits [. digits?] | . digits)
/// ([eE] [+-]? digits)?`, or a signed `Infinity`.
fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    if s[pos..].starts_with("Infinity") {
        let infinite = if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(infinite);
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut mantissa_digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if mantissa_digits > 0 || frac_end > frac_start {
            mantissa_digits += frac_end - frac_start;
            pos = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp_pos = pos + 1;
        if exp_pos < bytes.len() && matches!(bytes[exp_pos], b'+' | b'-') {
            exp_pos += 1;
        }
        let exp_digits_start = exp_pos;
        while exp_pos < bytes.len() && bytes[exp_pos].is_ascii_digit() {
            exp_pos += 1;
        }
        if exp_pos > exp_digits_start {
            pos = exp_pos;
        }
    }

    s[..pos].parse::<f64>().ok()
}
