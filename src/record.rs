use crate::aging::Urgency;
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One pending input-VAT line from the follow-up sheet.
///
/// String fields are kept exactly as they appear in the sheet (trimmed).
/// Amounts are parsed leniently and default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxRecord {
    #[schemars(description = "Identifier unique within one load; not stable across reloads")]
    pub id: String,

    /// Column A: ประเภทธุรกิจ
    pub business_type: String,
    /// Column B: กฟฟ.
    pub branch_code: String,
    /// Column C: วันที่เอกสาร
    pub document_date: String,
    /// Column D: วันที่ผ่านรายการ
    pub posting_date: String,
    /// Column E: เลขที่เอกสารตั้งหนี้
    pub debt_document_no: String,
    /// Column F: ปี/เดือน
    pub period: String,
    /// Column G: เลขที่เอกสารชำระเงิน
    pub payment_document_no: String,
    /// Column H: วันที่ชำระเงิน, the source of `aging_days`
    pub payment_date: String,
    /// Column I: เลขที่ใบกำกับภาษี
    pub tax_invoice_no: String,
    /// Column J: ชื่อผู้ขาย/ผู้ให้บริการ
    pub vendor_name: String,
    /// Column K: เลขประจำตัว
    pub vendor_tax_id: String,
    /// Column L: มูลค่าฐานภาษี
    pub tax_base_value: f64,
    /// Column M: มูลค่าภาษีซื้อ
    pub vat_value: f64,
    /// Column N: มูลค่าสินค้า
    pub product_value: f64,
    /// Column O: สถานะรายการ
    pub status: String,

    #[schemars(description = "Whole days since the payment date, never negative")]
    pub aging_days: u32,
    pub urgency: Urgency,
}

impl TaxRecord {
    pub fn is_overdue(&self) -> bool {
        self.aging_days > crate::aging::OVERDUE_AFTER_DAYS
    }

    /// True when both records carry the same data, ignoring the per-load id.
    pub fn same_content(&self, other: &TaxRecord) -> bool {
        TaxRecord {
            id: String::new(),
            ..self.clone()
        } == TaxRecord {
            id: String::new(),
            ..other.clone()
        }
    }
}

/// JSON Schema of a record, for consumers validating the exported set.
pub fn record_json_schema() -> Result<String> {
    let schema = schemars::schema_for!(Vec<TaxRecord>);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaxRecord {
        TaxRecord {
            id: "row-0-1".to_string(),
            business_type: "ธุรกิจหลัก".to_string(),
            branch_code: "กฟจ.นครปฐม".to_string(),
            document_date: "02/01/2568".to_string(),
            posting_date: "03/01/2568".to_string(),
            debt_document_no: "1900001234".to_string(),
            period: "2568/01".to_string(),
            payment_document_no: "2000004321".to_string(),
            payment_date: "05/01/2568".to_string(),
            tax_invoice_no: "IV-001".to_string(),
            vendor_name: "บริษัท ตัวอย่าง จำกัด".to_string(),
            vendor_tax_id: "0105551234567".to_string(),
            tax_base_value: 1000.0,
            vat_value: 70.0,
            product_value: 1070.0,
            status: "ยังไม่จ่ายชำระเงิน".to_string(),
            aging_days: 45,
            urgency: Urgency::High,
        }
    }

    #[test]
    fn test_serializes_with_camel_case_and_lowercase_urgency() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["agingDays"], 45);
        assert_eq!(json["urgency"], "high");
        assert_eq!(json["taxBaseValue"], 1000.0);
        assert_eq!(json["vendorTaxId"], "0105551234567");
    }

    #[test]
    fn test_same_content_ignores_id() {
        let a = sample();
        let mut b = sample();
        b.id = "row-0-2".to_string();
        assert!(a.same_content(&b));
        assert_ne!(a, b);

        b.vat_value = 71.0;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_overdue_is_strictly_after_thirty_days() {
        let mut record = sample();
        record.aging_days = 30;
        assert!(!record.is_overdue());
        record.aging_days = 31;
        assert!(record.is_overdue());
    }

    #[test]
    fn test_schema_mentions_fields() {
        let schema = record_json_schema().unwrap();
        assert!(schema.contains("agingDays"));
        assert!(schema.contains("critical"));
    }
}
