// Prompts for the pending input-VAT narrative

use crate::stats::SummaryStats;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

pub const SYSTEM_INSTRUCTION: &str = "คุณคือผู้เชี่ยวชาญบัญชีและการเงินของการไฟฟ้าส่วนภูมิภาคเขต 3 ภาคกลาง ที่มีบุคลิกน่าเชื่อถือ สุขุม และเก่งวิเคราะห์ข้อมูลภาษี";

pub const ANALYSIS_REQUEST: &str =
    "วิเคราะห์สถานะภาษีคงค้างนี้และให้คำแนะนำ 3 ข้อเชิงรุกสำหรับผู้บริหาร: ";

/// Shown when the model replies without any text.
pub const EMPTY_REPLY_FALLBACK: &str = "ไม่สามารถวิเคราะห์ได้";

/// Shown when the request itself fails.
pub const FAILURE_FALLBACK: &str = "ระบบวิเคราะห์ขัดข้อง";

/// One-line Thai description of the summary cards.
pub fn build_summary_text(stats: &SummaryStats) -> String {
    format!(
        "รายการทั้งหมด {} รายการ, รวมมูลค่าฐานภาษี {} บาท, ภาษีซื้อรวม {} บาท, รวมมูลค่าสินค้า {} บาท, วันคงค้างเฉลี่ย {:.0} วัน, รายการเกินกำหนด {} รายการ",
        stats.total_records,
        format_amount(stats.total_base_value),
        format_amount(stats.total_vat),
        format_amount(stats.total_product_value),
        stats.average_aging.round(),
        stats.overdue_count
    )
}

pub fn build_analysis_prompt(stats: &SummaryStats) -> String {
    format!("{}{}", ANALYSIS_REQUEST, build_summary_text(stats))
}

/// Thousands-separated amount with at most three decimals, trailing zeros
/// dropped: `1234567.5` becomes `1,234,567.5`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
