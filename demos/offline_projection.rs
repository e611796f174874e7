use chrono::NaiveDate;
use tax_followup::{
    local_today, records_from_csv_now, DashboardSnapshot, RecordField, ViewState,
};

const SAMPLE: &str = "ประเภทธุรกิจ,กฟฟ.,วันที่เอกสาร,วันที่ผ่านรายการ,เลขที่เอกสารตั้งหนี้,ปี/เดือน,เลขที่เอกสารชำระเงิน,วันที่ชำระเงิน,เลขที่ใบกำกับภาษี,ชื่อผู้ขาย/ผู้ให้บริการ,เลขประจำตัว,มูลค่าฐานภาษี,มูลค่าภาษีซื้อ,มูลค่าสินค้า,สถานะรายการ
ธุรกิจหลัก,B001,02/01/2568,03/01/2568,1900001,2568/01,2000001,01/01/2568,IV-1,\"บริษัท เอ, จำกัด\",0105550000001,\"12,000.00\",840.00,\"12,840.00\",จ่ายชำระเงินแล้ว
ธุรกิจเสริม,B002,10/11/2567,11/11/2567,1900002,2567/11,2000002,15/11/2567,IV-2,บริษัท บี จำกัด,0105550000002,\"3,500.00\",245.00,\"3,745.00\",ยังไม่จ่ายชำระเงิน
ธุรกิจหลัก,B001,20/01/2568,21/01/2568,1900003,2568/01,2000003,25/01/2568,IV-3,บริษัท ซี จำกัด,0105550000003,900,63,963,จ่ายชำระเงินแล้ว
";

fn main() {
    // Age against a fixed day so the output is reproducible; pass any
    // argument to use today instead.
    let today = if std::env::args().nth(1).is_some() {
        local_today()
    } else {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    };

    let dashboard = DashboardSnapshot::from_records(records_from_csv_now(SAMPLE, today));
    println!(
        "{}",
        serde_json::to_string_pretty(&dashboard.summary).unwrap()
    );

    let state = ViewState::default()
        .with_filter(RecordField::BranchCode, "b001")
        .with_sort_toggled(RecordField::TaxBaseValue);
    let (rows, totals) = dashboard.table(&state);

    for column in RecordField::TABLE_COLUMNS {
        print!("{}\t", column.label());
    }
    println!();
    for record in &rows {
        for column in RecordField::TABLE_COLUMNS {
            print!("{}\t", column.value(record).to_text());
        }
        println!();
    }
    println!("รวม: {:?}", totals);
}
