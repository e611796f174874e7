use dotenv::dotenv;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tax_followup::{
    DashboardSnapshot, RecordField, Refresher, SheetSource, ViewState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let source = SheetSource::from_env();
    source.validate()?;

    let mut refresher = Refresher::new(source);
    let records = refresher.refresh().records().await;
    if records.is_empty() {
        println!("No records loaded (sheet unreachable or empty).");
        return Ok(());
    }

    let dashboard = DashboardSnapshot::from_records(records);
    let summary = &dashboard.summary;

    println!("Records:          {}", summary.total_records);
    println!("Tax base total:   {:.2}", summary.total_base_value);
    println!("Input VAT total:  {:.2}", summary.total_vat);
    println!("Product total:    {:.2}", summary.total_product_value);
    println!("Average aging:    {:.0} days", summary.average_aging);
    println!("Overdue (>30d):   {}", summary.overdue_count);

    println!("\nAging analysis:");
    for bin in &dashboard.aging_buckets {
        println!("  {:<12} {}", bin.name, bin.count);
    }

    println!("\nTop business types:");
    for entry in &dashboard.business_types {
        println!("  {:<24} {}", entry.name, entry.count);
    }

    println!("\nStatuses:");
    for entry in &dashboard.statuses {
        println!("  {:<32} {}", entry.name, entry.count);
    }

    let state = ViewState::default();
    let (rows, totals) = dashboard.table(&state);
    println!("\nTen oldest items:");
    for record in rows.iter().take(10) {
        let cells: Vec<String> = [
            RecordField::AgingDays,
            RecordField::BranchCode,
            RecordField::VendorName,
            RecordField::VatValue,
        ]
        .iter()
        .map(|field| field.value(record).to_text())
        .collect();
        println!("  [{}] {}", record.urgency, cells.join(" | "));
    }
    println!(
        "\nFooter: base {:.2} / VAT {:.2} / product {:.2}",
        totals.tax_base_value, totals.vat_value, totals.product_value
    );

    Ok(())
}
