use dotenv::dotenv;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tax_followup::llm::{GeminiClient, VatAnalyst};
use tax_followup::{fetch_tax_data, SheetSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let api_key = std::env::var("GEMINI_API_KEY")?;
    let model = std::env::var("GEMINI_MODEL").ok();

    let records = fetch_tax_data(&reqwest::Client::new(), &SheetSource::from_env()).await;

    let mut analyst = VatAnalyst::new(GeminiClient::new(api_key));
    if let Some(model) = model {
        analyst = analyst.with_model(model);
    }

    match analyst.analyze(&records).await {
        Some(text) => println!("{}", text),
        None => println!("No records to analyse."),
    }

    Ok(())
}
