use crate::aging::local_today;
use crate::config::SheetSource;
use crate::error::{Result, TaxFollowupError};
use crate::mapper::records_from_csv_now;
use crate::record::TaxRecord;
use log::{error, info};
use reqwest::Client;

/// Downloads the CSV export body from `url`.
pub async fn fetch_csv(client: &Client, url: &str) -> Result<String> {
    let res = client.get(url).send().await?;
    let status = res.status();

    if !status.is_success() {
        return Err(TaxFollowupError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(res.text().await?)
}

/// Fetches and maps the sheet, reporting why a load failed.
pub async fn try_fetch_tax_data(client: &Client, source: &SheetSource) -> Result<Vec<TaxRecord>> {
    let url = source.csv_url();
    info!("Loading follow-up sheet from {}", url);

    let text = fetch_csv(client, &url).await?;
    let records = records_from_csv_now(&text, local_today());

    info!("Loaded {} records", records.len());
    Ok(records)
}

/// Fetches and maps the sheet. Any failure is logged and yields an empty
/// record set.
pub async fn fetch_tax_data(client: &Client, source: &SheetSource) -> Vec<TaxRecord> {
    match try_fetch_tax_data(client, source).await {
        Ok(records) => records,
        Err(e) => {
            error!("Fetch error: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "ประเภทธุรกิจ,กฟฟ.,วันที่เอกสาร,วันที่ผ่านรายการ,E,F,G,H\n\
        ธุรกิจหลัก,B001,01/01/2568,,E1,F1,G1,\n\
        ธุรกิจเสริม,,,,E2,F2,G2,\n";

    #[tokio::test]
    async fn test_fetch_maps_rows() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/sheet.csv")
            .with_status(200)
            .with_body(SHEET)
            .create_async()
            .await;

        let source = SheetSource::from_url(format!("{}/sheet.csv", server.url()));
        let records = fetch_tax_data(&Client::new(), &source).await;

        mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].branch_code, "B001");
    }

    #[tokio::test]
    async fn test_http_failure_yields_empty_set() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/sheet.csv")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let source = SheetSource::from_url(format!("{}/sheet.csv", server.url()));
        let client = Client::new();

        match try_fetch_tax_data(&client, &source).await {
            Err(TaxFollowupError::HttpStatus { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected status error, got {:?}", other),
        }
        assert!(fetch_tax_data(&client, &source).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty_set() {
        let source = SheetSource::from_url("http://127.0.0.1:9/unreachable.csv");
        assert!(fetch_tax_data(&Client::new(), &source).await.is_empty());
    }
}
