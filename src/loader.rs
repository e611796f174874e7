use crate::config::SheetSource;
use crate::fetch::fetch_tax_data;
use crate::record::TaxRecord;
use log::{debug, error};
use reqwest::Client;
use tokio::task::{AbortHandle, JoinHandle};

/// Drives dashboard reloads. Starting a refresh aborts the one still in
/// flight, so only the latest load can deliver records.
pub struct Refresher {
    client: Client,
    source: SheetSource,
    in_flight: Option<AbortHandle>,
}

/// A load started by [`Refresher::refresh`].
pub struct PendingLoad {
    handle: JoinHandle<Vec<TaxRecord>>,
}

impl PendingLoad {
    /// Waits for the load. A superseded or failed task resolves to an empty
    /// set.
    pub async fn records(self) -> Vec<TaxRecord> {
        match self.handle.await {
            Ok(records) => records,
            Err(e) if e.is_cancelled() => {
                debug!("Load superseded by a newer refresh");
                Vec::new()
            }
            Err(e) => {
                error!("Load task failed: {}", e);
                Vec::new()
            }
        }
    }
}

impl Refresher {
    pub fn new(source: SheetSource) -> Self {
        Self::with_client(Client::new(), source)
    }

    pub fn with_client(client: Client, source: SheetSource) -> Self {
        Self {
            client,
            source,
            in_flight: None,
        }
    }

    pub fn source(&self) -> &SheetSource {
        &self.source
    }

    /// Starts a new load on the current tokio runtime.
    pub fn refresh(&mut self) -> PendingLoad {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!("Aborting in-flight load");
                previous.abort();
            }
        }

        let client = self.client.clone();
        let source = self.source.clone();
        let handle = tokio::spawn(async move { fetch_tax_data(&client, &source).await });
        self.in_flight = Some(handle.abort_handle());

        PendingLoad { handle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "h\nธุรกิจหลัก,B001,,,,,,\n";

    #[tokio::test]
    async fn test_refresh_delivers_records() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/d7.csv")
            .with_status(200)
            .with_body(SHEET)
            .create_async()
            .await;

        let mut refresher = Refresher::new(SheetSource::from_url(format!("{}/d7.csv", server.url())));
        let records = refresher.refresh().records().await;
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_second_refresh_supersedes_first() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/d7.csv")
            .with_status(200)
            .with_body(SHEET)
            .create_async()
            .await;

        // The current-thread test runtime cannot start the first task before
        // the second refresh aborts it.
        let mut refresher = Refresher::new(SheetSource::from_url(format!("{}/d7.csv", server.url())));
        let first = refresher.refresh();
        let second = refresher.refresh();

        assert!(first.records().await.is_empty());
        assert_eq!(second.records().await.len(), 1);
    }
}
