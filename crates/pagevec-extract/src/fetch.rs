use chrono::{DateTime, Utc};
use reqwest::Client;

/// A web page fetched from its source, prior to extraction.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch the page body as text.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ExtractError> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }
        let html = resp.text().await?;
        tracing::info!(url, bytes = html.len(), "fetched page");

        Ok(FetchedPage {
            url: url.to_string(),
            html,
            fetched_at: Utc::now(),
        })
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} fetching {url}")]
    Status { url: String, status: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn fetches_page_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(200)
                    .header("content-type", "text/html")
                    .body("<html><title>Hi</title></html>");
            })
            .await;

        let page = PageFetcher::new().fetch(&server.url("/page")).await.unwrap();
        mock.assert_async().await;
        assert!(page.html.contains("<title>Hi</title>"));
        assert_eq!(page.url, server.url("/page"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let err = PageFetcher::new()
            .fetch(&server.url("/missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Status { status: 404, .. }));
    }
}
