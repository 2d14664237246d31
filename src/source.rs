use crate::document::CatalogDocument;
use crate::error::Result;
use crate::types::CatalogSource;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// HTTP source for the gt-scheduler crawler publication: one JSON
/// document per term at `<base>/<term>.json`
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn term_url(&self, term: &str) -> String {
        format!("{}/{term}.json", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn source_name(&self) -> &'static str {
        "gt-scheduler-crawler"
    }

    #[instrument(skip(self))]
    async fn fetch_catalog(&self, term: &str) -> Result<CatalogDocument> {
        let url = self.term_url(term);
        info!("HTTP GET request to: {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let document: CatalogDocument = serde_json::from_slice(&bytes)?;

        debug!(
            "Decoded {} courses from {} bytes",
            document.courses.len(),
            bytes.len()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_url_joins_base_and_term() {
        let source =
            HttpCatalogSource::new("https://example.com/crawler", Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.term_url("202502"),
            "https://example.com/crawler/202502.json"
        );
    }

    #[test]
    fn term_url_trims_a_trailing_slash() {
        let source =
            HttpCatalogSource::new("https://example.com/crawler/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.term_url("202502"),
            "https://example.com/crawler/202502.json"
        );
    }
}
