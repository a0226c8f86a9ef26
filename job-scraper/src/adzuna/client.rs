use std::time::Duration;

use serde_json::Value;

use crate::adzuna::{Error, Result};

const BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs";
pub const DEFAULT_COUNTRY: &str = "ca";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct Client {
    client: reqwest::Client,
    base_url: String,
    country: String,
    app_id: String,
    app_key: String,
}

impl Client {
    pub fn new(app_id: String, app_key: String, country: String) -> Self {
        Self::with_client(app_id, app_key, country, reqwest::Client::new())
    }

    pub fn with_client(
        app_id: String,
        app_key: String,
        country: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_owned(),
            country,
            app_id,
            app_key,
        }
    }

    /// Send requests to another host, mostly useful against a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn search_url(&self, page: u32) -> String {
        format!(
            "{}/{}/search/{}",
            self.base_url.trim_end_matches('/'),
            self.country,
            page
        )
    }

    /// Fetch one page of search results and return the response body as-is.
    pub async fn fetch_jobs(&self, page: u32, what: &str, results_per_page: u32) -> Result<Value> {
        let url = self.search_url(page);
        log::debug!("requesting jobs from adzuna, page: {}, search: {}", page, what);
        let resp = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("results_per_page", results_per_page.to_string().as_str()),
                ("what", what),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            log::error!(
                "failed to retrieve results for page: {}, search: {}, status: {}, error resp body: {}",
                page,
                what,
                status,
                body,
            );
            return Err(Error::RequestNotOk {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let data: Value = serde_json::from_str(&body)?;
        log::info!(
            "successfully retrieved results for page: {}, search: {}",
            page,
            what
        );
        Ok(data)
    }
}
