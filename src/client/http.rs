//! HTTP implementation of [`InquiryApi`] over the backend REST API.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{InquiryApi, SubmissionReceipt};
use crate::config::Config;
use crate::errors::InquiryError;
use crate::schema::RawFormDefinition;

const CATALOG_PATH: &str = "/api/inquiry-forms";

pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    /// Builds a client with the configured request timeout. The original
    /// relied on transport defaults; here the bound is explicit.
    pub fn new(config: &Config) -> Result<Self, InquiryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn submission_url(&self, slug: &str) -> String {
        format!("{}{}/{}/submissions", self.base_url, CATALOG_PATH, slug)
    }
}

impl InquiryApi for HttpApi {
    fn fetch_catalog(&self) -> Result<Vec<RawFormDefinition>, InquiryError> {
        let url = format!("{}{}", self.base_url, CATALOG_PATH);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| InquiryError::CatalogLoad(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            warn!(%status, "catalog request rejected");
            return Err(InquiryError::CatalogLoad(format!("{status}: {body}")));
        }

        let forms: Vec<RawFormDefinition> = response
            .json()
            .map_err(|err| InquiryError::CatalogLoad(err.to_string()))?;
        info!(count = forms.len(), "inquiry form catalog loaded");
        Ok(forms)
    }

    fn submit(
        &self,
        slug: &str,
        payload: &serde_json::Map<String, Value>,
    ) -> Result<SubmissionReceipt, InquiryError> {
        let url = self.submission_url(slug);
        debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .map_err(|err| InquiryError::Submission(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            warn!(%status, slug, "submission rejected");
            return Err(InquiryError::Submission(format!("{status}: {body}")));
        }

        info!(slug, "submission accepted");
        // Some deployments return an empty body on success.
        Ok(response.json().unwrap_or_default())
    }
}
