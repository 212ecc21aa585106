//! Backend REST boundary: catalog retrieval and submission dispatch.
//!
//! The engine only ever talks to [`InquiryApi`]; tests drive it with an
//! in-memory fake while the CLI wires in the HTTP implementation.

mod http;

pub use http::HttpApi;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::InquiryError;
use crate::schema::RawFormDefinition;

/// Acknowledgement returned by the submission endpoint. Both parts are
/// optional; an empty 2xx body still counts as success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Remote operations the form engine depends on.
pub trait InquiryApi {
    /// Fetches the catalog of available inquiry forms.
    fn fetch_catalog(&self) -> Result<Vec<RawFormDefinition>, InquiryError>;

    /// Posts a completed flat answer payload to the form identified by
    /// `slug`.
    fn submit(
        &self,
        slug: &str,
        payload: &serde_json::Map<String, Value>,
    ) -> Result<SubmissionReceipt, InquiryError>;
}
