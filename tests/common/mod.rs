use std::sync::Mutex;

use inquiry_core::client::{InquiryApi, SubmissionReceipt};
use inquiry_core::errors::InquiryError;
use inquiry_core::schema::{normalize_form, FormDefinition, RawFormDefinition};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

/// Canonical trip-planning form fixture shared across the suites.
pub static PLAN_FORM: Lazy<Value> = Lazy::new(|| {
    json!({
        "id": "5f6f0f5e-4a85-4f7e-9f24-1c6f9f1a2b3c",
        "slug": "plan-your-trip",
        "title": "Plan your trip",
        "description": "Tell us about the safari you have in mind.",
        "submit_label": "Request my quote",
        "fields": [
            {
                "name": "full_name",
                "type": "text",
                "label": "Your full name",
                "required": true,
                "display_order": 1
            },
            {
                "name": "travel_style",
                "type": "select",
                "label": "Travel style",
                "required": true,
                "display_order": 2,
                "options": [
                    { "value": "lodge", "label": "Lodge-based" },
                    { "value": "camping", "label": "Mobile camping" }
                ]
            },
            {
                "name": "camping_gear",
                "type": "radio",
                "label": "Do you need camping gear?",
                "required": true,
                "display_order": 3,
                "options": [
                    { "value": "yes", "label": "Yes please" },
                    { "value": "no", "label": "I have my own" }
                ],
                "conditional": {
                    "depends_on": "travel_style",
                    "show_when": "camping"
                }
            },
            {
                "name": "lead_traveller",
                "type": "group",
                "label": "Lead traveller",
                "required": true,
                "display_order": 4,
                "validation_rules": {
                    "fields": [
                        { "name": "first_name", "type": "text", "label": "First name", "required": true },
                        { "name": "last_name", "type": "text", "label": "Last name", "required": true },
                        { "name": "email", "type": "email", "label": "Email address", "required": true }
                    ]
                }
            },
            {
                "name": "interests",
                "type": "checkbox-group",
                "label": "What are you most excited about?",
                "required": false,
                "display_order": 5,
                "options": [
                    { "value": "big-five", "label": "The Big Five" },
                    { "value": "birding", "label": "Birding" },
                    { "value": "walking-safari", "label": "Walking safaris" }
                ]
            }
        ]
    })
});

/// Parses and normalizes a fixture value into a ready-to-run form.
pub fn load_form(value: &Value) -> FormDefinition {
    let raw: RawFormDefinition = serde_json::from_value(value.clone()).expect("fixture parses");
    normalize_form(raw)
}

/// Programmable in-memory backend used to drive the engine without a server.
pub struct FakeApi {
    catalog: Vec<Value>,
    failures_remaining: Mutex<usize>,
    submissions: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl FakeApi {
    pub fn new(catalog: Vec<Value>) -> Self {
        Self {
            catalog,
            failures_remaining: Mutex::new(0),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Makes the next `count` submissions fail with a server error.
    pub fn failing_next(self, count: usize) -> Self {
        *self.failures_remaining.lock().expect("lock failures") = count;
        self
    }

    pub fn submissions(&self) -> Vec<(String, Map<String, Value>)> {
        self.submissions.lock().expect("lock submissions").clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().expect("lock submissions").len()
    }
}

impl InquiryApi for FakeApi {
    fn fetch_catalog(&self) -> Result<Vec<RawFormDefinition>, InquiryError> {
        self.catalog
            .iter()
            .map(|value| serde_json::from_value(value.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| InquiryError::CatalogLoad(err.to_string()))
    }

    fn submit(
        &self,
        slug: &str,
        payload: &Map<String, Value>,
    ) -> Result<SubmissionReceipt, InquiryError> {
        let mut remaining = self.failures_remaining.lock().expect("lock failures");
        if *remaining > 0 {
            *remaining -= 1;
            return Err(InquiryError::Submission("503 Service Unavailable".into()));
        }
        self.submissions
            .lock()
            .expect("lock submissions")
            .push((slug.to_string(), payload.clone()));
        Ok(SubmissionReceipt::default())
    }
}
