//! Wire and normalized models for backend-described inquiry forms.
//!
//! The backend CMS delivers forms as JSON. Compound questions arrive with
//! their sub-questions buried inside a nested `validation_rules` object;
//! [`normalize_form`] lifts those into first-class [`SubField`]s so the rest
//! of the engine never touches raw JSON.

mod normalize;

pub use normalize::normalize_form;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of question kinds understood by the engine.
///
/// Tags not in this set deserialize to [`FieldType::Unknown`] rather than
/// failing the whole catalog; unknown questions render as placeholders and
/// never block navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    #[serde(rename = "text")]
    ShortText,
    Email,
    Phone,
    Number,
    #[serde(rename = "textarea")]
    LongText,
    Select,
    Radio,
    Checkbox,
    CheckboxGroup,
    Date,
    #[serde(rename = "group")]
    Compound,
    #[serde(other)]
    Unknown,
}

/// One selectable entry of a select, radio, or checkbox-group question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Conditional display rule referencing another field's current answer.
///
/// `hide_when` wins over `show_when` when both are populated and the
/// dependency matches the hide value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalRule {
    pub depends_on: String,
    #[serde(default)]
    pub show_when: Option<String>,
    #[serde(default)]
    pub hide_when: Option<String>,
}

/// A primitive sub-question of a compound field.
///
/// Sub-field answers live in the same flat answer store as top-level answers,
/// keyed by the sub-field name, so names must be unique across the whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubField {
    pub name: String,
    pub kind: FieldType,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// A field as the backend serializes it, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub conditional: Option<ConditionalRule>,
    #[serde(default)]
    pub validation_rules: Option<serde_json::Value>,
}

/// A form as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFormDefinition {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<RawFieldDefinition>,
    #[serde(default)]
    pub submit_label: Option<String>,
}

/// A normalized question, ready for visibility resolution and validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub required: bool,
    /// Position among visible fields. Fields without an explicit order sort
    /// first, as order 0.
    pub display_order: i64,
    pub options: Vec<FieldOption>,
    pub conditional: Option<ConditionalRule>,
    /// Populated only for [`FieldType::Compound`] fields.
    pub sub_fields: Vec<SubField>,
}

/// A normalized form definition. Read-only after normalization; the engine
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDefinition {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
    pub submit_label: Option<String>,
}

impl FormDefinition {
    /// Label for the terminal submit control.
    pub fn submit_label(&self) -> &str {
        self.submit_label.as_deref().unwrap_or("Submit inquiry")
    }
}
