//! Post-processing of raw form payloads into the normalized model.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    FieldDefinition, FieldType, FormDefinition, RawFieldDefinition, RawFormDefinition, SubField,
};

/// Sub-field entry as it appears inside a compound field's nested
/// `validation_rules.fields` array. Only `name` is mandatory; everything else
/// falls back to a sensible default so a sparse CMS payload still normalizes.
#[derive(Deserialize)]
struct RawSubField {
    name: String,
    #[serde(rename = "type", default = "default_sub_kind")]
    kind: FieldType,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    required: bool,
}

fn default_sub_kind() -> FieldType {
    FieldType::ShortText
}

/// Normalizes a raw form as received from the backend.
///
/// Total by construction: compound fields get their sub-fields extracted from
/// the nested validation-rules payload when present, and an empty list when
/// the payload is absent or malformed. Every other field type passes through
/// unchanged.
pub fn normalize_form(raw: RawFormDefinition) -> FormDefinition {
    let fields: Vec<FieldDefinition> = raw.fields.into_iter().map(normalize_field).collect();
    warn_on_duplicate_names(&raw.slug, &fields);
    FormDefinition {
        id: raw.id,
        slug: raw.slug,
        title: raw.title,
        description: raw.description,
        fields,
        submit_label: raw.submit_label,
    }
}

/// Answers live in one flat store, so every field and sub-field name must be
/// unique within the form. A CMS payload violating that still normalizes, but
/// later answers silently shadow earlier ones, so it is worth a warning.
fn warn_on_duplicate_names(slug: &str, fields: &[FieldDefinition]) {
    let mut seen = BTreeSet::new();
    for field in fields {
        let names =
            std::iter::once(&field.name).chain(field.sub_fields.iter().map(|sub| &sub.name));
        for name in names {
            if !seen.insert(name.clone()) {
                warn!(form = slug, field = %name, "duplicate field name in form definition");
            }
        }
    }
}

fn normalize_field(raw: RawFieldDefinition) -> FieldDefinition {
    let sub_fields = if raw.field_type == FieldType::Compound {
        extract_sub_fields(raw.validation_rules.as_ref())
    } else {
        Vec::new()
    };
    if raw.field_type == FieldType::Compound && sub_fields.is_empty() {
        debug!(field = %raw.name, "compound field normalized with no sub-fields");
    }
    FieldDefinition {
        name: raw.name,
        field_type: raw.field_type,
        label: raw.label,
        placeholder: raw.placeholder,
        help_text: raw.help_text,
        required: raw.required,
        display_order: raw.display_order.unwrap_or(0),
        options: raw.options,
        conditional: raw.conditional,
        sub_fields,
    }
}

/// Pulls sub-field descriptors out of `validation_rules.fields`. Entries that
/// fail to deserialize are skipped rather than failing the form.
fn extract_sub_fields(rules: Option<&Value>) -> Vec<SubField> {
    let Some(entries) = rules.and_then(|value| value.get("fields")).and_then(Value::as_array)
    else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| serde_json::from_value::<RawSubField>(entry.clone()).ok())
        .map(|raw| {
            let label = raw.label.unwrap_or_else(|| raw.name.clone());
            SubField {
                name: raw.name,
                kind: raw.kind,
                label,
                placeholder: raw.placeholder,
                required: raw.required,
            }
        })
        .collect()
}
