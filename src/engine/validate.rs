//! Per-field-type answer validation.
//!
//! One predicate per [`FieldType`] variant, used both for gating the
//! next-step transition and, folded over the visible sequence, for gating the
//! terminal submit. Non-required fields always pass. Unrecognized field types
//! also pass: an unsupported question must never strand the user.

use crate::engine::answers::{AnswerStore, AnswerValue};
use crate::schema::{FieldDefinition, FieldType};

/// Whether the answer currently stored for `field` satisfies its required
/// contract.
pub fn is_valid(field: &FieldDefinition, answers: &AnswerStore) -> bool {
    if !field.required {
        return true;
    }
    match field.field_type {
        FieldType::ShortText
        | FieldType::Email
        | FieldType::Phone
        | FieldType::Number
        | FieldType::LongText
        | FieldType::Date => non_empty_text(answers.get(&field.name)),
        FieldType::Select | FieldType::Radio => non_empty_text(answers.get(&field.name)),
        FieldType::Checkbox => {
            matches!(answers.get(&field.name), Some(AnswerValue::Flag(true)))
        }
        FieldType::CheckboxGroup => matches!(
            answers.get(&field.name),
            Some(AnswerValue::Selections(items)) if !items.is_empty()
        ),
        FieldType::Compound => field
            .sub_fields
            .iter()
            .filter(|sub| sub.required)
            .all(|sub| non_empty_text(answers.get(&sub.name))),
        FieldType::Unknown => true,
    }
}

/// Logical AND of [`is_valid`] over the visible sequence; the gate for the
/// terminal submit action.
pub fn all_fields_valid(sequence: &[FieldDefinition], answers: &AnswerStore) -> bool {
    sequence.iter().all(|field| is_valid(field, answers))
}

fn non_empty_text(answer: Option<&AnswerValue>) -> bool {
    matches!(answer, Some(AnswerValue::Text(value)) if !value.trim().is_empty())
}
