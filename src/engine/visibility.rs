//! Conditional-logic resolution over the current answer set.
//!
//! The visible sequence is never stored on its own; it is recomputed from the
//! form definition and the answer store after every answer mutation, so a
//! change to any upstream answer immediately reshapes the question order.

use crate::engine::answers::AnswerStore;
use crate::schema::FieldDefinition;

/// Computes the currently visible fields, sorted ascending by display order
/// with field name as the tie-break. Deterministic and side-effect-free:
/// identical inputs yield an identical, identically-ordered list.
pub fn resolve(fields: &[FieldDefinition], answers: &AnswerStore) -> Vec<FieldDefinition> {
    let mut visible: Vec<FieldDefinition> = fields
        .iter()
        .filter(|field| is_visible(field, answers))
        .cloned()
        .collect();
    visible.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
    visible
}

fn is_visible(field: &FieldDefinition, answers: &AnswerStore) -> bool {
    let Some(rule) = &field.conditional else {
        return true;
    };
    // Hide wins over show when both arms are populated.
    if let Some(hide) = &rule.hide_when {
        if answers.matches(&rule.depends_on, hide) {
            return false;
        }
    }
    if let Some(show) = &rule.show_when {
        return answers.matches(&rule.depends_on, show);
    }
    true
}
