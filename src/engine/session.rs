//! Linear step state machine over the resolved visible-field sequence.
//!
//! A [`FormSession`] owns the selected form, the answer store, and the cursor,
//! and exposes read-only snapshots so a presentation layer can render progress
//! and enabled/disabled navigation without reaching into internal state.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::{debug, info};

use crate::engine::answers::{AnswerStore, AnswerValue};
use crate::engine::{validate, visibility};
use crate::schema::{FieldDefinition, FormDefinition};

/// Monotonic source for submission generations. Each session instance and
/// each completed submission gets a fresh value, so a result arriving for a
/// superseded session can never be confused with the active one.
static GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Handed out by [`FormSession::begin_submission`]; carries everything the
/// transport needs plus the generation used to detect stale results.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub slug: String,
    pub payload: serde_json::Map<String, Value>,
    generation: u64,
}

/// What applying a transport result to the session amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The submission succeeded; answers, cursor, and selection state were
    /// reset and the caller should return to the form catalog.
    Completed,
    /// The submission failed; every answer and the cursor position were
    /// preserved so the user can retry without re-entering anything.
    Failed,
    /// The result belonged to an earlier session or submission and was
    /// ignored entirely.
    Superseded,
}

/// In-progress run of one inquiry form.
pub struct FormSession {
    form: FormDefinition,
    answers: AnswerStore,
    visible: Vec<FieldDefinition>,
    cursor: usize,
    generation: u64,
    in_flight: bool,
}

impl FormSession {
    /// Starts a fresh session over a normalized form with an empty answer
    /// store and the cursor on the first visible question.
    pub fn new(form: FormDefinition) -> Self {
        let answers = AnswerStore::new();
        let visible = visibility::resolve(&form.fields, &answers);
        Self {
            form,
            answers,
            visible,
            cursor: 0,
            generation: next_generation(),
            in_flight: false,
        }
    }

    // --- read-only snapshots -------------------------------------------------

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn visible_fields(&self) -> &[FieldDefinition] {
        &self.visible
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_field(&self) -> Option<&FieldDefinition> {
        self.visible.get(self.cursor)
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn is_current_valid(&self) -> bool {
        self.current_field()
            .map(|field| validate::is_valid(field, &self.answers))
            .unwrap_or(false)
    }

    pub fn all_valid(&self) -> bool {
        validate::all_fields_valid(&self.visible, &self.answers)
    }

    pub fn is_last_step(&self) -> bool {
        !self.visible.is_empty() && self.cursor + 1 == self.visible.len()
    }

    /// Whether the next-step affordance should be enabled.
    pub fn can_advance(&self) -> bool {
        self.cursor + 1 < self.visible.len() && self.is_current_valid()
    }

    /// Whether the terminal submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        self.is_last_step() && self.all_valid() && !self.in_flight
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    // --- answer mutation -----------------------------------------------------

    /// Records an answer and recomputes visibility. If the set of visible
    /// field names changed, the cursor resets to 0 so it can never point at a
    /// question that just disappeared.
    pub fn set_answer(&mut self, name: &str, value: AnswerValue) {
        self.answers.set(name, value);
        self.refresh_visibility();
    }

    pub fn clear_answer(&mut self, name: &str) {
        self.answers.remove(name);
        self.refresh_visibility();
    }

    /// Checkbox-group toggle; same visibility refresh as [`set_answer`].
    ///
    /// [`set_answer`]: FormSession::set_answer
    pub fn toggle_selection(&mut self, name: &str, option: &str) {
        self.answers.toggle_selection(name, option);
        self.refresh_visibility();
    }

    fn refresh_visibility(&mut self) {
        let next = visibility::resolve(&self.form.fields, &self.answers);
        let before: BTreeSet<&str> = self.visible.iter().map(|f| f.name.as_str()).collect();
        let after: BTreeSet<&str> = next.iter().map(|f| f.name.as_str()).collect();
        if before != after {
            debug!(
                form = %self.form.slug,
                was = before.len(),
                now = after.len(),
                "visible set changed, cursor reset"
            );
            self.cursor = 0;
        } else if self.cursor >= next.len() && !next.is_empty() {
            self.cursor = next.len() - 1;
        }
        self.visible = next;
    }

    // --- navigation ----------------------------------------------------------

    /// Advances to the next question. No-op unless a next question exists and
    /// the current one is valid; the UI is expected to render the affordance
    /// disabled rather than rely on the no-op.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Retreats one question. Never validity-gated.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Direct jump, e.g. from a step indicator. Backward jumps are always
    /// allowed; forward jumps are restricted to the immediate next step and
    /// gated on current-field validity.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.visible.len() {
            return false;
        }
        if index <= self.cursor {
            self.cursor = index;
            return true;
        }
        if index == self.cursor + 1 && self.is_current_valid() {
            self.cursor = index;
            return true;
        }
        false
    }

    /// Index of the first visible field failing validation, if any. Lets the
    /// review screen send the user back to exactly the question that blocks
    /// submission.
    pub fn first_invalid(&self) -> Option<usize> {
        self.visible
            .iter()
            .position(|field| !validate::is_valid(field, &self.answers))
    }

    // --- submission ----------------------------------------------------------

    /// Opens a submission attempt. Returns `None` unless the session is on
    /// the last step with every visible field valid and no other attempt in
    /// flight. While a ticket is outstanding the submit affordance reports
    /// disabled.
    pub fn begin_submission(&mut self) -> Option<SubmissionTicket> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        info!(form = %self.form.slug, answers = self.answers.len(), "submission started");
        Some(SubmissionTicket {
            slug: self.form.slug.clone(),
            payload: self.answers.to_payload(),
            generation: self.generation,
        })
    }

    /// Applies the transport result for a previously issued ticket.
    ///
    /// A ticket whose generation no longer matches belonged to a session that
    /// has since been reset or completed; its result is ignored rather than
    /// mutating state for a form the user already left.
    pub fn complete_submission(
        &mut self,
        ticket: &SubmissionTicket,
        succeeded: bool,
    ) -> SubmissionOutcome {
        if ticket.generation != self.generation {
            debug!(form = %self.form.slug, "ignoring result for superseded submission");
            return SubmissionOutcome::Superseded;
        }
        self.in_flight = false;
        if succeeded {
            info!(form = %self.form.slug, "submission completed");
            self.generation = next_generation();
            self.answers.reset();
            self.cursor = 0;
            self.visible = visibility::resolve(&self.form.fields, &self.answers);
            SubmissionOutcome::Completed
        } else {
            info!(form = %self.form.slug, "submission failed, answers preserved");
            SubmissionOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConditionalRule, FieldType, FormDefinition};
    use uuid::Uuid;

    fn text_field(name: &str, order: i64, required: bool) -> FieldDefinition {
        FieldDefinition {
            name: name.into(),
            field_type: FieldType::ShortText,
            label: name.into(),
            placeholder: None,
            help_text: None,
            required,
            display_order: order,
            options: Vec::new(),
            conditional: None,
            sub_fields: Vec::new(),
        }
    }

    fn form(fields: Vec<FieldDefinition>) -> FormDefinition {
        FormDefinition {
            id: Uuid::new_v4(),
            slug: "plan-your-trip".into(),
            title: "Plan your trip".into(),
            description: None,
            fields,
            submit_label: None,
        }
    }

    fn three_step_session() -> FormSession {
        FormSession::new(form(vec![
            text_field("a", 1, true),
            text_field("b", 2, true),
            text_field("c", 3, true),
        ]))
    }

    #[test]
    fn next_refuses_to_advance_past_an_invalid_field() {
        let mut session = three_step_session();
        assert!(!session.next());
        assert_eq!(session.cursor(), 0);

        session.set_answer("a", AnswerValue::text("done"));
        assert!(session.next());
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn back_is_never_validity_gated() {
        let mut session = three_step_session();
        session.set_answer("a", AnswerValue::text("done"));
        session.next();
        session.clear_answer("b");
        assert!(session.back());
        assert_eq!(session.cursor(), 0);
        assert!(!session.back());
    }

    #[test]
    fn forward_jumps_limited_to_the_immediate_next_step() {
        let mut session = three_step_session();
        session.set_answer("a", AnswerValue::text("done"));
        assert!(!session.jump_to(2));
        assert!(session.jump_to(1));
        assert!(session.jump_to(0));
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn cursor_resets_only_when_the_visible_identity_set_changes() {
        let mut hidden = text_field("b", 2, false);
        hidden.conditional = Some(ConditionalRule {
            depends_on: "a".into(),
            show_when: Some("yes".into()),
            hide_when: None,
        });
        let mut session = FormSession::new(form(vec![
            text_field("a", 1, true),
            hidden,
            text_field("c", 3, true),
        ]));

        session.set_answer("a", AnswerValue::text("maybe"));
        session.next();
        assert_eq!(session.cursor(), 1);

        // same identity set: cursor preserved
        session.set_answer("c", AnswerValue::text("hello"));
        assert_eq!(session.cursor(), 1);

        // field `b` appears: identity set changed, cursor resets
        session.set_answer("a", AnswerValue::text("yes"));
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.visible_fields().len(), 3);
        assert_eq!(session.visible_fields()[1].name, "b");
    }

    #[test]
    fn submit_only_available_on_a_fully_valid_last_step() {
        let mut session = three_step_session();
        assert!(session.begin_submission().is_none());

        for (name, value) in [("a", "1"), ("b", "2"), ("c", "3")] {
            session.set_answer(name, AnswerValue::text(value));
            session.next();
        }
        assert!(session.is_last_step());
        assert!(session.can_submit());
        let ticket = session.begin_submission().expect("ticket issued");
        assert_eq!(ticket.slug, "plan-your-trip");
        assert_eq!(ticket.payload.len(), 3);

        // a second attempt while one is in flight is refused
        assert!(session.begin_submission().is_none());
    }

    #[test]
    fn successful_submission_resets_answers_and_cursor() {
        let mut session = three_step_session();
        for (name, value) in [("a", "1"), ("b", "2"), ("c", "3")] {
            session.set_answer(name, AnswerValue::text(value));
            session.next();
        }
        let ticket = session.begin_submission().expect("ticket issued");
        let outcome = session.complete_submission(&ticket, true);
        assert_eq!(outcome, SubmissionOutcome::Completed);
        assert!(session.answers().is_empty());
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn failed_submission_preserves_answers_and_position() {
        let mut session = three_step_session();
        for (name, value) in [("a", "1"), ("b", "2"), ("c", "3")] {
            session.set_answer(name, AnswerValue::text(value));
            session.next();
        }
        let ticket = session.begin_submission().expect("ticket issued");
        let outcome = session.complete_submission(&ticket, false);
        assert_eq!(outcome, SubmissionOutcome::Failed);
        assert_eq!(session.answers().len(), 3);
        assert!(session.is_last_step());
        assert!(session.can_submit());
    }

    #[test]
    fn stale_ticket_from_an_earlier_run_is_ignored() {
        let mut session = three_step_session();
        for (name, value) in [("a", "1"), ("b", "2"), ("c", "3")] {
            session.set_answer(name, AnswerValue::text(value));
            session.next();
        }
        let stale = session.begin_submission().expect("ticket issued");
        session.complete_submission(&stale, true);

        // the session has moved on; the duplicate arrival must not touch it
        session.set_answer("a", AnswerValue::text("fresh"));
        let outcome = session.complete_submission(&stale, true);
        assert_eq!(outcome, SubmissionOutcome::Superseded);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn empty_form_has_no_current_field_and_cannot_submit() {
        let mut session = FormSession::new(form(Vec::new()));
        assert!(session.current_field().is_none());
        assert!(!session.is_last_step());
        assert!(session.begin_submission().is_none());
    }
}
