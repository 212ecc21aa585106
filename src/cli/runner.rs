//! Interactive front-end that drives a [`FormSession`] one question at a time.
//!
//! This layer only consumes the session's read-only snapshots and mutators;
//! every gating decision (can the user advance, can they submit) belongs to
//! the engine.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use super::output;
use crate::client::InquiryApi;
use crate::engine::{AnswerValue, FormSession};
use crate::errors::InquiryError;
use crate::schema::{normalize_form, FieldDefinition, FieldType, FormDefinition};

const BACK_COMMAND: &str = ":back";
const CANCEL_COMMAND: &str = ":cancel";

/// Where a single prompt left the wizard.
enum StepControl {
    Answered,
    Back,
    Cancel,
}

/// Loads the catalog and loops the form picker until the user exits.
pub fn run_cli(api: &dyn InquiryApi) -> Result<(), InquiryError> {
    let catalog: Vec<FormDefinition> = api
        .fetch_catalog()?
        .into_iter()
        .map(normalize_form)
        .collect();
    if catalog.is_empty() {
        output::info("No inquiry forms are available right now.");
        return Ok(());
    }
    loop {
        let Some(form) = pick_form(&catalog)? else {
            return Ok(());
        };
        run_form(api, form)?;
    }
}

fn pick_form<'a>(catalog: &'a [FormDefinition]) -> Result<Option<&'a FormDefinition>, InquiryError> {
    let mut items: Vec<String> = catalog.iter().map(|form| form.title.clone()).collect();
    items.push("Exit".into());

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which inquiry would you like to start?")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_failure)?;

    Ok(catalog.get(choice))
}

fn run_form(api: &dyn InquiryApi, form: &FormDefinition) -> Result<(), InquiryError> {
    let mut session = FormSession::new(form.clone());
    if session.visible_fields().is_empty() {
        output::warning("This form has no questions yet.");
        return Ok(());
    }
    if let Some(description) = &form.description {
        output::info(description);
    }

    loop {
        let Some(field) = session.current_field().cloned() else {
            // Visibility changes can empty the sequence mid-run.
            output::warning("This form has no questions left to answer.");
            return Ok(());
        };
        output::section(format!(
            "Step {} of {} — {}",
            session.cursor() + 1,
            session.visible_fields().len(),
            field.label
        ));
        if let Some(help) = &field.help_text {
            output::detail(help);
        }

        match prompt_field(&mut session, &field)? {
            StepControl::Cancel => {
                output::info("Inquiry cancelled.");
                return Ok(());
            }
            StepControl::Back => {
                if !session.back() {
                    output::warning("Already at the first question.");
                }
            }
            StepControl::Answered => {
                if session.is_last_step() {
                    if review_and_submit(api, &mut session)? {
                        return Ok(());
                    }
                } else if !session.next() {
                    output::warning("This question is required before moving on.");
                }
            }
        }
    }
}

fn prompt_field(
    session: &mut FormSession,
    field: &FieldDefinition,
) -> Result<StepControl, InquiryError> {
    match field.field_type {
        FieldType::Select | FieldType::Radio => prompt_choice(session, field),
        FieldType::Checkbox => prompt_confirm(session, field),
        FieldType::CheckboxGroup => prompt_multi(session, field),
        FieldType::Compound => prompt_compound(session, field),
        FieldType::Unknown => {
            output::warning(format!(
                "`{}` uses a question type this client does not support yet; skipping.",
                field.label
            ));
            Ok(StepControl::Answered)
        }
        _ => prompt_text(session, field),
    }
}

fn prompt_text(
    session: &mut FormSession,
    field: &FieldDefinition,
) -> Result<StepControl, InquiryError> {
    output::detail(format!(
        "Type {BACK_COMMAND} to revisit the previous question, {CANCEL_COMMAND} to abandon the inquiry."
    ));
    let existing = session
        .answers()
        .get(&field.name)
        .and_then(AnswerValue::as_text)
        .map(str::to_string);

    loop {
        let raw = read_line(&text_prompt_label(field), existing.as_deref())?;
        let value = raw.trim();

        match value {
            BACK_COMMAND => return Ok(StepControl::Back),
            CANCEL_COMMAND => return Ok(StepControl::Cancel),
            _ => {}
        }
        if let Some(hint) = format_hint(field.field_type, value) {
            output::warning(hint);
            continue;
        }
        if value.is_empty() {
            session.clear_answer(&field.name);
        } else {
            session.set_answer(&field.name, AnswerValue::text(value));
        }
        return Ok(StepControl::Answered);
    }
}

/// One free-form line, pre-filled with the existing answer when revisiting.
fn read_line(label: &str, initial: Option<&str>) -> Result<String, InquiryError> {
    let result = match initial {
        Some(text) => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .allow_empty(true)
            .with_initial_text(text)
            .interact_text(),
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .allow_empty(true)
            .interact_text(),
    };
    result.map_err(prompt_failure)
}

fn text_prompt_label(field: &FieldDefinition) -> String {
    match &field.placeholder {
        Some(placeholder) => format!("{} ({placeholder})", field.label),
        None => field.label.clone(),
    }
}

/// Format courtesy checks applied before an answer is stored. The engine's
/// own validation only enforces the required contract; these keep obviously
/// malformed dates and numbers out of the payload.
fn format_hint(field_type: FieldType, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match field_type {
        FieldType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .err()
            .map(|_| "Use YYYY-MM-DD format.".to_string()),
        FieldType::Number => value
            .parse::<f64>()
            .err()
            .map(|_| "Enter a numeric value.".to_string()),
        FieldType::Email => (!value.contains('@')).then(|| "Enter a valid email address.".into()),
        _ => None,
    }
}

fn prompt_choice(
    session: &mut FormSession,
    field: &FieldDefinition,
) -> Result<StepControl, InquiryError> {
    if field.options.is_empty() {
        output::warning(format!("`{}` has no options to choose from.", field.label));
        return Ok(StepControl::Answered);
    }

    let mut items: Vec<String> = field.options.iter().map(|opt| opt.label.clone()).collect();
    let back_index = (session.cursor() > 0).then(|| {
        items.push("← Back".into());
        items.len() - 1
    });

    let default = session
        .answers()
        .get(&field.name)
        .and_then(AnswerValue::as_text)
        .and_then(|value| field.options.iter().position(|opt| opt.value == value))
        .unwrap_or(0);

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(field.label.clone())
        .items(&items)
        .default(default)
        .interact()
        .map_err(prompt_failure)?;

    if back_index == Some(choice) {
        return Ok(StepControl::Back);
    }
    session.set_answer(&field.name, AnswerValue::text(field.options[choice].value.clone()));
    Ok(StepControl::Answered)
}

fn prompt_confirm(
    session: &mut FormSession,
    field: &FieldDefinition,
) -> Result<StepControl, InquiryError> {
    let current = matches!(
        session.answers().get(&field.name),
        Some(AnswerValue::Flag(true))
    );
    let value = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(field.label.clone())
        .default(current)
        .interact()
        .map_err(prompt_failure)?;
    session.set_answer(&field.name, AnswerValue::Flag(value));
    Ok(StepControl::Answered)
}

fn prompt_multi(
    session: &mut FormSession,
    field: &FieldDefinition,
) -> Result<StepControl, InquiryError> {
    if field.options.is_empty() {
        output::warning(format!("`{}` has no options to choose from.", field.label));
        return Ok(StepControl::Answered);
    }

    let current: Vec<String> = match session.answers().get(&field.name) {
        Some(AnswerValue::Selections(items)) => items.clone(),
        _ => Vec::new(),
    };
    let labels: Vec<String> = field.options.iter().map(|opt| opt.label.clone()).collect();
    let checked: Vec<bool> = field
        .options
        .iter()
        .map(|opt| current.contains(&opt.value))
        .collect();

    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(field.label.clone())
        .items(&labels)
        .defaults(&checked)
        .interact()
        .map_err(prompt_failure)?;

    // Reconcile through the store's toggle semantics rather than overwriting.
    for (index, option) in field.options.iter().enumerate() {
        let was = current.iter().any(|value| value == &option.value);
        let now = picked.contains(&index);
        if was != now {
            session.toggle_selection(&field.name, &option.value);
        }
    }
    Ok(StepControl::Answered)
}

fn prompt_compound(
    session: &mut FormSession,
    field: &FieldDefinition,
) -> Result<StepControl, InquiryError> {
    if field.sub_fields.is_empty() {
        output::detail("Nothing to fill in for this step.");
        return Ok(StepControl::Answered);
    }
    output::detail(format!(
        "Type {BACK_COMMAND} at any point to revisit the previous question."
    ));

    for sub in &field.sub_fields {
        loop {
            let existing = session
                .answers()
                .get(&sub.name)
                .and_then(AnswerValue::as_text)
                .map(str::to_string);
            let raw = read_line(&sub.label, existing.as_deref())?;
            let value = raw.trim();

            match value {
                BACK_COMMAND => return Ok(StepControl::Back),
                CANCEL_COMMAND => return Ok(StepControl::Cancel),
                _ => {}
            }
            if let Some(hint) = format_hint(sub.kind, value) {
                output::warning(hint);
                continue;
            }
            if value.is_empty() {
                session.clear_answer(&sub.name);
            } else {
                session.set_answer(&sub.name, AnswerValue::text(value));
            }
            break;
        }
    }
    Ok(StepControl::Answered)
}

/// Shows the review summary and drives the terminal submit. Returns `true`
/// when the session is finished (submitted or abandoned) and the caller
/// should go back to the catalog.
fn review_and_submit(
    api: &dyn InquiryApi,
    session: &mut FormSession,
) -> Result<bool, InquiryError> {
    if let Some(index) = session.first_invalid() {
        output::warning("Some required questions still need answers.");
        session.jump_to(index);
        return Ok(false);
    }

    output::section("Review your inquiry");
    for field in session.visible_fields().to_vec() {
        output::detail(format!("{}: {}", field.label, render_answer(session, &field)));
    }

    let items = vec![
        session.form().submit_label().to_string(),
        "← Back".to_string(),
        "Cancel".to_string(),
    ];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Ready to send?")
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_failure)?;

    match choice {
        0 => {
            let Some(ticket) = session.begin_submission() else {
                return Ok(false);
            };
            // Navigation and submit affordances stay locked while in flight.
            output::info("Sending your inquiry…");
            match api.submit(&ticket.slug, &ticket.payload) {
                Ok(receipt) => {
                    session.complete_submission(&ticket, true);
                    let message = receipt.message.unwrap_or_else(|| {
                        "Thank you! Our travel planners will be in touch shortly.".into()
                    });
                    output::success(message);
                    Ok(true)
                }
                Err(err) => {
                    session.complete_submission(&ticket, false);
                    output::error(&err);
                    output::info("Your answers were kept; you can try submitting again.");
                    Ok(false)
                }
            }
        }
        1 => {
            session.back();
            Ok(false)
        }
        _ => {
            output::info("Inquiry cancelled.");
            Ok(true)
        }
    }
}

fn render_answer(session: &FormSession, field: &FieldDefinition) -> String {
    if field.field_type == FieldType::Compound {
        let parts: Vec<String> = field
            .sub_fields
            .iter()
            .map(|sub| {
                let value = session
                    .answers()
                    .get(&sub.name)
                    .and_then(AnswerValue::as_text)
                    .unwrap_or("—");
                format!("{}: {}", sub.label, value)
            })
            .collect();
        return parts.join("; ");
    }
    match session.answers().get(&field.name) {
        Some(AnswerValue::Text(value)) => field
            .options
            .iter()
            .find(|opt| &opt.value == value)
            .map(|opt| opt.label.clone())
            .unwrap_or_else(|| value.clone()),
        Some(AnswerValue::Flag(flag)) => if *flag { "Yes" } else { "No" }.to_string(),
        Some(AnswerValue::Selections(items)) => {
            let labels: Vec<String> = items
                .iter()
                .map(|value| {
                    field
                        .options
                        .iter()
                        .find(|opt| &opt.value == value)
                        .map(|opt| opt.label.clone())
                        .unwrap_or_else(|| value.clone())
                })
                .collect();
            labels.join(", ")
        }
        None => "—".to_string(),
    }
}

fn prompt_failure(err: dialoguer::Error) -> InquiryError {
    InquiryError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        err.to_string(),
    ))
}
