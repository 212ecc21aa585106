//! Shared CLI output helpers with consistent labels and colors.

use std::fmt;

use colored::Colorize;

#[derive(Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[✓]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let (label, icon) = build_label(kind);
    let base = format!("{label}: {icon} {message}");
    match kind {
        MessageKind::Info => base.normal().to_string(),
        MessageKind::Success => base.green().to_string(),
        MessageKind::Warning => base.yellow().to_string(),
        MessageKind::Error => base.red().bold().to_string(),
    }
}

pub fn info(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Info, message));
}

pub fn success(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Success, message));
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Warning, message));
}

/// Errors go to stderr so scripted callers can separate them from prompts.
pub fn error(message: impl fmt::Display) {
    eprintln!("{}", apply_style(MessageKind::Error, message));
}

/// Section header used above each wizard step.
pub fn section(title: impl fmt::Display) {
    println!();
    println!("{}", format!("=== {} ===", title).bold());
}

/// Indented detail line under a header or summary entry.
pub fn detail(message: impl fmt::Display) {
    println!("  {message}");
}
