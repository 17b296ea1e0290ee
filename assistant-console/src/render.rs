//! Text rendering of views and service lookups.
//!
//! Every function returns a `String`; the console decides where to print it.

use std::fmt::Write;

use answer_client::{Citation, DocList, DocumentInfo, health_service::HealthStatus};
use ask_session::{CitationsPanel, EscalationPanel, EscalationReason, View};
use colored::Colorize;

const FOOTER: &str = "Internal: do not share externally";

/// Renders a [`View`]. Idle renders as an empty string.
pub fn view(view: &View) -> String {
    let mut out = String::new();

    if view.loading {
        out.push_str(&"Asking...".dimmed().to_string());
        return out;
    }
    if let Some(err) = &view.error {
        let _ = writeln!(out, "{} {}", "Error:".red().bold(), err.red());
        return out;
    }

    let no_answer = view
        .escalation
        .as_ref()
        .is_some_and(|e| e.reason == EscalationReason::NoAnswerFound);

    if let Some(answer) = &view.answer {
        let _ = writeln!(out, "{answer}\n");
    } else if let Some(esc) = view.escalation.as_ref().filter(|_| no_answer) {
        escalation(&mut out, esc);
    }
    if let Some(panel) = &view.citations {
        citations(&mut out, panel);
    }
    if let Some(esc) = view.escalation.as_ref().filter(|_| !no_answer) {
        escalation(&mut out, esc);
    }
    if view.copy_enabled {
        let _ = writeln!(out, "{}", "(:copy to copy the answer)".dimmed());
    }
    if !out.is_empty() {
        let _ = writeln!(out, "{}", FOOTER.dimmed().italic());
    }
    out
}

fn citations(out: &mut String, panel: &CitationsPanel) {
    if !panel.items.is_empty() {
        let _ = writeln!(out, "{}", "Sources".bold());
        for (i, c) in panel.items.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}{}", i + 1, c.doc_id.cyan(), location(c));
            if !c.snippet.is_empty() {
                let _ = writeln!(out, "     {}", c.snippet);
            }
        }
    }
    if !panel.policy_matches.is_empty() {
        let _ = writeln!(
            out,
            "{} {}",
            "Matched policies:".bold(),
            panel.policy_matches.join(", ")
        );
    }
    if let Some(conf) = &panel.confidence {
        let _ = writeln!(out, "{} {}", "Confidence:".bold(), conf);
    }
    if let Some(disclaimer) = &panel.disclaimer {
        let _ = writeln!(out, "{}", disclaimer.italic());
    }
    out.push('\n');
}

fn location(c: &Citation) -> String {
    match (&c.section, c.page) {
        (Some(s), Some(p)) => format!(" (section {s}, p. {p})"),
        (Some(s), None) => format!(" (section {s})"),
        (None, Some(p)) => format!(" (p. {p})"),
        (None, None) => String::new(),
    }
}

fn escalation(out: &mut String, panel: &EscalationPanel) {
    let title = match panel.reason {
        EscalationReason::NoAnswerFound => "No answer found. Please contact HR:",
        EscalationReason::HumanFallback => "Need a human?",
    };
    let _ = writeln!(out, "{}", title.yellow().bold());
    let _ = writeln!(out, "  Email: {}", panel.email_link.underline());
    let _ = writeln!(out, "  Chat:  {}", panel.chat_link.underline());
    out.push('\n');
}

pub fn docs(list: &DocList) -> String {
    if list.docs.is_empty() {
        return "No documents indexed.".dimmed().to_string();
    }
    let mut out = format!("{}\n", "Indexed documents".bold());
    for id in &list.docs {
        let _ = writeln!(out, "  {}", id.cyan());
    }
    out
}

pub fn document(doc: &DocumentInfo) -> String {
    let mut out = format!("{}\n", doc.doc_id.cyan().bold());
    let fields = [
        ("Title", &doc.title),
        ("Owner", &doc.owner),
        ("URL", &doc.url),
    ];
    for (label, value) in fields {
        if let Some(v) = value {
            let _ = writeln!(out, "  {label}: {v}");
        }
    }
    out
}

pub fn health(status: &HealthStatus) -> String {
    let verdict = if status.ok {
        "healthy".green().bold()
    } else {
        "unhealthy".red().bold()
    };
    format!(
        "{} {} in {} ms: {}",
        status.endpoint, verdict, status.latency_ms, status.message
    )
}

pub fn notice(msg: &str) -> String {
    msg.dimmed().to_string()
}

pub fn error(msg: &str) -> String {
    format!("{} {}", "Error:".red().bold(), msg.red())
}
