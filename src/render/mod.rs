use crate::feature::{self, FeatureStatus};
use crate::plan;
use minijinja::{context, Environment};
use serde::Serialize;
use std::fmt;

// ===================================================================
// Built-in status banner
// ===================================================================

/// Render the status banner with the built-in layout.
///
/// `plan_exists` reports whether the current subtask's linked plan file is
/// actually on disk; it is ignored when there is no link to begin with.
pub fn banner(status: &FeatureStatus, plan_exists: bool, width: usize) -> String {
    let rule = "━".repeat(width);
    let mut lines = vec![
        rule.clone(),
        format!(
            "📋 {}",
            status.name.as_deref().unwrap_or("Unknown Feature")
        ),
        format!("   Status: {}", status.status.as_deref().unwrap_or("Unknown")),
    ];
    match status.current() {
        Some(subtask) => {
            lines.push(format!(
                "   Current: Subtask {} — {}",
                subtask.number,
                feature::display_title(&subtask.title)
            ));
            match subtask.plan_file.as_deref() {
                Some(file) if plan_exists => lines.push(format!("   Plan: ✅ {file}")),
                Some(file) => {
                    lines.push(format!("   Plan: ⚠️ {file} (referenced but missing)"))
                }
                None => lines.push(format!(
                    "   Plan: ❌ Missing (create plan-subtask-{}.md)",
                    subtask.number
                )),
            }
        }
        None => lines.push("   Current: All subtasks completed! 🎉".to_string()),
    }
    lines.push(rule);
    lines.join("\n")
}

// ===================================================================
// Deny diagnostic
// ===================================================================

/// Default denial text, shown when a plan file is written outside its
/// feature folder.
pub const DEFAULT_DENY_TEMPLATE: &str = "\
❌ План має бути в папці фічі!

   Неправильно: {{ path }}
   Правильно:   {{ expected }}

Перевір активну фічу в CLAUDE.md і збережи план у відповідну папку.";

// ===================================================================
// Error: only template rendering can fail in pure code
// ===================================================================

#[derive(Debug)]
pub enum RenderError {
    Template(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Template(msg) => write!(f, "template error: {msg}"),
        }
    }
}

// ===================================================================
// Template rendering (pure computation)
// ===================================================================

/// The `current` object exposed to custom banner templates.
#[derive(Debug, Serialize)]
struct SubtaskContext<'a> {
    number: u32,
    title: &'a str,
    plan_file: Option<&'a str>,
    plan_exists: bool,
}

/// Render the banner through a user-supplied template. Context: `rule`,
/// `name`, `status`, and `current` (none when all subtasks are checked).
pub fn banner_from_template(
    template: &str,
    status: &FeatureStatus,
    plan_exists: bool,
    width: usize,
) -> Result<String, RenderError> {
    let env = Environment::new();
    let tmpl = env
        .template_from_str(template)
        .map_err(|e| RenderError::Template(format!("parsing template: {e}")))?;
    let current = status.current().map(|s| SubtaskContext {
        number: s.number,
        title: feature::display_title(&s.title),
        plan_file: s.plan_file.as_deref(),
        plan_exists,
    });
    tmpl.render(context! {
        rule => "━".repeat(width),
        name => status.name.as_deref(),
        status => status.status.as_deref(),
        current => current,
    })
    .map_err(|e| RenderError::Template(format!("rendering template: {e}")))
}

/// Render a denial diagnostic. Context: `path` (the rejected location) and
/// `expected` (the fixed location template).
pub fn deny_message(template: &str, path: &str) -> Result<String, RenderError> {
    let env = Environment::new();
    let tmpl = env
        .template_from_str(template)
        .map_err(|e| RenderError::Template(format!("parsing template: {e}")))?;
    tmpl.render(context! {
        path,
        expected => plan::EXPECTED_LOCATION,
    })
    .map_err(|e| RenderError::Template(format!("rendering template: {e}")))
}
