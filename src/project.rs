use crate::feature::{self, FeatureStatus};
use crate::plan::{self, Verdict};
use crate::preferences::{MessageTemplate, Preferences};
use crate::render;
use crate::types::{HookOutput, PreToolUseInput, SessionStartInput};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable carrying the project root, set by the host for
/// every hook invocation.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

pub struct Project {
    root: PathBuf,
    prefs: Preferences,
}

impl Project {
    /// Resolve the project root from `CLAUDE_PROJECT_DIR` (falling back to
    /// the current directory), load preferences, and return a `Project`
    /// ready for use.
    pub fn locate() -> Option<Self> {
        let root = match env::var_os(PROJECT_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => env::current_dir().ok()?,
        };
        let root = if root.is_absolute() {
            root
        } else {
            env::current_dir().ok()?.join(root)
        };
        let prefs = Preferences::load(&root);
        Some(Self { root, prefs })
    }

    // ---------------------------------------------------------------
    // Hook handlers
    // ---------------------------------------------------------------

    /// Build the status banner for a fresh session. Returns `None` whenever
    /// a needed piece is missing: no tracking doc, no active-feature link,
    /// no readable feature doc. The hook stays silent in that case.
    pub fn handle_session_start(&self, input: &SessionStartInput) -> Option<HookOutput> {
        if !input.is_startup() {
            return None;
        }
        let tracking = fs::read_to_string(self.root.join(feature::TRACKING_DOC)).ok()?;
        let target = feature::find_active_feature(&tracking)?;
        let doc_path = self.root.join(feature::feature_doc_path(target));
        let doc = fs::read_to_string(&doc_path).ok()?;
        let status = FeatureStatus::parse(&doc);

        // A linked plan file lives next to the feature doc.
        let plan_file = status.current().and_then(|s| s.plan_file.as_deref());
        let plan_exists = match (doc_path.parent(), plan_file) {
            (Some(dir), Some(file)) => dir.join(file).is_file(),
            _ => false,
        };

        Some(HookOutput {
            system_message: Some(self.render_banner(&status, plan_exists)),
        })
    }

    /// Decide whether a `Write`/`Edit` may proceed. Returns the denial
    /// message when the target is a misplaced plan file, `None` to let the
    /// call through.
    pub fn handle_pre_tool_use(&self, input: &PreToolUseInput) -> Option<String> {
        let call = input.tool_call().ok()?;
        let file_path = call.file_path()?;
        match plan::check_write(file_path, &self.root) {
            Verdict::Allow => None,
            Verdict::WrongLocation { path } => Some(self.render_deny(&path)),
        }
    }

    // ---------------------------------------------------------------
    // Message templates
    // ---------------------------------------------------------------

    /// Resolve a configured template to its source text. File templates are
    /// read relative to the project root; an unreadable file logs a warning
    /// and yields `None` so the caller falls back to the built-in message.
    fn template_source(&self, template: Option<&MessageTemplate>) -> Option<String> {
        match template? {
            MessageTemplate::Inline(s) => Some(s.clone()),
            MessageTemplate::File(filename) => {
                let path = self.root.join(filename);
                match fs::read_to_string(&path) {
                    Ok(s) => Some(s),
                    Err(e) => {
                        eprintln!("feattrack: cannot read template {}: {e}", path.display());
                        None
                    }
                }
            }
        }
    }

    fn render_banner(&self, status: &FeatureStatus, plan_exists: bool) -> String {
        let width = self.prefs.banner_width;
        if let Some(source) = self.template_source(self.prefs.templates.banner.as_ref()) {
            match render::banner_from_template(&source, status, plan_exists, width) {
                Ok(message) => return message,
                Err(e) => eprintln!("feattrack: banner template failed, using default: {e}"),
            }
        }
        render::banner(status, plan_exists, width)
    }

    fn render_deny(&self, path: &str) -> String {
        if let Some(source) = self.template_source(self.prefs.templates.deny.as_ref()) {
            match render::deny_message(&source, path) {
                Ok(message) => return message,
                Err(e) => eprintln!("feattrack: deny template failed, using default: {e}"),
            }
        }
        match render::deny_message(render::DEFAULT_DENY_TEMPLATE, path) {
            Ok(message) => message,
            // Unreachable with the built-in template.
            Err(_) => format!("plan files belong under {}: {path}", plan::EXPECTED_LOCATION),
        }
    }
}
