use crate::plan;
use std::path::{Path, PathBuf};

// ===================================================================
// Workflow document conventions
// ===================================================================

/// Tracking document at the project root naming the active feature.
pub const TRACKING_DOC: &str = "CLAUDE.md";

/// Directory all feature folders live under, relative to the project root.
pub const FEATURE_DIR: &str = "docs/features/";

const ACTIVE_FEATURE_LABEL: &str = "**Active feature:**";
const STATUS_LABEL: &str = "**Status:**";
const SUBTASK_MARKER: &str = "**Subtask ";
const UNCHECKED_MARKER: &str = "- [ ]";

// ===================================================================
// Tracking document
// ===================================================================

/// Find the active-feature link target in the tracking document.
///
/// The label and a markdown link whose target starts with `docs/features/`
/// must share a line; the first such link in document order wins. Lines
/// carrying the label without a usable link are skipped, not fatal.
pub fn find_active_feature(tracking: &str) -> Option<&str> {
    for line in tracking.lines() {
        let Some(idx) = line.find(ACTIVE_FEATURE_LABEL) else {
            continue;
        };
        let rest = &line[idx + ACTIVE_FEATURE_LABEL.len()..];
        let target = links(rest).into_iter().find_map(|link| {
            link.target
                .filter(|t| t.len() > FEATURE_DIR.len() && t.starts_with(FEATURE_DIR))
        });
        if target.is_some() {
            return target;
        }
    }
    None
}

/// Feature document path for a link target, relative to the project root.
///
/// A target whose final component ends in `.md` is the document itself;
/// anything else names the feature folder and gets `README.md` appended.
pub fn feature_doc_path(target: &str) -> PathBuf {
    let trimmed = target.trim_end_matches('/');
    if trimmed.ends_with(".md") {
        PathBuf::from(trimmed)
    } else {
        Path::new(trimmed).join("README.md")
    }
}

// ===================================================================
// Feature status document
// ===================================================================

/// One `**Subtask N:**` record from a feature document.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtask {
    pub number: u32,
    /// Raw title as written, plan link included.
    pub title: String,
    /// Target of a plan link embedded in the title, when present.
    pub plan_file: Option<String>,
}

/// Parsed feature status document.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStatus {
    pub name: Option<String>,
    pub status: Option<String>,
    pub subtasks: Vec<Subtask>,
    current: Option<usize>,
}

impl FeatureStatus {
    /// Parse a feature document in a single line scan.
    ///
    /// Extracts the `# ` title, the `**Status:**` line, every subtask
    /// record in document order, and marks the first subtask that still
    /// owns an unchecked `- [ ]` item as current. Unchecked items before
    /// the first subtask record belong to nothing.
    pub fn parse(doc: &str) -> Self {
        let mut name = None;
        let mut status = None;
        let mut subtasks: Vec<Subtask> = Vec::new();
        let mut current = None;

        for line in doc.lines() {
            if name.is_none() {
                if let Some(rest) = line.strip_prefix("# ") {
                    if !rest.is_empty() {
                        name = Some(rest.to_string());
                    }
                }
            }
            if status.is_none() {
                if let Some(idx) = line.find(STATUS_LABEL) {
                    let value = line[idx + STATUS_LABEL.len()..].trim();
                    if !value.is_empty() {
                        status = Some(value.to_string());
                    }
                }
            }
            if let Some((number, title)) = subtask_header(line) {
                let plan_file = plan_link(&title).map(str::to_string);
                subtasks.push(Subtask {
                    number,
                    title,
                    plan_file,
                });
                continue;
            }
            if current.is_none() && !subtasks.is_empty() && line.contains(UNCHECKED_MARKER) {
                current = Some(subtasks.len() - 1);
            }
        }

        Self {
            name,
            status,
            subtasks,
            current,
        }
    }

    /// The first subtask with unchecked work, or `None` when everything
    /// is checked off (or the document has no checklists at all).
    pub fn current(&self) -> Option<&Subtask> {
        self.current.map(|i| &self.subtasks[i])
    }
}

/// Parse a `**Subtask N:**` header out of a line. The ordinal is a run of
/// ASCII digits; the title is the trimmed remainder of the line.
fn subtask_header(line: &str) -> Option<(u32, String)> {
    let mut rest = line;
    loop {
        let idx = rest.find(SUBTASK_MARKER)?;
        let tail = &rest[idx + SUBTASK_MARKER.len()..];
        let digits_end = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        if digits_end > 0 {
            if let Ok(number) = tail[..digits_end].parse::<u32>() {
                if let Some(title) = tail[digits_end..].strip_prefix(":**") {
                    return Some((number, title.trim().to_string()));
                }
            }
        }
        rest = tail;
    }
}

// ===================================================================
// Plan links in subtask titles
// ===================================================================

/// Extract the plan filename from a subtask title: the first markdown link
/// whose bracket text and target are both reserved plan filenames. The
/// target wins when the two disagree on the ordinal.
pub fn plan_link(title: &str) -> Option<&str> {
    links(title).into_iter().find_map(|link| {
        if !plan::is_plan_filename(link.text) {
            return None;
        }
        link.target.filter(|t| plan::is_plan_filename(t))
    })
}

/// Title with the plan link stripped for display: cut before the first
/// plan-named bracket, then drop trailing whitespace and one separating
/// em-dash.
pub fn display_title(title: &str) -> &str {
    let open = links(title)
        .into_iter()
        .find(|link| plan::is_plan_filename(link.text))
        .map(|link| link.open);
    let Some(open) = open else {
        return title;
    };
    let head = title[..open].trim_end();
    let head = head.strip_suffix('—').unwrap_or(head);
    head.trim_end()
}

struct Link<'a> {
    /// Byte offset of the opening bracket.
    open: usize,
    text: &'a str,
    target: Option<&'a str>,
}

/// Markdown links `[text](target)` in a single line, in order, including
/// bracket pairs with no following target. Bracket text ends at the first
/// closing bracket.
fn links(line: &str) -> Vec<Link<'_>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(offset) = line[pos..].find('[') {
        let open = pos + offset;
        let Some(offset) = line[open + 1..].find(']') else {
            break;
        };
        let close = open + 1 + offset;
        let target = line[close + 1..]
            .strip_prefix('(')
            .and_then(|rest| rest.find(')').map(|end| &rest[..end]));
        found.push(Link {
            open,
            text: &line[open + 1..close],
            target,
        });
        pos = open + 1;
    }
    found
}
