use crate::feature::FEATURE_DIR;
use std::path::{Component, Path, PathBuf};

/// Where plan files must live, as shown in diagnostics.
pub const EXPECTED_LOCATION: &str = "docs/features/{feature-folder}/plan-subtask-N.md";

const PLAN_PREFIX: &str = "plan-subtask-";
const PLAN_EXT: &str = ".md";

/// Whether `name` is exactly a reserved plan filename:
/// `plan-subtask-<digits>.md`. Names that merely end with the pattern
/// (`my-plan-subtask-3.md`) are not reserved.
pub fn is_plan_filename(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(PLAN_PREFIX) else {
        return false;
    };
    let Some(digits) = rest.strip_suffix(PLAN_EXT) else {
        return false;
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Outcome of checking a proposed write target.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Allow,
    /// A reserved plan filename outside its feature folder. `path` is the
    /// form shown in the diagnostic: root-relative when the target is
    /// inside the project root, absolute otherwise.
    WrongLocation { path: String },
}

/// Check a Write/Edit target against the plan location rule.
///
/// Non-plan filenames always pass. A plan filename must land exactly at
/// `docs/features/<feature>/<filename>` under the project root, judged
/// after lexical normalization. `project_root` must be absolute.
pub fn check_write(file_path: &str, project_root: &Path) -> Verdict {
    let path = Path::new(file_path);
    let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
        return Verdict::Allow;
    };
    if !is_plan_filename(filename) {
        return Verdict::Allow;
    }

    let absolute = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&project_root.join(path))
    };
    let root = normalize(project_root);
    let relative = absolute.strip_prefix(&root).unwrap_or(&absolute);

    if conforms(relative, filename) {
        Verdict::Allow
    } else {
        Verdict::WrongLocation {
            path: relative.display().to_string(),
        }
    }
}

/// `docs/features/<one non-empty segment>/<filename>`, nothing more.
fn conforms(relative: &Path, filename: &str) -> bool {
    let Ok(rest) = relative.strip_prefix(FEATURE_DIR) else {
        return false;
    };
    let mut parts = rest.components();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Component::Normal(_folder)), Some(Component::Normal(name)), None) => {
            name.to_str() == Some(filename)
        }
        _ => false,
    }
}

/// Collapse `.` and `..` components lexically, never touching the
/// filesystem. Excess `..` at an absolute root is dropped, matching what
/// the operating system would resolve.
fn normalize(path: &Path) -> PathBuf {
    let mut parts = path.components().peekable();
    let mut normalized = if let Some(c @ Component::Prefix(..)) = parts.peek().copied() {
        parts.next();
        PathBuf::from(c.as_os_str())
    } else {
        PathBuf::new()
    };
    for component in parts {
        match component {
            Component::Prefix(..) => unreachable!(),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(c) => normalized.push(c),
        }
    }
    normalized
}
