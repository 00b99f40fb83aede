use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

const FILENAME: &str = ".feattrack.toml";
const MAX_BANNER_WIDTH: usize = 400;

/// A message template: either an inline Jinja2 string or a path to a
/// template file (relative to the project root).
///
/// In TOML this looks like one of:
///
/// ```toml
/// [templates]
/// banner = { inline = "{{ rule }}\n{{ name }}\n{{ rule }}" }
///
/// # or
///
/// [templates]
/// deny = { file = "docs/templates/deny.j2" }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MessageTemplate {
    /// An inline Jinja2 template string.
    Inline(String),
    /// Path to a template file (relative to the project root).
    File(String),
}

/// Optional overrides for the rendered messages. Absent entries use the
/// built-in layout and the built-in denial text.
#[derive(Debug, Default, Deserialize)]
pub struct Templates {
    #[serde(default)]
    pub banner: Option<MessageTemplate>,
    #[serde(default)]
    pub deny: Option<MessageTemplate>,
}

/// User-facing preferences stored in `.feattrack.toml` at the project
/// root. The file is optional and never written back: hooks run with
/// defaults when it is missing, and a malformed file downgrades to
/// defaults with a warning rather than interfering with the session.
#[derive(Debug, Deserialize)]
pub struct Preferences {
    /// Width of the horizontal rules framing the status banner. Values
    /// outside `1..=400` are ignored with a warning.
    #[serde(default = "default_banner_width")]
    pub banner_width: usize,

    /// Message template overrides.
    #[serde(default)]
    pub templates: Templates,
}

fn default_banner_width() -> usize {
    50
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            banner_width: default_banner_width(),
            templates: Templates::default(),
        }
    }
}

impl Preferences {
    /// Load preferences from `.feattrack.toml` under `root`. Missing keys
    /// in an existing file are filled in with defaults via serde.
    pub fn load(root: &Path) -> Self {
        let path = root.join(FILENAME);
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(mut prefs) => {
                    // An out-of-range width downgrades like malformed input.
                    if !(1..=MAX_BANNER_WIDTH).contains(&prefs.banner_width) {
                        eprintln!(
                            "feattrack: ignoring banner_width {} (expected 1..={})",
                            prefs.banner_width, MAX_BANNER_WIDTH
                        );
                        prefs.banner_width = default_banner_width();
                    }
                    prefs
                }
                Err(e) => {
                    eprintln!("feattrack: ignoring malformed {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                eprintln!("feattrack: cannot read {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
