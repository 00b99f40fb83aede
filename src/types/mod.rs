use serde::{Deserialize, Deserializer, Serialize};

// ===================================================================
// Hook Input Types (received via stdin, snake_case JSON)
// ===================================================================

/// How a session was started (used by SessionStart).
///
/// Hosts have sent both `"startup"` and `""` for a fresh session, so the
/// empty string is accepted as an alias for `Startup`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStartSource {
    #[serde(alias = "")]
    Startup,
    Resume,
    Clear,
    Compact,
}

/// Fields shared by all hook event inputs.
///
/// Nothing here drives a decision; the fields are modeled because every
/// real payload carries them and they default cleanly when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonInput {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub transcript_path: String,
    #[serde(default)]
    pub cwd: String,
}

// --- Per-event input structs ---

// A present `source` deserializes through here so an explicit JSON `null`
// stays distinguishable from an absent field.
fn nullable_source<'de, D>(de: D) -> Result<Option<Option<SessionStartSource>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<SessionStartSource>::deserialize(de).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct SessionStartInput {
    #[serde(flatten)]
    pub common: CommonInput,
    /// `None` when the field was absent; `Some(None)` for an explicit
    /// `"source": null`, which hosts do send and which is not a fresh
    /// session.
    #[serde(default, deserialize_with = "nullable_source")]
    pub source: Option<Option<SessionStartSource>>,
}

impl SessionStartInput {
    /// Whether this event marks a fresh session. An absent `source` counts
    /// as startup; resumes, clears, compactions and an explicit `null`
    /// return `false` so the status banner shows once per session instead
    /// of after every interruption.
    pub fn is_startup(&self) -> bool {
        matches!(self.source, None | Some(Some(SessionStartSource::Startup)))
    }
}

#[derive(Debug, Deserialize)]
pub struct PreToolUseInput {
    #[serde(flatten)]
    pub common: CommonInput,
    pub tool_name: String,
    pub tool_input: serde_json::Value,
}

/// Top-level hook input, deserialized from stdin JSON.
///
/// Tagged by the `hook_event_name` field to determine which event fired.
/// Events this binary has no handler for, including ones that do not exist
/// yet, fall into `Other` and pass through untouched.
#[derive(Debug, Deserialize)]
#[serde(tag = "hook_event_name")]
pub enum HookInput {
    SessionStart(SessionStartInput),
    PreToolUse(PreToolUseInput),
    #[serde(other)]
    Other,
}

// ===================================================================
// Tool-Specific Input Types
// ===================================================================

/// Parsed tool call, matching `tool_name` to a typed `tool_input`.
///
/// Only the write-capable tools are typed; everything else (Bash, Read,
/// MCP tools, ...) lands in `Other` and is never inspected further.
#[derive(Debug)]
pub enum ToolCall {
    Write(WriteToolInput),
    Edit(EditToolInput),
    Other { tool_name: String },
}

impl PreToolUseInput {
    /// Parse `tool_name` + `tool_input` into a typed `ToolCall`.
    pub fn tool_call(&self) -> Result<ToolCall, serde_json::Error> {
        ToolCall::parse(&self.tool_name, &self.tool_input)
    }
}

impl ToolCall {
    pub fn parse(
        tool_name: &str,
        tool_input: &serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        match tool_name {
            "Write" => Ok(Self::Write(serde_json::from_value(tool_input.clone())?)),
            "Edit" => Ok(Self::Edit(serde_json::from_value(tool_input.clone())?)),
            other => Ok(Self::Other {
                tool_name: other.to_string(),
            }),
        }
    }

    /// Target path for write-capable tools; `None` for everything else.
    pub fn file_path(&self) -> Option<&str> {
        match self {
            Self::Write(w) => Some(&w.file_path),
            Self::Edit(e) => Some(&e.file_path),
            Self::Other { .. } => None,
        }
    }
}

/// Only `file_path` matters to the location check; the remaining fields
/// default so partial payloads still validate.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteToolInput {
    pub file_path: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditToolInput {
    pub file_path: String,
    #[serde(default)]
    pub old_string: String,
    #[serde(default)]
    pub new_string: String,
    #[serde(default)]
    pub replace_all: Option<bool>,
}

// ===================================================================
// Hook Output Types (written to stdout as JSON, camelCase)
// ===================================================================

/// Top-level hook output written to stdout on exit code 0.
///
/// The status banner is the only thing this binary ever emits; denials go
/// through stderr and the exit code instead of the JSON channel.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Message shown to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}
